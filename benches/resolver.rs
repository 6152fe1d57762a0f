use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;
use weathervane::{
    DayConditions, MemoryStore, QueryDate, RemoteError, TemperatureRecord, TemperatureStore,
    WeatherResolver, WeatherSource,
};

/// A source that never answers, keeping every benched path local.
struct NoNetwork;

#[async_trait::async_trait]
impl WeatherSource for NoNetwork {
    async fn fetch_day(&self, city: &str, date: &QueryDate) -> Result<DayConditions, RemoteError> {
        Err(RemoteError::EmptyDays {
            city: city.to_string(),
            date: date.to_string(),
        })
    }
}

fn seeded_resolver(rt: &Runtime) -> WeatherResolver<MemoryStore, NoNetwork> {
    let store = MemoryStore::new();
    rt.block_on(async {
        let mut records = vec![TemperatureRecord {
            city: "Paris".to_string(),
            date: QueryDate::parse("2016-06-01").unwrap(),
            temp_max: 24.0,
            temp_min: 15.0,
        }];
        // Full decade backing the 2099-06-01 offline average.
        for y in 2089..2099 {
            records.push(TemperatureRecord {
                city: "Paris".to_string(),
                date: QueryDate::parse(&format!("{y}-06-01")).unwrap(),
                temp_max: 20.0 + (y - 2089) as f64 * 0.3,
                temp_min: 10.0 + (y - 2089) as f64 * 0.3,
            });
        }
        for record in records {
            store.put(record).await.unwrap();
        }
    });
    WeatherResolver::new(store, NoNetwork)
}

fn bench_resolver(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = seeded_resolver(&rt);

    c.bench_function("offline_cache_hit", |b| {
        b.to_async(&rt).iter(|| async {
            resolver
                .resolve()
                .city(black_box("Paris"))
                .date("2016-06-01")
                .connectivity_available(false)
                .call()
                .await
                .unwrap()
        })
    });

    c.bench_function("offline_derived_average", |b| {
        b.to_async(&rt).iter(|| async {
            resolver
                .resolve()
                .city(black_box("Paris"))
                .date("2099-06-01")
                .connectivity_available(false)
                .call()
                .await
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_resolver);
criterion_main!(benches);
