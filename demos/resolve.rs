use weathervane::{
    MemoryStore, TemperatureStore, TimelineClient, WeatherResolver, WeathervaneError,
};

#[tokio::main]
async fn main() -> Result<(), WeathervaneError> {
    // Set RUST_LOG=info (or debug) to watch the decision engine work.
    env_logger::init();

    let api_key = std::env::var("VISUAL_CROSSING_KEY")
        .expect("set VISUAL_CROSSING_KEY to a Visual Crossing API key");
    let client = TimelineClient::builder().api_key(api_key).build();
    let resolver = WeatherResolver::new(MemoryStore::new(), client);

    // Fresh session: the store starts empty.
    resolver.store().clear_all().await?;

    let past = resolver
        .resolve()
        .city("Paris")
        .date("2020-06-01")
        .connectivity_available(true)
        .call()
        .await?;
    println!("Paris on 2020-06-01 -> {past:?}");

    let future = resolver
        .resolve()
        .city("Paris")
        .date("2030-06-01")
        .connectivity_available(true)
        .call()
        .await?;
    println!("Paris on 2030-06-01 (10-year average) -> {future:?}");

    // The average is now cached, so the same query works offline.
    let offline = resolver
        .resolve()
        .city("Paris")
        .date("2030-06-01")
        .connectivity_available(false)
        .call()
        .await?;
    println!("Paris on 2030-06-01, offline -> {offline:?}");

    Ok(())
}
