use crate::store::error::StoreError;
use crate::store::TemperatureStore;
use crate::types::date::QueryDate;
use crate::types::record::TemperatureRecord;
use crate::utils::round2_half_up;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory [`TemperatureStore`] keyed by (city, date).
///
/// Backed by a `tokio` mutex around a plain `HashMap`; a single `put` is
/// atomic and last-write-wins, which is all the resolver requires. Contents
/// live for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<(String, QueryDate), TemperatureRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects the 10 yearly `(temp_max, temp_min)` pairs preceding `date`,
    /// or `None` as soon as any year is missing.
    async fn yearly_pairs(&self, city: &str, date: &QueryDate) -> Option<Vec<(f64, f64)>> {
        let records = self.records.lock().await;
        let year = date.year();
        let mut pairs = Vec::with_capacity(10);
        for y in (year - 10)..year {
            // A month-day that does not exist in year `y` (Feb 29 outside a
            // leap year) can never have been stored, so coverage is partial.
            let candidate = date.with_year(y)?;
            let record = records.get(&(city.to_string(), candidate))?;
            pairs.push((record.temp_max, record.temp_min));
        }
        Some(pairs)
    }
}

#[async_trait]
impl TemperatureStore for MemoryStore {
    async fn get(
        &self,
        city: &str,
        date: &QueryDate,
    ) -> Result<Option<TemperatureRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.get(&(city.to_string(), date.clone())).cloned())
    }

    async fn put(&self, record: TemperatureRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.insert((record.city.clone(), record.date.clone()), record);
        Ok(())
    }

    async fn average_max(&self, city: &str, date: &QueryDate) -> Result<Option<f64>, StoreError> {
        Ok(self.yearly_pairs(city, date).await.map(|pairs| {
            let sum: f64 = pairs.iter().map(|(max, _)| max).sum();
            round2_half_up(sum / pairs.len() as f64)
        }))
    }

    async fn average_min(&self, city: &str, date: &QueryDate) -> Result<Option<f64>, StoreError> {
        Ok(self.yearly_pairs(city, date).await.map(|pairs| {
            let sum: f64 = pairs.iter().map(|(_, min)| min).sum();
            round2_half_up(sum / pairs.len() as f64)
        }))
    }

    async fn all(&self) -> Result<Vec<TemperatureRecord>, StoreError> {
        let records = self.records.lock().await;
        Ok(records.values().cloned().collect())
    }

    async fn clear_all(&self) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        records.clear();
        Ok(())
    }
}
