//! The (city, date) temperature store: the contract the resolver consumes
//! and the in-memory implementation shipped with the crate.

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::types::date::QueryDate;
use crate::types::record::TemperatureRecord;
use async_trait::async_trait;

/// Keyed storage of [`TemperatureRecord`]s.
///
/// The store has no expiry or eviction policy: records persist until
/// [`TemperatureStore::clear_all`], which the composition root calls once per
/// session before the first query. Single-record writes are atomic; no
/// multi-record transaction is required.
#[async_trait]
pub trait TemperatureStore: Send + Sync {
    /// Looks up the record stored under exactly `(city, date)`.
    async fn get(
        &self,
        city: &str,
        date: &QueryDate,
    ) -> Result<Option<TemperatureRecord>, StoreError>;

    /// Upserts `record`, replacing any existing record for the same
    /// (city, date) key. Last write wins.
    async fn put(&self, record: TemperatureRecord) -> Result<(), StoreError>;

    /// Mean of `temp_max` across the 10 yearly records `[year-10, year-1]`
    /// sharing `date`'s month and day, rounded to 2 decimals.
    ///
    /// Returns `Some` only when all 10 yearly records exist for `city`;
    /// partial coverage yields `None`.
    async fn average_max(&self, city: &str, date: &QueryDate) -> Result<Option<f64>, StoreError>;

    /// Counterpart of [`TemperatureStore::average_max`] for `temp_min`.
    async fn average_min(&self, city: &str, date: &QueryDate) -> Result<Option<f64>, StoreError>;

    /// Every record currently stored, in no particular order.
    async fn all(&self) -> Result<Vec<TemperatureRecord>, StoreError>;

    /// Drops every record. Session lifecycle hook, not per-query behavior.
    async fn clear_all(&self) -> Result<(), StoreError>;
}
