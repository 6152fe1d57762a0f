//! The remote weather service: the port the resolver consumes and the
//! timeline API client shipped with the crate.

pub mod client;
pub mod error;

pub use client::TimelineClient;
pub use error::RemoteError;

use crate::types::date::QueryDate;
use async_trait::async_trait;

/// One day's reported conditions, metric units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayConditions {
    pub temp_max: f64,
    pub temp_min: f64,
}

/// A remote source of per-day weather reports.
///
/// One call is one fetch: implementations do not retry, and a failure means
/// this single fetch produced no data; the caller decides what that implies.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_day(&self, city: &str, date: &QueryDate)
        -> Result<DayConditions, RemoteError>;
}
