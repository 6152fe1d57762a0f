use crate::types::record::TemperatureRecord;
use serde::Serialize;

/// The answer to a weather query: the day's high and low in °C.
///
/// Produced either verbatim from a remote/stored record or as an arithmetic
/// mean over up to 10 yearly records, rounded half-up to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeatherEstimate {
    pub temp_max: f64,
    pub temp_min: f64,
}

impl From<TemperatureRecord> for WeatherEstimate {
    fn from(record: TemperatureRecord) -> Self {
        Self {
            temp_max: record.temp_max,
            temp_min: record.temp_min,
        }
    }
}
