use crate::types::date::QueryDate;
use serde::Serialize;

/// A persisted daily temperature entry for one (city, date) key.
///
/// At most one record exists per key; a later write replaces the earlier one
/// wholesale. Records are written only by successful resolutions and never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureRecord {
    pub city: String,
    pub date: QueryDate,
    pub temp_max: f64, // °C
    pub temp_min: f64, // °C
}
