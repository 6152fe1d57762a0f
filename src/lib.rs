mod error;
mod remote;
mod resolver;
mod store;
mod types;
mod utils;

pub use error::WeathervaneError;
pub use resolver::*;

pub use remote::client::*;
pub use remote::error::RemoteError;
pub use remote::{DayConditions, WeatherSource};

pub use store::error::StoreError;
pub use store::memory::*;
pub use store::TemperatureStore;

pub use types::date::{InvalidDate, QueryDate};
pub use types::estimate::WeatherEstimate;
pub use types::record::TemperatureRecord;
