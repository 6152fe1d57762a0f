use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lookup failed for '{city}' on {date}")]
    Lookup { city: String, date: String },

    #[error("store write failed for '{city}' on {date}")]
    Write { city: String, date: String },

    #[error("store unavailable")]
    Unavailable,
}
