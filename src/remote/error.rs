use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode timeline payload for '{city}' on {date}")]
    Decode {
        city: String,
        date: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("timeline response for '{city}' on {date} contains no days")]
    EmptyDays { city: String, date: String },
}
