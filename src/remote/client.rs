use crate::remote::error::RemoteError;
use crate::remote::{DayConditions, WeatherSource};
use crate::types::date::QueryDate;
use async_trait::async_trait;
use bon::bon;
use log::{info, warn};
use reqwest::Client;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str =
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline";

/// Client for the Visual Crossing timeline API.
///
/// Issues single-day requests at daily granularity in metric units. The base
/// URL is overridable for tests and self-hosted proxies; the API key is
/// supplied by the caller.
///
/// # Examples
///
/// ```no_run
/// use weathervane::TimelineClient;
///
/// let client = TimelineClient::builder()
///     .api_key("my-api-key".to_string())
///     .build();
/// ```
pub struct TimelineClient {
    http: Client,
    base_url: String,
    api_key: String,
}

#[bon]
impl TimelineClient {
    /// Creates a new `TimelineClient`.
    ///
    /// # Arguments
    ///
    /// * `.api_key(String)`: **Required.** Access key sent with every request.
    /// * `.base_url(String)`: Optional. Endpoint root, defaults to the public
    ///   Visual Crossing timeline service.
    #[builder]
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
        }
    }
}

/// Timeline payload, reduced to the fields this crate consumes. Unknown
/// fields are ignored by serde.
#[derive(Debug, Deserialize)]
struct TimelineResponse {
    days: Vec<TimelineDay>,
}

#[derive(Debug, Deserialize)]
struct TimelineDay {
    tempmax: f64,
    tempmin: f64,
}

#[async_trait]
impl WeatherSource for TimelineClient {
    /// Fetches the reported max/min temperature for one (city, date).
    ///
    /// The first element of the response's `days` array is used; a missing or
    /// empty `days` array is a failure. Never retries.
    async fn fetch_day(
        &self,
        city: &str,
        date: &QueryDate,
    ) -> Result<DayConditions, RemoteError> {
        let url = format!("{}/{}/{}", self.base_url, city, date);
        info!("Requesting timeline data from {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("unitGroup", "metric"),
                ("key", self.api_key.as_str()),
                ("include", "days"),
            ])
            .send()
            .await
            .map_err(|e| RemoteError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    RemoteError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    RemoteError::NetworkRequest(url, e)
                });
            }
        };

        let payload: TimelineResponse =
            response.json().await.map_err(|e| RemoteError::Decode {
                city: city.to_string(),
                date: date.to_string(),
                source: e,
            })?;

        let day = payload.days.first().ok_or_else(|| RemoteError::EmptyDays {
            city: city.to_string(),
            date: date.to_string(),
        })?;

        info!(
            "Timeline reported max {:.1} / min {:.1} for '{}' on {}",
            day.tempmax, day.tempmin, city, date
        );
        Ok(DayConditions {
            temp_max: day.tempmax,
            temp_min: day.tempmin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> TimelineClient {
        TimelineClient::builder()
            .api_key("test-key".to_string())
            .base_url(server.uri())
            .build()
    }

    #[tokio::test]
    async fn fetch_day_uses_the_first_reported_day() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Paris/2020-06-01"))
            .and(query_param("unitGroup", "metric"))
            .and(query_param("key", "test-key"))
            .and(query_param("include", "days"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resolvedAddress": "Paris, Île-de-France, France",
                "timezone": "Europe/Paris",
                "days": [
                    {"datetime": "2020-06-01", "tempmax": 24.0, "tempmin": 15.0, "humidity": 60.1},
                    {"datetime": "2020-06-02", "tempmax": 30.0, "tempmin": 20.0}
                ]
            })))
            .mount(&server)
            .await;

        let date = QueryDate::parse("2020-06-01").unwrap();
        let day = client_for(&server).fetch_day("Paris", &date).await.unwrap();
        assert_eq!(day.temp_max, 24.0);
        assert_eq!(day.temp_min, 15.0);
    }

    #[tokio::test]
    async fn non_success_status_is_an_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let date = QueryDate::parse("2020-06-01").unwrap();
        let err = client_for(&server)
            .fetch_day("Nowhere", &date)
            .await
            .unwrap_err();
        match err {
            RemoteError::HttpStatus { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_days_array_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"days": []})))
            .mount(&server)
            .await;

        let date = QueryDate::parse("2020-06-01").unwrap();
        let err = client_for(&server)
            .fetch_day("Paris", &date)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::EmptyDays { .. }));
    }

    #[tokio::test]
    async fn malformed_payload_is_a_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"days": [{"datetime": "2020-06-01"}]})),
            )
            .mount(&server)
            .await;

        let date = QueryDate::parse("2020-06-01").unwrap();
        let err = client_for(&server)
            .fetch_day("Paris", &date)
            .await
            .unwrap_err();
        assert!(matches!(err, RemoteError::Decode { .. }));
    }
}
