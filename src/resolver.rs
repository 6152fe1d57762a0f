//! The retrieval/fallback decision engine for daily temperature queries.
//!
//! Given a city, a date, and a connectivity signal, [`WeatherResolver`] picks
//! between three sources (the local store, a single remote fetch, and a
//! 10-year historical average) and persists whatever it obtains along the
//! way. Remote and store failures never escape as errors; they surface as an
//! absent result.

use crate::error::WeathervaneError;
use crate::remote::{RemoteError, WeatherSource};
use crate::store::{StoreError, TemperatureStore};
use crate::types::date::QueryDate;
use crate::types::estimate::WeatherEstimate;
use crate::types::record::TemperatureRecord;
use crate::utils::round2_half_up;
use bon::bon;
use log::{debug, info, warn};

/// How many prior years feed a historical average.
const HISTORY_YEARS: i32 = 10;

/// Why a single fetch-and-persist produced no record.
///
/// Collapsed to an absent result at the public boundary; kept apart
/// internally so logs and tests can tell the causes apart.
#[derive(Debug)]
enum FetchFailure {
    Remote(RemoteError),
    Store(StoreError),
}

/// The decision engine answering "what were (or will be, on average) the high
/// and low temperatures for this city on this date?".
///
/// The resolver owns no state of its own: every call is a pure function of
/// its inputs plus the current store contents. The only state carried across
/// calls is the store's record set, mutated exclusively by successful fetch
/// and average operations. Calls may run concurrently; identical in-flight
/// requests are not de-duplicated, and the store's last-write-wins upsert
/// resolves the race.
///
/// Create one with [`WeatherResolver::new`], injecting a
/// [`TemperatureStore`] and a [`WeatherSource`].
pub struct WeatherResolver<S, R> {
    store: S,
    remote: R,
}

#[bon]
impl<S, R> WeatherResolver<S, R>
where
    S: TemperatureStore,
    R: WeatherSource,
{
    pub fn new(store: S, remote: R) -> Self {
        Self { store, remote }
    }

    /// The injected store, exposed so the composition root can run lifecycle
    /// operations such as [`TemperatureStore::clear_all`] once per session
    /// before the first query.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the high/low temperatures for a city on a calendar date.
    ///
    /// The decision, in order:
    /// 1. No connectivity → answer from the store alone. Past dates need a
    ///    direct hit; future dates prefer a direct hit and otherwise fall
    ///    back to a stored average that requires the full 10 years of
    ///    history.
    /// 2. Future date → fetch the same month-day for each of the previous 10
    ///    years, persist every success, and answer with the rounded mean of
    ///    whichever years succeeded (any nonzero number is enough). The
    ///    average is persisted under the queried (city, date) key.
    /// 3. Past date → one remote fetch, persisted, returned verbatim.
    ///
    /// A date equal to today classifies as future.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.city(&str)`: **Required.** Free-text city identifier; not
    ///   validated for existence.
    /// * `.date(&str)`: **Required.** Strict `YYYY-MM-DD` calendar date.
    /// * `.connectivity_available(bool)`: **Required.** The platform's
    ///   connectivity probe reading.
    ///
    /// # Returns
    ///
    /// `Ok(Some(estimate))` when any path produced data, `Ok(None)` when the
    /// request degraded past every fallback. Remote failures, store failures
    /// and incomplete history all collapse into `Ok(None)`; nothing is
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`WeathervaneError::InvalidDate`] when `date` is not a real
    /// calendar date in canonical form. Validation is the caller's job, so
    /// this is defensive; no other error is surfaced.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use weathervane::{MemoryStore, TimelineClient, WeatherResolver, WeathervaneError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), WeathervaneError> {
    /// let client = TimelineClient::builder()
    ///     .api_key("my-api-key".to_string())
    ///     .build();
    /// let resolver = WeatherResolver::new(MemoryStore::new(), client);
    ///
    /// let estimate = resolver
    ///     .resolve()
    ///     .city("Paris")
    ///     .date("2020-06-01")
    ///     .connectivity_available(true)
    ///     .call()
    ///     .await?;
    ///
    /// match estimate {
    ///     Some(e) => println!("max {:.2} °C / min {:.2} °C", e.temp_max, e.temp_min),
    ///     None => println!("no data obtainable"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn resolve(
        &self,
        city: &str,
        date: &str,
        connectivity_available: bool,
    ) -> Result<Option<WeatherEstimate>, WeathervaneError> {
        let date = QueryDate::parse(date)?;
        let today = QueryDate::today();
        Ok(self
            .resolve_at(city, &date, &today, connectivity_available)
            .await)
    }

    /// Dispatches a validated query relative to an explicit `today`.
    async fn resolve_at(
        &self,
        city: &str,
        date: &QueryDate,
        today: &QueryDate,
        connectivity_available: bool,
    ) -> Option<WeatherEstimate> {
        match self.store.all().await {
            Ok(records) => debug!("Store currently holds {} records", records.len()),
            Err(e) => warn!("Could not inspect store contents: {}", e),
        }

        if !connectivity_available {
            info!("No connectivity, resolving '{}' on {} from the store", city, date);
            self.resolve_offline(city, date, today).await
        } else if date.is_future(today) {
            info!(
                "Future date {}, averaging the previous {} years for '{}'",
                date, HISTORY_YEARS, city
            );
            self.resolve_future_online(city, date).await
        } else {
            info!("Past date {}, fetching '{}' directly", date, city);
            self.fetch_and_store(city, date)
                .await
                .ok()
                .map(WeatherEstimate::from)
        }
    }

    /// Direct fetch path: one remote request, persisted before it is
    /// returned. Failures are logged and reported, never retried or cached.
    async fn fetch_and_store(
        &self,
        city: &str,
        date: &QueryDate,
    ) -> Result<TemperatureRecord, FetchFailure> {
        let day = match self.remote.fetch_day(city, date).await {
            Ok(day) => day,
            Err(e) => {
                warn!("Remote fetch failed for '{}' on {}: {}", city, date, e);
                return Err(FetchFailure::Remote(e));
            }
        };

        let record = TemperatureRecord {
            city: city.to_string(),
            date: date.clone(),
            temp_max: day.temp_max,
            temp_min: day.temp_min,
        };
        if let Err(e) = self.store.put(record.clone()).await {
            warn!("Could not persist record for '{}' on {}: {}", city, date, e);
            return Err(FetchFailure::Store(e));
        }
        debug!("Stored remote result for '{}' on {}", city, date);
        Ok(record)
    }

    /// Historical average path: sequential per-year fetches, each persisted
    /// independently; years that fail are dropped. Any nonzero number of
    /// successful years yields an average, persisted under the original key.
    async fn resolve_future_online(&self, city: &str, date: &QueryDate) -> Option<WeatherEstimate> {
        let year = date.year();
        let mut pairs = Vec::with_capacity(HISTORY_YEARS as usize);
        for y in (year - HISTORY_YEARS)..year {
            let Some(candidate) = date.with_year(y) else {
                // Feb 29 outside a leap year: no calendar date to fetch.
                debug!("No calendar date {}-{}, skipping", y, date.month_day());
                continue;
            };
            // One year's failure must not abort the rest; it is already
            // logged by fetch_and_store.
            if let Ok(record) = self.fetch_and_store(city, &candidate).await {
                pairs.push((record.temp_max, record.temp_min));
            }
        }

        if pairs.is_empty() {
            warn!(
                "No historical data obtained for '{}' on any {}",
                city,
                date.month_day()
            );
            return None;
        }

        let count = pairs.len() as f64;
        let avg_max = round2_half_up(pairs.iter().map(|(max, _)| max).sum::<f64>() / count);
        let avg_min = round2_half_up(pairs.iter().map(|(_, min)| min).sum::<f64>() / count);

        let record = TemperatureRecord {
            city: city.to_string(),
            date: date.clone(),
            temp_max: avg_max,
            temp_min: avg_min,
        };
        if let Err(e) = self.store.put(record).await {
            warn!("Could not persist average for '{}' on {}: {}", city, date, e);
            return None;
        }
        info!(
            "Averaged {} of {} years for '{}' on {}: max {:.2} / min {:.2}",
            pairs.len(),
            HISTORY_YEARS,
            city,
            date,
            avg_max,
            avg_min
        );
        Some(WeatherEstimate {
            temp_max: avg_max,
            temp_min: avg_min,
        })
    }

    /// Cache path: the store is all there is. Future dates prefer a direct
    /// hit and only then fall back to the store-side average, which demands
    /// the full 10 years of history, stricter than the online path and
    /// deliberately so.
    async fn resolve_offline(
        &self,
        city: &str,
        date: &QueryDate,
        today: &QueryDate,
    ) -> Option<WeatherEstimate> {
        if !date.is_future(today) {
            return match self.store.get(city, date).await {
                Ok(Some(record)) => Some(WeatherEstimate::from(record)),
                Ok(None) => {
                    info!("No stored record for '{}' on {}", city, date);
                    None
                }
                Err(e) => {
                    warn!("Store lookup failed for '{}' on {}: {}", city, date, e);
                    None
                }
            };
        }

        match self.store.get(city, date).await {
            Ok(Some(record)) => {
                info!("Direct store hit for future date {} for '{}'", date, city);
                return Some(WeatherEstimate::from(record));
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Store lookup failed for '{}' on {}: {}", city, date, e);
                return None;
            }
        }

        let avg_max = match self.store.average_max(city, date).await {
            Ok(v) => v,
            Err(e) => {
                warn!("Store average failed for '{}' on {}: {}", city, date, e);
                return None;
            }
        };
        let avg_min = match self.store.average_min(city, date).await {
            Ok(v) => v,
            Err(e) => {
                warn!("Store average failed for '{}' on {}: {}", city, date, e);
                return None;
            }
        };

        match (avg_max, avg_min) {
            (Some(max), Some(min)) => {
                // Already derivable from existing records, so nothing is
                // re-persisted here.
                info!(
                    "Derived offline average for '{}' on {}: max {:.2} / min {:.2}",
                    city, date, max, min
                );
                Some(WeatherEstimate {
                    temp_max: max,
                    temp_min: min,
                })
            }
            _ => {
                info!(
                    "Fewer than {} stored years for '{}' on {}",
                    HISTORY_YEARS,
                    city,
                    date.month_day()
                );
                None
            }
        }
    }
}
