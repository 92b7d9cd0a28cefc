//! Meteomatics weather client. Authenticates every request with static
//! basic-auth credentials; there is no token exchange, retry or caching.

use std::time::Duration;

use chrono::{DateTime, Days, Utc};
use reqwest::Client;

use crate::config::Credentials;
use crate::constants::USER_AGENT;
use crate::error::{Result, TrailError};
use crate::models::{Coordinates, CurrentConditions, DatedValue, DayForecast, MeteomaticsResponse};

pub const TEMPERATURE: &str = "t_2m:C";
pub const HUMIDITY: &str = "relative_humidity_2m:p";
pub const DAILY_HIGH: &str = "t_max_2m_24h:C";
pub const DAILY_LOW: &str = "t_min_2m_24h:C";
pub const DAILY_PRECIPITATION: &str = "precip_24h:mm";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl WeatherClient {
    pub fn new(
        base_url: impl Into<String>,
        credentials: Credentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Makes an authenticated GET for `{time}/{parameters}/{lat},{lon}/json`
    async fn make_request(
        &self,
        time: &str,
        parameters: &[&str],
        at: Coordinates,
    ) -> Result<MeteomaticsResponse> {
        let url = format!(
            "{}/{}/{}/{},{}/json",
            self.base_url,
            time,
            parameters.join(","),
            at.latitude,
            at.longitude
        );
        tracing::debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Weather service returned status {}", response.status());
            return Err(TrailError::Status {
                service: "weather",
                status: response.status(),
            });
        }

        Ok(response.json::<MeteomaticsResponse>().await?)
    }

    /// Temperature and humidity at 2 m for the instant `now`.
    pub async fn current(&self, at: Coordinates, now: DateTime<Utc>) -> Result<CurrentConditions> {
        tracing::info!("Fetching current conditions for {}, {}", at.latitude, at.longitude);

        let time = now.format(TIMESTAMP_FORMAT).to_string();
        let response = self.make_request(&time, &[TEMPERATURE, HUMIDITY], at).await?;

        let temperature_c = response
            .series(TEMPERATURE)
            .and_then(|s| s.first())
            .map(|v| v.value)
            .ok_or_else(|| TrailError::WeatherFormat(format!("missing {TEMPERATURE}")))?;
        let relative_humidity = response
            .series(HUMIDITY)
            .and_then(|s| s.first())
            .map(|v| v.value);

        Ok(CurrentConditions {
            temperature_c,
            relative_humidity,
        })
    }

    /// Daily highs, lows and precipitation for `days` days starting on
    /// `start`'s date.
    pub async fn forecast(
        &self,
        at: Coordinates,
        start: DateTime<Utc>,
        days: u32,
    ) -> Result<Vec<DayForecast>> {
        tracing::info!(
            "Fetching {}-day forecast for {}, {}",
            days,
            at.latitude,
            at.longitude
        );

        let days = days.max(1);
        // 24h aggregates are stamped at the end of their window, so the
        // first day is reported at the following midnight.
        let first_midnight = start
            .date_naive()
            .checked_add_days(Days::new(1))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|d| d.and_utc())
            .ok_or_else(|| TrailError::WeatherFormat("forecast start out of range".into()))?;
        let last_midnight = first_midnight
            .checked_add_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| TrailError::WeatherFormat("forecast end out of range".into()))?;

        let time = format!(
            "{}--{}:P1D",
            first_midnight.format(TIMESTAMP_FORMAT),
            last_midnight.format(TIMESTAMP_FORMAT)
        );
        let response = self
            .make_request(&time, &[DAILY_HIGH, DAILY_LOW, DAILY_PRECIPITATION], at)
            .await?;

        daily_forecast(&response)
    }
}

fn daily_forecast(response: &MeteomaticsResponse) -> Result<Vec<DayForecast>> {
    let highs = response
        .series(DAILY_HIGH)
        .ok_or_else(|| TrailError::WeatherFormat(format!("missing {DAILY_HIGH}")))?;
    let lows = response
        .series(DAILY_LOW)
        .ok_or_else(|| TrailError::WeatherFormat(format!("missing {DAILY_LOW}")))?;
    let precipitation = response.series(DAILY_PRECIPITATION).unwrap_or_default();

    let value_at = |series: &[DatedValue], date: DateTime<Utc>| {
        series.iter().find(|v| v.date == date).map(|v| v.value)
    };

    highs
        .iter()
        .map(|high| {
            let low_c = value_at(lows, high.date).ok_or_else(|| {
                TrailError::WeatherFormat(format!("no {DAILY_LOW} value for {}", high.date))
            })?;
            let date = high
                .date
                .date_naive()
                .pred_opt()
                .ok_or_else(|| TrailError::WeatherFormat(format!("bad date {}", high.date)))?;
            Ok(DayForecast {
                date,
                high_c: high.value,
                low_c,
                precipitation_mm: value_at(precipitation, high.date),
            })
        })
        .collect()
}
