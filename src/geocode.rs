//! Forward geocoding: city name to coordinates via Nominatim (OpenStreetMap).

use std::time::Duration;

use reqwest::Client;

use crate::constants::{GEOCODE_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Result, TrailError};
use crate::models::{Coordinates, NominatimPlace};

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(GEOCODE_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Resolves `city` to the coordinates of Nominatim's best match.
    pub async fn locate(&self, city: &str) -> Result<Coordinates> {
        tracing::info!("Geocoding city: {}", city);

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Geocoder returned status {}", response.status());
            return Err(TrailError::Status {
                service: "geocoder",
                status: response.status(),
            });
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| TrailError::CityNotFound(city.to_string()))?;

        let coordinates = Coordinates {
            latitude: parse_degrees(&place.lat, city)?,
            longitude: parse_degrees(&place.lon, city)?,
        };

        tracing::debug!(
            "Geocoded {} to {:?} ({})",
            city,
            coordinates,
            place.display_name.as_deref().unwrap_or("unnamed")
        );
        Ok(coordinates)
    }
}

fn parse_degrees(raw: &str, city: &str) -> Result<f64> {
    raw.trim().parse().map_err(|_| {
        tracing::warn!("Geocoder returned a non-numeric coordinate '{}' for {}", raw, city);
        TrailError::CityNotFound(city.to_string())
    })
}
