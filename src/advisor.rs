//! The operations both front ends are built on.

use chrono::Utc;

use crate::config::{Config, ProviderKind};
use crate::error::{Result, TrailError};
use crate::filters::RecommendationRequest;
use crate::geocode::Geocoder;
use crate::llm::{self, LlmProvider};
use crate::models::{Completion, WeatherReport};
use crate::parser::parse_reply;
use crate::prompts::{popular_trails_prompt, recommendations_prompt, summary_prompt};
use crate::weather::WeatherClient;

#[derive(Debug, Clone)]
pub struct TrailAdvisor {
    geocoder: Geocoder,
    weather: Option<WeatherClient>,
    /// `None` when Gemini is selected without an API key.
    llm: Option<LlmProvider>,
    forecast_days: u32,
}

impl TrailAdvisor {
    pub fn new(
        geocoder: Geocoder,
        weather: Option<WeatherClient>,
        llm: LlmProvider,
        forecast_days: u32,
    ) -> Self {
        Self {
            geocoder,
            weather,
            llm: Some(llm),
            forecast_days,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let geocoder = Geocoder::new(&config.nominatim_base)?;
        let weather = match &config.meteomatics {
            Some(credentials) => Some(WeatherClient::new(
                &config.meteomatics_base,
                credentials.clone(),
                config.http_timeout,
            )?),
            None => {
                tracing::warn!("Meteomatics credentials not set; weather lookups are disabled");
                None
            }
        };
        let llm = if config.llm.provider == ProviderKind::Gemini && config.llm.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; trail suggestions are disabled");
            None
        } else {
            Some(llm::build(&config.llm, config.http_timeout)?)
        };
        Ok(Self {
            geocoder,
            weather,
            llm,
            forecast_days: config.forecast_days,
        })
    }

    /// Geocodes `city`, then fetches current conditions and the daily
    /// forecast. A failed forecast still returns current conditions.
    pub async fn weather(&self, city: &str) -> Result<WeatherReport> {
        let coordinates = self.geocoder.locate(city).await?;
        let client = self
            .weather
            .as_ref()
            .ok_or(TrailError::MissingSetting("METEOMATICS_USERNAME"))?;

        let now = Utc::now();
        let current = client.current(coordinates, now).await?;
        let forecast = match client.forecast(coordinates, now, self.forecast_days).await {
            Ok(days) => days,
            Err(e) => {
                tracing::warn!("Forecast unavailable for {}: {}", city, e);
                Vec::new()
            }
        };

        Ok(WeatherReport {
            city: city.to_string(),
            coordinates,
            current,
            forecast,
        })
    }

    pub async fn popular_trails(&self, city: &str) -> Result<Completion> {
        tracing::info!("Generating popular trails for {}", city);
        self.complete(&popular_trails_prompt(city)).await
    }

    pub async fn summary(&self, request: &RecommendationRequest) -> Result<String> {
        tracing::info!("Generating preference summary for {}", request.city);
        self.llm()?.complete(&summary_prompt(request)).await
    }

    pub async fn recommendations(&self, request: &RecommendationRequest) -> Result<Completion> {
        tracing::info!("Generating recommendations for {}", request.city);
        self.complete(&recommendations_prompt(request)).await
    }

    fn llm(&self) -> Result<&LlmProvider> {
        self.llm
            .as_ref()
            .ok_or(TrailError::MissingSetting("GEMINI_API_KEY"))
    }

    async fn complete(&self, prompt: &str) -> Result<Completion> {
        let text = self.llm()?.complete(prompt).await?;
        let parsed = parse_reply(&text);
        tracing::debug!(
            "Parsed {} trails from reply, {} blocks dropped",
            parsed.trails.len(),
            parsed.dropped
        );
        Ok(Completion {
            text,
            trails: parsed.trails,
            dropped_blocks: parsed.dropped,
        })
    }
}
