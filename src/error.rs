//! Error types shared by the HTTP clients, the advisor and both front ends.

use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrailError>;

#[derive(Debug, Error)]
pub enum TrailError {
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid setting {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{service} request failed with status: {status}")]
    Status {
        service: &'static str,
        status: StatusCode,
    },

    #[error("No coordinates found for '{0}'")]
    CityNotFound(String),

    #[error("Unexpected weather response: {0}")]
    WeatherFormat(String),

    #[error("Prompt blocked by the language model: {0}")]
    Blocked(String),

    #[error("Language model returned no text")]
    EmptyCompletion,

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

impl TrailError {
    /// Short, non-technical message for the console.
    pub fn user_message(&self) -> &'static str {
        match self {
            TrailError::MissingSetting(_) | TrailError::InvalidSetting { .. } => {
                "A required setting is missing or invalid. Check your environment."
            }
            TrailError::Network(e) if e.is_timeout() => "The request timed out. Please try again.",
            TrailError::Network(_) => "Unable to connect. Check your internet connection.",
            TrailError::Status { service: "geocoder", .. } | TrailError::CityNotFound(_) => {
                "Failed to retrieve city coordinates."
            }
            TrailError::Status { service: "weather", .. } | TrailError::WeatherFormat(_) => {
                "Failed to retrieve weather data."
            }
            TrailError::Status { .. } => "The request failed. Please try again.",
            TrailError::Blocked(_) => "The request was declined by the language model.",
            TrailError::EmptyCompletion => "The language model returned an empty reply.",
            TrailError::InvalidFilter(_) => "One of the filter values is out of range.",
        }
    }
}
