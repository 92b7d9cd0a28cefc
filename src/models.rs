use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::filters::{Difficulty, Season};

// ============================================================================
// Nominatim API Models
// ============================================================================

/// One hit from `/search?format=json`. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

// ============================================================================
// Meteomatics API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MeteomaticsResponse {
    pub data: Vec<ParameterSeries>,
}

#[derive(Debug, Deserialize)]
pub struct ParameterSeries {
    pub parameter: String,
    pub coordinates: Vec<CoordinateSeries>,
}

#[derive(Debug, Deserialize)]
pub struct CoordinateSeries {
    pub dates: Vec<DatedValue>,
}

#[derive(Debug, Deserialize)]
pub struct DatedValue {
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl MeteomaticsResponse {
    /// Values for `parameter` at the first (only) requested coordinate.
    pub fn series(&self, parameter: &str) -> Option<&[DatedValue]> {
        self.data
            .iter()
            .find(|p| p.parameter == parameter)
            .and_then(|p| p.coordinates.first())
            .map(|c| c.dates.as_slice())
    }
}

// ============================================================================
// Gemini API Models
// ============================================================================

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

// ============================================================================
// Domain Models
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub relative_humidity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub high_c: f64,
    pub low_c: f64,
    pub precipitation_mm: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub city: String,
    pub coordinates: Coordinates,
    pub current: CurrentConditions,
    /// Empty when the forecast request failed but current conditions did not.
    pub forecast: Vec<DayForecast>,
}

/// One trail scraped from a language-model reply. Every field is optional
/// except the name; models rarely fill all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trail {
    pub name: String,
    pub difficulty: Option<String>,
    pub length: Option<String>,
    pub elevation_gain: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub link: Option<String>,
}

/// Raw model reply plus whatever trails could be parsed out of it.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub trails: Vec<Trail>,
    /// Blocks that looked like trail data but belonged to no trail.
    pub dropped_blocks: usize,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CityRequest {
    pub city: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct RecommendTrailsRequest {
    pub city: String,
    pub difficulty: Difficulty,
    /// Trail length in miles (0 to 10, half-mile steps)
    pub length_miles: f64,
    /// Elevation gain in feet (0 to 1000, 100 ft steps)
    pub elevation_feet: u32,
    pub season: Season,
    #[serde(default)]
    pub pet_friendly: bool,
    #[serde(default)]
    pub preferences: Option<String>,
}
