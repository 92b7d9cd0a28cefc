//! Search filters a user can attach to a recommendation request.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::{ELEVATION_STEP_FEET, LENGTH_STEP_MILES, MAX_ELEVATION_FEET, MAX_LENGTH_MILES};
use crate::error::{Result, TrailError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Difficulty {
    #[default]
    Easy,
    Moderate,
    Difficult,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Moderate, Self::Difficult];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Moderate => "Moderate",
            Self::Difficult => "Difficult",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

/// Accepts a case-insensitive name or a 1-based position in `options`.
fn pick<T: Copy>(input: &str, options: &[T], name: impl Fn(&T) -> &'static str) -> Option<T> {
    let input = input.trim();
    if let Ok(index) = input.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| options.get(i)).copied();
    }
    options
        .iter()
        .find(|o| name(*o).eq_ignore_ascii_case(input))
        .copied()
}

impl FromStr for Difficulty {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self> {
        pick(s, &Self::ALL, Self::as_str)
            .ok_or_else(|| TrailError::InvalidFilter(format!("unknown difficulty '{}'", s.trim())))
    }
}

impl FromStr for Season {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self> {
        pick(s, &Self::ALL, Self::as_str)
            .ok_or_else(|| TrailError::InvalidFilter(format!("unknown season '{}'", s.trim())))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailFilters {
    pub difficulty: Difficulty,
    pub length_miles: f64,
    pub elevation_feet: u32,
    pub season: Season,
    pub pet_friendly: bool,
}

impl Default for TrailFilters {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            length_miles: 0.0,
            elevation_feet: 0,
            season: Season::Spring,
            pet_friendly: false,
        }
    }
}

impl TrailFilters {
    pub fn new(
        difficulty: Difficulty,
        length_miles: f64,
        elevation_feet: u32,
        season: Season,
        pet_friendly: bool,
    ) -> Result<Self> {
        validate_length(length_miles)?;
        validate_elevation(elevation_feet)?;
        Ok(Self {
            difficulty,
            length_miles,
            elevation_feet,
            season,
            pet_friendly,
        })
    }
}

pub fn validate_length(miles: f64) -> Result<()> {
    if !(0.0..=MAX_LENGTH_MILES).contains(&miles) {
        return Err(TrailError::InvalidFilter(format!(
            "trail length must be between 0 and {MAX_LENGTH_MILES} miles, got {miles}"
        )));
    }
    if (miles / LENGTH_STEP_MILES).fract() != 0.0 {
        return Err(TrailError::InvalidFilter(format!(
            "trail length must be a multiple of {LENGTH_STEP_MILES} miles, got {miles}"
        )));
    }
    Ok(())
}

pub fn validate_elevation(feet: u32) -> Result<()> {
    if feet > MAX_ELEVATION_FEET {
        return Err(TrailError::InvalidFilter(format!(
            "elevation gain must be at most {MAX_ELEVATION_FEET} feet, got {feet}"
        )));
    }
    if feet % ELEVATION_STEP_FEET != 0 {
        return Err(TrailError::InvalidFilter(format!(
            "elevation gain must be a multiple of {ELEVATION_STEP_FEET} feet, got {feet}"
        )));
    }
    Ok(())
}

/// Everything the recommendation and summary prompts are built from.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationRequest {
    pub city: String,
    pub filters: TrailFilters,
    pub preferences: Option<String>,
}

impl RecommendationRequest {
    pub fn new(city: impl Into<String>, filters: TrailFilters, preferences: Option<String>) -> Self {
        let preferences = preferences
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        Self {
            city: city.into(),
            filters,
            preferences,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_names_case_insensitively() {
        assert_eq!("moderate".parse::<Difficulty>().unwrap(), Difficulty::Moderate);
        assert_eq!(" DIFFICULT ".parse::<Difficulty>().unwrap(), Difficulty::Difficult);
    }

    #[test]
    fn season_parses_menu_index() {
        assert_eq!("1".parse::<Season>().unwrap(), Season::Spring);
        assert_eq!("4".parse::<Season>().unwrap(), Season::Winter);
        assert!("0".parse::<Season>().is_err());
        assert!("5".parse::<Season>().is_err());
    }

    #[test]
    fn unknown_season_is_an_invalid_filter() {
        let err = "monsoon".parse::<Season>().unwrap_err();
        assert!(matches!(err, TrailError::InvalidFilter(_)));
        assert!(err.to_string().contains("monsoon"));
    }

    #[test]
    fn length_must_sit_on_half_mile_steps() {
        assert!(validate_length(0.0).is_ok());
        assert!(validate_length(7.5).is_ok());
        assert!(validate_length(10.0).is_ok());
        assert!(validate_length(2.25).is_err());
        assert!(validate_length(10.5).is_err());
        assert!(validate_length(-0.5).is_err());
        assert!(validate_length(f64::NAN).is_err());
    }

    #[test]
    fn elevation_must_sit_on_hundred_foot_steps() {
        assert!(validate_elevation(0).is_ok());
        assert!(validate_elevation(1000).is_ok());
        assert!(validate_elevation(150).is_err());
        assert!(validate_elevation(1100).is_err());
    }

    #[test]
    fn filters_reject_out_of_range_values() {
        let result = TrailFilters::new(Difficulty::Easy, 3.0, 1200, Season::Fall, true);
        assert!(matches!(result, Err(TrailError::InvalidFilter(_))));
    }

    #[test]
    fn blank_preferences_become_none() {
        let request = RecommendationRequest::new("Vancouver", TrailFilters::default(), Some("   ".into()));
        assert_eq!(request.preferences, None);

        let request = RecommendationRequest::new("Vancouver", TrailFilters::default(), Some(" lakes ".into()));
        assert_eq!(request.preferences.as_deref(), Some("lakes"));
    }
}
