//! Configuration resolved from environment variables.
//!
//! `.env` is loaded by `main` before `Config::from_env` runs. Tests go
//! through `Config::from_lookup` instead of mutating the process env.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_FORECAST_DAYS, DEFAULT_GEMINI_MODEL, DEFAULT_HTTP_TIMEOUT_SECS, GEMINI_API_BASE,
    METEOMATICS_API_BASE, MAX_FORECAST_DAYS, NOMINATIM_API_BASE,
};
use crate::error::{Result, TrailError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Dummy,
}

impl FromStr for ProviderKind {
    type Err = TrailError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "dummy" => Ok(Self::Dummy),
            _ => Err(TrailError::InvalidSetting {
                name: "TRAIL_SCOUT_LLM_PROVIDER",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Keep the password out of debug logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub api_base: String,
    pub model: String,
    /// Required for Gemini, but only once a prompt is sent.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub nominatim_base: String,
    pub meteomatics_base: String,
    /// Weather lookups are skipped with a warning when unset.
    pub meteomatics: Option<Credentials>,
    pub forecast_days: u32,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("TRAIL_SCOUT_LLM_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => ProviderKind::Gemini,
        };
        let api_key = get("GEMINI_API_KEY");

        let meteomatics = match (get("METEOMATICS_USERNAME"), get("METEOMATICS_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            (None, None) => None,
            (Some(_), None) => return Err(TrailError::MissingSetting("METEOMATICS_PASSWORD")),
            (None, Some(_)) => return Err(TrailError::MissingSetting("METEOMATICS_USERNAME")),
        };

        let forecast_days = match get("TRAIL_SCOUT_FORECAST_DAYS") {
            Some(raw) => parse_number("TRAIL_SCOUT_FORECAST_DAYS", &raw)
                .and_then(|days: u32| {
                    if (1..=MAX_FORECAST_DAYS).contains(&days) {
                        Ok(days)
                    } else {
                        Err(TrailError::InvalidSetting {
                            name: "TRAIL_SCOUT_FORECAST_DAYS",
                            value: raw.clone(),
                        })
                    }
                })?,
            None => DEFAULT_FORECAST_DAYS,
        };

        let timeout_secs = match get("TRAIL_SCOUT_HTTP_TIMEOUT_SECS") {
            Some(raw) => match parse_number("TRAIL_SCOUT_HTTP_TIMEOUT_SECS", &raw)? {
                0 => {
                    return Err(TrailError::InvalidSetting {
                        name: "TRAIL_SCOUT_HTTP_TIMEOUT_SECS",
                        value: raw,
                    })
                }
                secs => secs,
            },
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            llm: LlmConfig {
                provider,
                api_base: get("GEMINI_API_BASE").unwrap_or_else(|| GEMINI_API_BASE.to_string()),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                api_key,
            },
            nominatim_base: get("NOMINATIM_API_BASE")
                .unwrap_or_else(|| NOMINATIM_API_BASE.to_string()),
            meteomatics_base: get("METEOMATICS_API_BASE")
                .unwrap_or_else(|| METEOMATICS_API_BASE.to_string()),
            meteomatics,
            forecast_days,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_number<T: FromStr>(name: &'static str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| TrailError::InvalidSetting {
        name,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_with_only_an_api_key() {
        let config = load(&[("GEMINI_API_KEY", "k")]).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::Gemini);
        assert_eq!(config.llm.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.llm.api_base, GEMINI_API_BASE);
        assert_eq!(config.nominatim_base, NOMINATIM_API_BASE);
        assert_eq!(config.forecast_days, DEFAULT_FORECAST_DAYS);
        assert_eq!(config.http_timeout, Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        assert!(config.meteomatics.is_none());
    }

    #[test]
    fn gemini_key_is_not_needed_to_load() {
        let config = load(&[]).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::Gemini);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn dummy_provider_needs_no_key() {
        let config = load(&[("TRAIL_SCOUT_LLM_PROVIDER", "Dummy")]).unwrap();
        assert_eq!(config.llm.provider, ProviderKind::Dummy);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = load(&[("TRAIL_SCOUT_LLM_PROVIDER", "palm")]).unwrap_err();
        assert!(err.to_string().contains("palm"));
    }

    #[test]
    fn credentials_come_in_pairs() {
        let config = load(&[
            ("GEMINI_API_KEY", "k"),
            ("METEOMATICS_USERNAME", "alice"),
            ("METEOMATICS_PASSWORD", "s3cret"),
        ])
        .unwrap();
        let creds = config.meteomatics.unwrap();
        assert_eq!(creds.username, "alice");
        assert!(!format!("{creds:?}").contains("s3cret"));

        let err = load(&[("GEMINI_API_KEY", "k"), ("METEOMATICS_USERNAME", "alice")]).unwrap_err();
        assert!(matches!(err, TrailError::MissingSetting("METEOMATICS_PASSWORD")));
    }

    #[test]
    fn forecast_days_are_bounded() {
        let config = load(&[("GEMINI_API_KEY", "k"), ("TRAIL_SCOUT_FORECAST_DAYS", "7")]).unwrap();
        assert_eq!(config.forecast_days, 7);

        assert!(load(&[("GEMINI_API_KEY", "k"), ("TRAIL_SCOUT_FORECAST_DAYS", "0")]).is_err());
        assert!(load(&[("GEMINI_API_KEY", "k"), ("TRAIL_SCOUT_FORECAST_DAYS", "11")]).is_err());
        assert!(load(&[("GEMINI_API_KEY", "k"), ("TRAIL_SCOUT_FORECAST_DAYS", "soon")]).is_err());
    }

    #[test]
    fn http_timeout_must_be_positive() {
        let config = load(&[("TRAIL_SCOUT_HTTP_TIMEOUT_SECS", "12")]).unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(12));

        let err = load(&[("TRAIL_SCOUT_HTTP_TIMEOUT_SECS", "0")]).unwrap_err();
        assert!(matches!(
            err,
            TrailError::InvalidSetting { name: "TRAIL_SCOUT_HTTP_TIMEOUT_SECS", .. }
        ));
        assert!(load(&[("TRAIL_SCOUT_HTTP_TIMEOUT_SECS", "-5")]).is_err());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("GEMINI_API_KEY", "k"), ("GEMINI_MODEL", "  ")]).unwrap();
        assert_eq!(config.llm.model, DEFAULT_GEMINI_MODEL);
    }
}
