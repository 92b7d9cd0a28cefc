//! Hiking trail recommendations for a city: geocoding, a short weather
//! forecast and language-model generated trail suggestions.

pub mod advisor;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod filters;
pub mod formatters;
pub mod geocode;
pub mod llm;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod service;
pub mod session;
pub mod weather;

pub use advisor::TrailAdvisor;
pub use config::Config;
pub use error::{Result, TrailError};
