//! Language-model backends.
//!
//! `LlmProvider` is an enum over the concrete backends so callers hold a
//! plain cloneable value; `build` picks one from configuration.

pub mod dummy;
pub mod gemini;

use crate::config::{LlmConfig, ProviderKind};
use crate::error::{Result, TrailError};

#[derive(Debug, Clone)]
pub enum LlmProvider {
    Gemini(gemini::GeminiProvider),
    Dummy(dummy::DummyProvider),
}

impl LlmProvider {
    /// Send `prompt` to the backend and return its text reply.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            LlmProvider::Gemini(p) => p.complete(prompt).await,
            LlmProvider::Dummy(p) => p.complete(prompt).await,
        }
    }
}

pub fn build(config: &LlmConfig, timeout: std::time::Duration) -> Result<LlmProvider> {
    match config.provider {
        ProviderKind::Dummy => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        ProviderKind::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .ok_or(TrailError::MissingSetting("GEMINI_API_KEY"))?;
            let provider =
                gemini::GeminiProvider::new(&config.api_base, &config.model, api_key, timeout)?;
            Ok(LlmProvider::Gemini(provider))
        }
    }
}
