//! Offline provider: echoes the prompt back prefixed with `[echo]`.

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        Ok(format!("[echo] {prompt}"))
    }
}
