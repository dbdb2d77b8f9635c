// src/services/design_tool.rs
use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::config::DesignConfig;

const DEFAULT_TOPIC: &str = "a social media post";
const TOPIC_MARKER: &str = "design a";

#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("design prompt is empty")]
    EmptyPrompt,

    /// Reported by real generators plugged in behind [`DesignGenerator`].
    #[error("design generation failed: {0}")]
    Generation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DesignOutput {
    pub message: String,
    pub url: String,
}

/// Anything that can turn a prompt into a finished asset.
#[async_trait]
pub trait DesignGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<DesignOutput, DesignError>;
}

/// Stand-in for a real image service: sleeps, then hands back a URL keyed by
/// a hash of the prompt.
#[derive(Debug, Clone)]
pub struct StubDesignGenerator {
    delay: Duration,
    base_url: String,
}

impl StubDesignGenerator {
    pub fn new(delay: Duration, base_url: impl Into<String>) -> Self {
        Self { delay, base_url: base_url.into() }
    }

    pub fn from_config(config: &DesignConfig) -> Self {
        Self::new(config.delay, config.base_url.clone())
    }
}

#[async_trait]
impl DesignGenerator for StubDesignGenerator {
    async fn generate(&self, prompt: &str) -> Result<DesignOutput, DesignError> {
        if prompt.trim().is_empty() {
            return Err(DesignError::EmptyPrompt);
        }
        tracing::debug!(prompt, delay_ms = self.delay.as_millis() as u64, "generating design asset");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let topic = design_topic(prompt);
        let url = format!("{}/{}", self.base_url, prompt_hash(prompt));

        Ok(DesignOutput {
            message: format!(
                "Design complete! I've created the graphic for '{topic}'. You can view the full-resolution asset now."
            ),
            url,
        })
    }
}

/// Text following the first "design a" (any case), or a generic topic.
pub fn design_topic(prompt: &str) -> &str {
    // ASCII lowering keeps byte offsets aligned with the original prompt.
    let lowered = prompt.to_ascii_lowercase();
    lowered
        .find(TOPIC_MARKER)
        .map(|idx| prompt[idx + TOPIC_MARKER.len()..].trim())
        .filter(|topic| !topic.is_empty())
        .unwrap_or(DEFAULT_TOPIC)
}

/// First 16 hex chars of the prompt's SHA-256.
pub fn prompt_hash(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    digest.iter().take(8).map(|b| format!("{b:02x}")).collect()
}
