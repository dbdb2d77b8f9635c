// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::design_tool::{DesignGenerator, StubDesignGenerator};
use crate::services::dispatcher::Dispatcher;
use crate::services::llm::{LlmClient, LlmError, LlmQuery};

pub type SharedState = Arc<AppState>;

/// Immutable per-process state. Nothing here changes between requests.
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(design: Arc<dyn DesignGenerator>, llm: Arc<dyn LlmQuery>) -> Self {
        Self { dispatcher: Dispatcher::new(design, llm) }
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        let llm = LlmClient::new(&config.llm)?;
        if !llm.is_configured() {
            tracing::warn!("LLM_API_KEY not set; chat replies will report the service as unavailable");
        }
        let design = StubDesignGenerator::from_config(&config.design);
        Ok(Self::new(Arc::new(design), Arc::new(llm)))
    }
}
