#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use agent_backend::services::design_tool::{DesignError, DesignGenerator, DesignOutput, StubDesignGenerator};
use agent_backend::services::llm::{LlmError, LlmQuery};
use agent_backend::state::{AppState, SharedState};
use async_trait::async_trait;

pub const TEST_DESIGN_BASE: &str = "https://designs.test/v1";

pub struct FailingDesign;

#[async_trait]
impl DesignGenerator for FailingDesign {
    async fn generate(&self, _prompt: &str) -> Result<DesignOutput, DesignError> {
        Err(DesignError::Generation("renderer offline".into()))
    }
}

/// Echoes the input and remembers which session asked.
#[derive(Default)]
pub struct EchoLlm {
    pub sessions: Mutex<Vec<String>>,
}

#[async_trait]
impl LlmQuery for EchoLlm {
    async fn query(&self, user_input: &str, session_id: &str) -> Result<String, LlmError> {
        self.sessions.lock().unwrap().push(session_id.to_string());
        Ok(format!("echo: {user_input}"))
    }
}

pub struct FailingLlm;

#[async_trait]
impl LlmQuery for FailingLlm {
    async fn query(&self, _user_input: &str, _session_id: &str) -> Result<String, LlmError> {
        Err(LlmError::ApiResponse { status: 503, body: "overloaded".into() })
    }
}

pub fn instant_design() -> Arc<dyn DesignGenerator> {
    Arc::new(StubDesignGenerator::new(Duration::ZERO, TEST_DESIGN_BASE))
}

pub fn state_with(design: Arc<dyn DesignGenerator>, llm: Arc<dyn LlmQuery>) -> SharedState {
    Arc::new(AppState::new(design, llm))
}
