// src/services/dispatcher.rs
use std::sync::Arc;

use crate::message::AgentResponse;

use super::design_tool::DesignGenerator;
use super::intent::{Intent, detect_intent};
use super::llm::LlmQuery;

pub const DESIGN_UNAVAILABLE_MESSAGE: &str =
    "Sorry, the design tool is currently unavailable. Please try again in a moment.";
pub const CHAT_TROUBLE_MESSAGE: &str =
    "Sorry, I'm having trouble processing your request right now. Please try again.";
pub const EMPTY_INPUT_MESSAGE: &str =
    "I didn't catch anything there. Ask me a question, or ask me to design something!";

/// Routes a message to the design tool or the LLM and always comes back
/// with a well-formed reply.
#[derive(Clone)]
pub struct Dispatcher {
    design: Arc<dyn DesignGenerator>,
    llm: Arc<dyn LlmQuery>,
}

impl Dispatcher {
    pub fn new(design: Arc<dyn DesignGenerator>, llm: Arc<dyn LlmQuery>) -> Self {
        Self { design, llm }
    }

    pub async fn dispatch(&self, user_input: &str, session_id: &str) -> AgentResponse {
        let intent = detect_intent(user_input);
        tracing::info!(session_id, %intent, user_input, "received chat request");

        if user_input.trim().is_empty() {
            return AgentResponse::text(EMPTY_INPUT_MESSAGE);
        }

        match intent {
            Intent::Design => match self.design.generate(user_input).await {
                Ok(out) => AgentResponse::design(out.message, out.url),
                Err(e) => {
                    tracing::warn!(session_id, error = %e, "design tool failed");
                    AgentResponse::text(DESIGN_UNAVAILABLE_MESSAGE)
                }
            },
            Intent::Chat => match self.llm.query(user_input, session_id).await {
                Ok(reply) => AgentResponse::text(reply),
                Err(e) => {
                    tracing::error!(session_id, error = %e, "LLM query failed");
                    AgentResponse::text(CHAT_TROUBLE_MESSAGE)
                }
            },
        }
    }
}
