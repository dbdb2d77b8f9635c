// src/services/intent.rs
use std::fmt;

/// Keywords that route a message to the design tool. Matched as plain
/// substrings of the lower-cased input, so "ui" also hits "build".
pub const DESIGN_KEYWORDS: [&str; 7] = ["design", "ui", "ux", "banner", "poster", "logo", "thumbnail"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Design,
    Chat,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Design => "design",
            Intent::Chat => "chat",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// TODO: replace the keyword scan with a model-backed classifier once the LLM
// client can return structured output.
pub fn detect_intent(msg: &str) -> Intent {
    let msg_lower = msg.to_lowercase();

    if DESIGN_KEYWORDS.iter().any(|k| msg_lower.contains(k)) {
        Intent::Design
    } else {
        Intent::Chat
    }
}
