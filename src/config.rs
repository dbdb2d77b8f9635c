// src/config.rs
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CORS_ORIGINS: [&str; 2] = [
    "http://localhost:5173",
    "https://your-agent-frontend.vercel.app",
];
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_LLM_MODEL: &str = "mistral-small-latest";
pub const DEFAULT_DESIGN_BASE_URL: &str = "https://image-api.com/v1/design";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// `None` keeps the server up but answers chat with a fixed notice.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DesignConfig {
    pub delay: Duration,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub llm: LlmConfig,
    pub design: DesignConfig,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honored.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let cors_origins: Vec<String> = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };
        // Credentialed CORS needs explicit origins.
        if cors_origins.iter().any(|o| o == "*") {
            return Err(ConfigError::Invalid { var: "CORS_ORIGINS", value: cors_origins.join(",") });
        }

        let temperature: f32 = parse_or("LLM_TEMPERATURE", get("LLM_TEMPERATURE"), 0.7)?;
        if !temperature.is_finite() || temperature < 0.0 {
            return Err(ConfigError::Invalid { var: "LLM_TEMPERATURE", value: temperature.to_string() });
        }

        let timeout_secs: u64 = parse_or("LLM_TIMEOUT_SECS", get("LLM_TIMEOUT_SECS"), 60)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid { var: "LLM_TIMEOUT_SECS", value: "0".to_string() });
        }

        let llm = LlmConfig {
            api_key: get("LLM_API_KEY").or_else(|| get("MISTRAL_API_KEY")),
            base_url: get("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            temperature,
            timeout: Duration::from_secs(timeout_secs),
        };

        let design = DesignConfig {
            delay: Duration::from_millis(parse_or("DESIGN_DELAY_MS", get("DESIGN_DELAY_MS"), 3000)?),
            base_url: get("DESIGN_BASE_URL")
                .unwrap_or_else(|| DEFAULT_DESIGN_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 8000)?,
            cors_origins,
            llm,
            design,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}
