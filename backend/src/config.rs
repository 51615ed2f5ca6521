use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Upper bound the translation backend accepts per call.
pub const TRANSLATION_BACKEND_MAX_CHARS: usize = 5000;

/// Answer segments budgeted for by the derived remote timeout.
const REMOTE_ANSWER_SEGMENTS: u64 = 3;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub llm: LlmConfig,
    pub translation: TranslationConfig,
    pub prompt: PromptConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

/// Generation backend (Gemini `generateContent`)
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_base: String,
    pub model: String,
    pub api_key: Option<String>,
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub api_base: String,
    /// Maximum characters per backend call
    pub chunk_size: usize,
    #[serde(deserialize_with = "deserialize_duration_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Substrings that switch the prompt to the detailed template
    pub cues: Vec<String>,
}

/// Target of `chat --remote`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_url: String,
    /// Request timeout for `chat --remote`; derived from the backend timeouts when unset.
    #[serde(default, deserialize_with = "deserialize_optional_duration_secs")]
    pub timeout_secs: Option<u64>,
}

// Hand-written so the key never reaches the logs.
impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "****"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or the first config.toml found
    /// 2. Override with environment variables (prefixed with APP_, plus GEMINI_API_KEY)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        // 1. Load from config file
        let mut config = match path.map(str::to_string).or_else(Self::find_config_file) {
            Some(config_path) => {
                tracing::info!("Loading configuration from {}", config_path);
                Self::from_toml(&config_path)?
            },
            None => {
                tracing::warn!("Configuration file not found, using defaults");
                Config::default()
            },
        };

        // 2. Override with environment variables
        config.apply_env_overrides();

        // 3. Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST / APP_SERVER_PORT
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,healthbot=debug")
    /// - GEMINI_API_KEY or APP_LLM_API_KEY: generation backend credential
    /// - APP_LLM_MODEL / APP_LLM_API_BASE
    /// - APP_LLM_TIMEOUT_SECS: accepts "60", "60s", "2m"
    /// - APP_TRANSLATION_API_BASE
    /// - APP_TRANSLATION_TIMEOUT_SECS: accepts "30", "30s"
    /// - APP_CLIENT_API_URL: backend used by `chat --remote`
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Some(key) = std::env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| std::env::var("APP_LLM_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
        {
            self.llm.api_key = Some(key);
            tracing::info!("Override llm.api_key from env");
        }

        if let Ok(model) = std::env::var("APP_LLM_MODEL") {
            self.llm.model = model;
            tracing::info!("Override llm.model from env: {}", self.llm.model);
        }

        if let Ok(base) = std::env::var("APP_LLM_API_BASE") {
            self.llm.api_base = base;
            tracing::info!("Override llm.api_base from env: {}", self.llm.api_base);
        }

        if let Ok(timeout) = std::env::var("APP_LLM_TIMEOUT_SECS") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.llm.timeout_secs = val;
                    tracing::info!("Override llm.timeout_secs from env: {}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_LLM_TIMEOUT_SECS '{}': {} (keep {})",
                    timeout,
                    e,
                    self.llm.timeout_secs
                ),
            }
        }

        if let Ok(base) = std::env::var("APP_TRANSLATION_API_BASE") {
            self.translation.api_base = base;
            tracing::info!("Override translation.api_base from env: {}", self.translation.api_base);
        }

        if let Ok(timeout) = std::env::var("APP_TRANSLATION_TIMEOUT_SECS") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.translation.timeout_secs = val;
                    tracing::info!("Override translation.timeout_secs from env: {}", val);
                },
                Err(e) => tracing::warn!(
                    "Invalid APP_TRANSLATION_TIMEOUT_SECS '{}': {} (keep {})",
                    timeout,
                    e,
                    self.translation.timeout_secs
                ),
            }
        }

        if let Ok(url) = std::env::var("APP_CLIENT_API_URL") {
            self.client.api_url = url;
            tracing::info!("Override client.api_url from env: {}", self.client.api_url);
        }

        if let Ok(timeout) = std::env::var("APP_CLIENT_TIMEOUT_SECS") {
            match parse_duration_to_secs(&timeout) {
                Ok(val) => {
                    self.client.timeout_secs = Some(val);
                    tracing::info!("Override client.timeout_secs from env: {}", val);
                },
                Err(e) => tracing::warn!("Invalid APP_CLIENT_TIMEOUT_SECS '{}': {}", timeout, e),
            }
        }
    }

    /// Request timeout used by the remote front end.
    ///
    /// Unless `client.timeout_secs` is set this is approximate: one generation
    /// call plus translation of a single-segment question and an answer of up
    /// to three segments. Longer Tamil answers need an explicit value.
    pub fn remote_timeout(&self) -> Duration {
        let derived = self.llm.timeout_secs
            + (1 + REMOTE_ANSWER_SEGMENTS) * self.translation.timeout_secs;
        Duration::from_secs(self.client.timeout_secs.unwrap_or(derived))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.llm.api_key.is_none() {
            tracing::warn!("⚠️  Missing API key for the generation backend!");
            tracing::warn!("⚠️  Set GEMINI_API_KEY or llm.api_key in config.toml");
            tracing::warn!("⚠️  Every question will be answered with an error until it is set");
        }

        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if self.translation.chunk_size == 0
            || self.translation.chunk_size > TRANSLATION_BACKEND_MAX_CHARS
        {
            anyhow::bail!(
                "translation.chunk_size must be within 1..={}",
                TRANSLATION_BACKEND_MAX_CHARS
            );
        }

        if self.llm.timeout_secs == 0 {
            anyhow::bail!("llm.timeout_secs must be > 0");
        }
        if self.translation.timeout_secs == 0 {
            anyhow::bail!("translation.timeout_secs must be > 0");
        }

        if self.prompt.cues.iter().all(|c| c.trim().is_empty()) {
            anyhow::bail!("prompt.cues must contain at least one non-empty cue");
        }

        Ok(())
    }

    /// One-line summary for startup logs
    pub fn log_summary(&self) {
        tracing::info!(
            "Config: server={}:{} model={} api_key={} chunk_size={} llm_timeout={}s translation_timeout={}s cues={}",
            self.server.host,
            self.server.port,
            self.llm.model,
            if self.llm.api_key.is_some() { "set" } else { "missing" },
            self.translation.chunk_size,
            self.llm.timeout_secs,
            self.translation.timeout_secs,
            self.prompt.cues.len()
        );
    }

    fn find_config_file() -> Option<String> {
        let possible_paths = ["conf/config.toml", "config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,healthbot=debug".to_string(),
            file: Some("logs/healthbot.log".to_string()),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-pro".to_string(),
            api_key: None,
            timeout_secs: 60,
            temperature: None,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_base: "https://translate.googleapis.com".to_string(),
            chunk_size: 4900,
            timeout_secs: 30,
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            cues: ["detail", "explain", "elaborate", "more information", "in depth", "full", "more"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_url: "http://127.0.0.1:8000".to_string(), timeout_secs: None }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_duration_to_secs(input: &str) -> Result<u64, String> {
    // Accept plain numbers (treated as seconds)
    if let Ok(val) = input.parse::<u64>() {
        return Ok(val);
    }

    let s = input.trim().to_lowercase();
    let (num_str, unit) = s.split_at(s.chars().take_while(|c| c.is_ascii_digit()).count());
    if num_str.is_empty() || unit.is_empty() {
        return Err("missing number or unit".into());
    }
    let n: u64 = num_str.parse().map_err(|_| "invalid number".to_string())?;
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Ok(n),
        "m" | "min" | "mins" | "minute" | "minutes" => Ok(n * 60),
        "h" | "hr" | "hour" | "hours" => Ok(n * 60 * 60),
        _ => Err(format!("unsupported unit: {}", unit)),
    }
}

// Custom serde deserializer to support numeric or human-friendly string values
fn deserialize_duration_secs<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a number of seconds or a string like '30s', '2m'")
        }
        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if v >= 0 { Ok(v as u64) } else { Err(E::custom("negative not allowed")) }
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_duration_to_secs(v).map_err(E::custom)
        }
    }
    deserializer.deserialize_any(Visitor)
}

fn deserialize_optional_duration_secs<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_duration_secs(deserializer).map(Some)
}
