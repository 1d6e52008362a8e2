use serde::Deserialize;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_FILE_SIZE_MB: u64 = 20;
const DEFAULT_LLM_TIMEOUT_SECONDS: u64 = 120;
const DEFAULT_OCR_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub ocr: OcrSettings,
    pub limits: LimitSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrSettings {
    pub endpoint: String,
    pub languages: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitSettings {
    pub max_file_size_mb: u64,
}

impl LimitSettings {
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Environment-variable configuration with working defaults for every
    /// knob except the provider API key.
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_parsed("SERVER_PORT", DEFAULT_PORT),
            },
            llm: LlmSettings {
                api_key: env_or("ANTHROPIC_API_KEY", ""),
                model: env_or("ANTHROPIC_MODEL", "claude-sonnet-4-20250514"),
                base_url: env_or("ANTHROPIC_BASE_URL", "https://api.anthropic.com"),
                request_timeout_seconds: env_parsed(
                    "LLM_TIMEOUT_SECONDS",
                    DEFAULT_LLM_TIMEOUT_SECONDS,
                ),
            },
            ocr: OcrSettings {
                endpoint: env_or("OCR_ENDPOINT", "http://localhost:8884"),
                languages: env_or("OCR_LANGUAGES", "ron+eng"),
                request_timeout_seconds: env_parsed(
                    "OCR_TIMEOUT_SECONDS",
                    DEFAULT_OCR_TIMEOUT_SECONDS,
                ),
            },
            limits: LimitSettings {
                max_file_size_mb: env_parsed("MAX_FILE_SIZE_MB", DEFAULT_MAX_FILE_SIZE_MB),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                enable_json: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
