mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LimitSettings, LlmSettings, LoggingSettings, OcrSettings, ServerSettings, Settings,
};
