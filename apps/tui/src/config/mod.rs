mod settings;

pub use settings::{AppConfig, ConfigError, DEFAULT_API_BASE_URL, DEFAULT_EXPORT_DIR};
