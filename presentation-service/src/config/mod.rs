use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Default)]
pub struct PresentationConfig {
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

/// Connection settings of the optional database collaborator.
///
/// Leaving `url` unset disables database support entirely.
#[derive(Debug, Clone, Default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub name: Option<String>,
}

impl DatabaseConfig {
    pub fn url_is_set(&self) -> bool {
        self.url.is_some()
    }

    pub fn name_is_set(&self) -> bool {
        self.name.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

impl PresentationConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and PORT)
        let common_config = core_config::Config::load()?;

        Ok(PresentationConfig {
            common: common_config,
            database: DatabaseConfig {
                url: optional_env("DATABASE_URL"),
                name: optional_env("DATABASE_NAME"),
            },
            observability: ObservabilityConfig {
                log_level: optional_env("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: optional_env("OTLP_ENDPOINT"),
            },
        })
    }
}

/// Empty values count as unset. Whitespace-only values are kept.
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.is_empty())
}
