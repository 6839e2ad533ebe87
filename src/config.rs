use ::config::{Config, Environment, File, Map};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for the lifecycle tooling
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Transition log settings
    pub log: TransitionLogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directive, overridden by RUST_LOG
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TransitionLogConfig {
    /// Default JSON Lines file read by `replay`
    pub path: PathBuf,
}

impl Default for TransitionLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".triplink/transitions.jsonl"),
        }
    }
}

impl LifecycleConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. triplink.toml in the working directory
    /// 3. Environment variables (prefixed with TRIPLINK_, `__` between sections)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("triplink.toml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like `load_from`, reading `TRIPLINK_` variables from `env` instead of
    /// the process environment when given
    pub fn load_with_env(path: &Path, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("TRIPLINK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().context("Failed to build configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<LifecycleConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = LifecycleConfig::load_env_file();
        LifecycleConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static LifecycleConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let config = config()?;
    tracing::debug!(log_path = %config.log.path.display(), "Configuration loaded");
    Ok(())
}
