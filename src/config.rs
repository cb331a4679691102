use anyhow::{Context, Result};
use lucidia_memory::MemoryConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_PATH: &str = "lucidia.toml";

/// Overrides `memory.dir` when set.
pub const MEMORY_DIR_ENV: &str = "LUCIDIA_MEMORY_DIR";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_bind_address")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: default_bind_address(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let expanded_path = shellexpand::tilde(path);
        let content = fs::read_to_string(expanded_path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let mut config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;

        config.apply_env();
        Ok(config)
    }

    /// Load `path` if given (it must exist), else `lucidia.toml` when present,
    /// else defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::load_from_file(DEFAULT_CONFIG_PATH)
            }
            None => {
                let mut config = Config::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(MEMORY_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.memory.dir = PathBuf::from(dir);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.bind.parse::<std::net::SocketAddr>().is_err() {
            anyhow::bail!("Invalid bind address: {}", self.api.bind);
        }

        self.memory
            .validate()
            .with_context(|| "Invalid [memory] section")?;

        Ok(())
    }

    pub fn expand_paths(&mut self) -> Result<()> {
        let dir = self.memory.dir.to_string_lossy().to_string();
        self.memory.dir = PathBuf::from(shellexpand::tilde(&dir).to_string());

        Ok(())
    }
}
