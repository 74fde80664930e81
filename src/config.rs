use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Emit per-step transfer state transitions at debug level
    #[serde(default)]
    pub enable_tracing: bool,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    /// PostgreSQL connection URL, required when `storage.backend` is `postgres`
    #[serde(default)]
    pub postgres_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

impl AppConfig {
    /// Load `config/<env>.yaml`
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.storage.backend == StorageBackend::Postgres && self.postgres_url.is_none() {
            anyhow::bail!("storage.backend is postgres but postgres_url is not set");
        }
        Ok(())
    }
}
