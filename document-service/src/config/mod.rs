use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::collections::HashMap;
use std::env;

pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub data_dir: String,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    File,
}

impl DocumentConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env, APP__ prefix and HOST/PORT)
        let common = core_config::Config::load()?;
        Self::with_store_vars(common, &env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, AppError> {
        let common = core_config::Config::from_vars(vars.clone())?;
        Self::with_store_vars(common, &vars)
    }

    fn with_store_vars(
        common: core_config::Config,
        vars: &HashMap<String, String>,
    ) -> Result<Self, AppError> {
        let default_max_body = DEFAULT_MAX_BODY_BYTES.to_string();

        Ok(DocumentConfig {
            common,
            store: StoreConfig {
                backend: get_var(vars, "STORE_BACKEND", "memory")
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                data_dir: get_var(vars, "STORE_DATA_DIR", "data"),
                max_body_bytes: get_var(vars, "STORE_MAX_BODY_BYTES", &default_max_body)
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "Invalid STORE_MAX_BODY_BYTES: {}",
                            e
                        ))
                    })?,
            },
        })
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => Ok(StoreBackend::File),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

fn get_var(vars: &HashMap<String, String>, key: &str, default: &str) -> String {
    vars.get(key)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}
