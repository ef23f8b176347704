use crate::error::AppError;
use config::{Config as Cfg, Environment, File, Map};
use serde::Deserialize;
use std::env;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 4000;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    /// Loads `.env`, the optional `configuration` file, `APP__*` variables and
    /// finally the bare `HOST` / `PORT` variables, later sources winning.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::vars().collect())
    }

    pub fn from_vars(vars: Map<String, String>) -> Result<Self, AppError> {
        let host = vars.get("HOST").cloned();
        let port = vars.get("PORT").cloned();

        let config = Cfg::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .source(Some(vars)),
            )
            .set_override_option("host", host)?
            .set_override_option("port", port)?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
