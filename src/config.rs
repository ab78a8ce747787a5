//! Service configuration.
//!
//! Resolution order per setting:
//! 1) environment variable (`PRIORITY_BIND_ADDR`, `PRIORITY_WEIGHTS_PATH`)
//! 2) `config/service.toml`, if present
//! 3) built-in default
//!
//! `.env` files are loaded by the binary before this runs, so local overrides
//! can live there too.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::PathBuf};

pub const ENV_BIND_ADDR: &str = "PRIORITY_BIND_ADDR";
pub const ENV_WEIGHTS_PATH: &str = "PRIORITY_WEIGHTS_PATH";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_WEIGHTS_PATH: &str = "config/weights.json";
const CONFIG_FILE: &str = "config/service.toml";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub weights_path: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    bind_addr: Option<String>,
    weights_path: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    fn load_from(config_file: &str) -> Result<Self> {
        let file = match fs::read_to_string(config_file) {
            Ok(s) => {
                toml::from_str(&s).with_context(|| format!("parsing {config_file}"))?
            }
            Err(_) => FileConfig::default(),
        };

        let bind_addr = std::env::var(ENV_BIND_ADDR)
            .ok()
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let weights_path = std::env::var(ENV_WEIGHTS_PATH)
            .ok()
            .map(PathBuf::from)
            .or(file.weights_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WEIGHTS_PATH));

        Ok(Self {
            bind_addr,
            weights_path,
        })
    }
}
