use std::path::PathBuf;

use anyhow::anyhow;
use campus_directions::GoogleDirectionsClientParams;
use campus_tours::{guide::GuideConfig, segment_assembler::AssemblyMode};

const DATABASE_PATH_ENV_VAR: &str = "CAMPUS_DATABASE_PATH";
const BIND_ADDRESS_ENV_VAR: &str = "CAMPUS_BIND_ADDRESS";
const ASSEMBLY_MODE_ENV_VAR: &str = "CAMPUS_ASSEMBLY_MODE";

const DEFAULT_DATABASE_PATH: &str = "campus.sqlite3";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

pub struct ApiConfig {
    pub database_path: PathBuf,
    pub bind_address: String,
    pub assembly_mode: AssemblyMode,
    pub directions: GoogleDirectionsClientParams,
    pub guide: GuideConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let assembly_mode = match std::env::var(ASSEMBLY_MODE_ENV_VAR) {
            Ok(value) => value
                .parse::<AssemblyMode>()
                .map_err(|error| anyhow!("{ASSEMBLY_MODE_ENV_VAR}: {error}"))?,
            Err(_) => AssemblyMode::default(),
        };

        Ok(Self {
            database_path: std::env::var(DATABASE_PATH_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string())
                .into(),
            bind_address: std::env::var(BIND_ADDRESS_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string()),
            assembly_mode,
            directions: GoogleDirectionsClientParams::from_env(),
            guide: GuideConfig::from_env(),
        })
    }
}
