//! CLI configuration.
//!
//! Gateway address and credential, stored in `~/.apim/config.json` by the
//! `login` command. Environment variables (`APIM_HOST`, `APIM_PORT`,
//! `APIM_AUTHORIZATION`) override the stored values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Base path of the gateway's portal API.
pub const API_BASE_PATH: &str = "/api/portal/v1.4";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Gateway host name.
    pub host: Option<String>,

    /// Gateway port.
    pub port: Option<u16>,

    /// Base64 `user:password` credential sent as `Authorization: Basic`.
    pub authorization: Option<String>,
}

impl CliConfig {
    fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::config("cannot find home directory"))?;
        Ok(home.join(".apim").join("config.json"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    pub fn host(&self) -> Result<String> {
        std::env::var("APIM_HOST")
            .ok()
            .or_else(|| self.host.clone())
            .ok_or_else(not_logged_in)
    }

    pub fn port(&self) -> Result<u16> {
        if let Ok(port) = std::env::var("APIM_PORT") {
            return port
                .parse()
                .map_err(|_| Error::config(format!("invalid APIM_PORT '{port}'")));
        }
        self.port.ok_or_else(not_logged_in)
    }

    pub fn authorization(&self) -> Result<String> {
        std::env::var("APIM_AUTHORIZATION")
            .ok()
            .or_else(|| self.authorization.clone())
            .ok_or_else(not_logged_in)
    }

    /// Root URL for every portal API request.
    pub fn base_url(&self) -> Result<String> {
        Ok(format!(
            "https://{}:{}{}",
            self.host()?,
            self.port()?,
            API_BASE_PATH
        ))
    }
}

fn not_logged_in() -> Error {
    Error::config("not logged in to API Manager, run 'apim login' first")
}
