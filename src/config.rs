use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_URL};

/// Credentials and endpoint of the data service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Config {
            api_key: api_key.into(),
            base_url: default_base_url(),
        }
    }
}

// Keep the key out of logs
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// `~/.config/stealth-grid-cli`, falling back to the platform config dir
pub fn default_config_dir() -> PathBuf {
    let base = dirs::home_dir()
        .map(|home| home.join(".config"))
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(CONFIG_DIR_NAME)
}

/// Reads and writes the YAML credential file
pub struct ConfigStore {
    config_dir: PathBuf,
}

impl ConfigStore {
    /// Store under the per-user config directory
    pub fn new() -> Self {
        Self::with_dir(default_config_dir())
    }

    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        ConfigStore {
            config_dir: config_dir.into(),
        }
    }

    pub fn dir(&self) -> &PathBuf {
        &self.config_dir
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Ensure config directory exists
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("error creating config directory {}", self.config_dir.display())
            })?;
        }
        Ok(())
    }

    /// Load the credential file; `None` when it is missing or unreadable
    pub fn load(&self) -> Option<Config> {
        let path = self.path();
        let content = fs::read_to_string(&path).ok()?;
        match serde_yaml::from_str::<Config>(&content) {
            Ok(mut config) => {
                config.api_key = config.api_key.trim().to_string();
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable configuration");
                None
            }
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        self.ensure_dir()?;
        let content = serde_yaml::to_string(config).context("error serializing configuration")?;
        fs::write(self.path(), content).context("error saving configuration")?;
        Ok(())
    }

    /// Load the configuration, prompting for the API key when none is stored
    pub fn bootstrap(&self, input: &mut impl BufRead, output: &mut impl Write) -> Result<Config> {
        if let Some(config) = self.load() {
            if !config.api_key.is_empty() {
                return Ok(config);
            }
        }

        writeln!(output, "Configuration not found. Please set up the API key:")?;
        write!(output, "Enter the API key: ")?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line).context("error reading the API key")?;
        let api_key = line.trim();
        if api_key.is_empty() {
            bail!("API key is not set up correctly. Please set up the API key");
        }

        let config = Config::new(api_key);
        self.save(&config)?;
        writeln!(output, "Configuration saved successfully.")?;
        tracing::info!(path = %self.path().display(), "Configuration saved");
        Ok(config)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}
