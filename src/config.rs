// Configuration store: a KEY=VALUE text file in the user's home
// directory that keeps the API key and the source image URL between
// runs, so they are only typed once.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const API_KEY: &str = "API_KEY";
const SOURCE_IMAGE_URL: &str = "SOURCE_IMAGE_URL";

/// Persisted settings. Keys found in the file that this version does not
/// recognize are kept in `extras` so saving never drops them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub source_image_url: Option<String>,
    extras: BTreeMap<String, String>,
}

impl Config {
    /// Location of the config file, `.faceswap_config` in the user's
    /// home directory (current directory when no home is known).
    pub fn default_path() -> PathBuf {
        let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        dir.join(".faceswap_config")
    }

    /// Load the config from its default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Read a config file. A missing file is an empty config: the first
    /// run starts with prompts instead of an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Ok(Self::parse(&data))
    }

    /// One KEY=VALUE pair per line, split on the first `=` so values may
    /// contain the character themselves. Lines without `=` are skipped.
    fn parse(data: &str) -> Self {
        let mut config = Config::default();
        for line in data.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            match key {
                API_KEY => config.api_key = Some(value.to_string()),
                SOURCE_IMAGE_URL => config.source_image_url = Some(value.to_string()),
                other => {
                    config.extras.insert(other.to_string(), value.to_string());
                }
            }
        }
        config
    }

    /// Save the config to its default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        if let Some(key) = &self.api_key {
            out.push_str(&format!("{}={}\n", API_KEY, key));
        }
        if let Some(url) = &self.source_image_url {
            out.push_str(&format!("{}={}\n", SOURCE_IMAGE_URL, url));
        }
        for (key, value) in &self.extras {
            out.push_str(&format!("{}={}\n", key, value));
        }
        std::fs::write(path, out)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }
}
