use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

use crate::calendar::reminder::TIME_FORMAT;
use crate::calendar::WeekStart;
use crate::theme::ThemeConfig;

const APP_DIR: &str = "reminder-calendar";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where reminders are stored. Defaults to the user data directory.
    pub data_file: Option<PathBuf>,
    pub week_start: WeekStart,
    /// Time prefilled in new reminders, "HH:MM".
    pub default_time: String,
    pub log_level: String,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            week_start: WeekStart::default(),
            default_time: "00:00".to_string(),
            log_level: "info".to_string(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Load from `path`, or the default location. A missing file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.default_time()?;
        Ok(config)
    }

    pub fn default_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.default_time, TIME_FORMAT)
            .map_err(|_| eyre!("default_time must be HH:MM, got {:?}", self.default_time))
    }

    pub fn data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(p) => Ok(p.clone()),
            None => data_dir()
                .map(|d| d.join("reminders.json"))
                .ok_or_else(|| eyre!("Could not determine a data directory; set data_file")),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR))
}
