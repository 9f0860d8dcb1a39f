use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gallery_engine::FetchSettings;
use serde::Deserialize;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "gallery.ron";
const CONFIG_ENV: &str = "GALLERY_CONFIG";

/// Page sizes the list endpoint accepts.
const PAGE_SIZE_RANGE: std::ops::RangeInclusive<u32> = 10..=100;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub page_size: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub redirect_limit: usize,
    pub max_body_bytes: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            endpoint: fetch.endpoint,
            page_size: gallery_core::PAGE_SIZE,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            redirect_limit: fetch.redirect_limit,
            max_body_bytes: fetch.max_bytes,
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            endpoint: self.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_body_bytes,
        }
    }
}

/// Outcome of reading the config file. Logging is configured from the file
/// itself, so problems are collected here and logged by the caller later.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub warnings: Vec<String>,
}

pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

pub fn load_config(path: &Path) -> LoadedConfig {
    let mut loaded = LoadedConfig::default();

    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return loaded,
        Err(err) => {
            loaded
                .warnings
                .push(format!("Failed to read config from {:?}: {}", path, err));
            return loaded;
        }
    };

    match ron::from_str::<AppConfig>(&content) {
        Ok(config) => loaded.config = config,
        Err(err) => {
            loaded
                .warnings
                .push(format!("Failed to parse config from {:?}: {}", path, err));
            return loaded;
        }
    }

    let requested = loaded.config.page_size;
    let clamped = requested.clamp(*PAGE_SIZE_RANGE.start(), *PAGE_SIZE_RANGE.end());
    if clamped != requested {
        loaded.warnings.push(format!(
            "page_size {} outside {:?}; using {}",
            requested, PAGE_SIZE_RANGE, clamped
        ));
        loaded.config.page_size = clamped;
    }

    loaded
}
