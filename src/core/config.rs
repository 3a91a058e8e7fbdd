use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::feed::proxy::DEFAULT_PROXY_URL;
use crate::core::registry::import::{load_registry, ImportError};
use crate::core::registry::FeedRegistry;
use crate::core::template::{
    Template, TemplateError, Templates, DEFAULT_ENTRY_TEMPLATE, DEFAULT_NAV_TEMPLATE,
};

pub const PROXY_URL_KEY: &str = "FEEDREADER_PROXY_URL";
pub const TIMEOUT_SECS_KEY: &str = "FEEDREADER_TIMEOUT_SECS";
pub const FEEDS_FILE_KEY: &str = "FEEDREADER_FEEDS_FILE";
pub const ENTRY_TEMPLATE_KEY: &str = "FEEDREADER_ENTRY_TEMPLATE";
pub const NAV_TEMPLATE_KEY: &str = "FEEDREADER_NAV_TEMPLATE";

const DEFAULT_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("{key} must be an http(s) url, got {value:?}")]
    InvalidProxyUrl { key: &'static str, value: String },
    #[error("cannot read template {}: {source}", .path.display())]
    TemplateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template {} does not compile: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },
    #[error(transparent)]
    Feeds(#[from] ImportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub proxy_url: String,
    pub request_timeout: Duration,
    pub feeds_file: Option<PathBuf>,
    pub entry_template: Option<PathBuf>,
    pub nav_template: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            proxy_url: DEFAULT_PROXY_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            feeds_file: None,
            entry_template: None,
            nav_template: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(value) = read(PROXY_URL_KEY) {
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(ConfigError::InvalidProxyUrl {
                    key: PROXY_URL_KEY,
                    value,
                });
            }
            config.proxy_url = value;
        }
        if let Some(value) = read(TIMEOUT_SECS_KEY) {
            let seconds = value
                .parse::<u64>()
                .ok()
                .filter(|seconds| *seconds > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    key: TIMEOUT_SECS_KEY,
                    value: value.clone(),
                })?;
            config.request_timeout = Duration::from_secs(seconds);
        }
        config.feeds_file = read(FEEDS_FILE_KEY).map(PathBuf::from);
        config.entry_template = read(ENTRY_TEMPLATE_KEY).map(PathBuf::from);
        config.nav_template = read(NAV_TEMPLATE_KEY).map(PathBuf::from);

        Ok(config)
    }

    pub fn registry(&self) -> Result<FeedRegistry, ConfigError> {
        match &self.feeds_file {
            Some(path) => Ok(load_registry(path)?),
            None => Ok(FeedRegistry::builtin()),
        }
    }

    pub fn templates(&self) -> Result<Templates, ConfigError> {
        if self.entry_template.is_none() && self.nav_template.is_none() {
            return Ok(Templates::default());
        }
        let entry = read_template(self.entry_template.as_deref(), DEFAULT_ENTRY_TEMPLATE)?;
        let nav_item = read_template(self.nav_template.as_deref(), DEFAULT_NAV_TEMPLATE)?;
        Ok(Templates {
            entry: compile_template(self.entry_template.as_deref(), &entry)?,
            nav_item: compile_template(self.nav_template.as_deref(), &nav_item)?,
        })
    }
}

fn read_template(path: Option<&Path>, fallback: &str) -> Result<String, ConfigError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ConfigError::TemplateFile {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(fallback.to_string()),
    }
}

fn compile_template(path: Option<&Path>, source: &str) -> Result<Template, ConfigError> {
    Template::compile(source).map_err(|source| ConfigError::Template {
        path: path.map(Path::to_path_buf).unwrap_or_default(),
        source,
    })
}
