//! Application settings, read once at startup and handed to each component.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::db::core::DbConfig;
use crate::environment::Environment;
use crate::file::error::JsonError;
use crate::file::json::load_json_as;
use crate::log::core::LogConfig;
use crate::secrets::core::DEFAULT_SECRETS_PATH;

pub const DEFAULT_ITEMS_PER_PAGE: i64 = 20;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub environment: Environment,
    pub log_file: Option<PathBuf>,
    pub secrets_path: PathBuf,
    pub items_per_page: i64,
    pub templates_dir: Option<PathBuf>,
    pub database: Option<DbConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_file: None,
            secrets_path: PathBuf::from(DEFAULT_SECRETS_PATH),
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            templates_dir: None,
            database: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, JsonError> {
        load_json_as(path)
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            environment: self.environment,
            file: self.log_file.clone(),
        }
    }
}
