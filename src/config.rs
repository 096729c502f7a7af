use std::{env, ffi::OsString, path::PathBuf};

use crate::{logging, storage};

pub const DATA_DIR_ENV: &str = "SENSEI_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "SENSEI_LOG";

/// Runtime settings resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: &'static str,
}

impl Config {
    pub fn resolve(data_dir_flag: Option<PathBuf>) -> Self {
        Self::resolve_with(
            data_dir_flag,
            env::var_os(DATA_DIR_ENV),
            env::var(LOG_LEVEL_ENV).ok(),
        )
    }

    fn resolve_with(
        data_dir_flag: Option<PathBuf>,
        data_dir_env: Option<OsString>,
        log_level_env: Option<String>,
    ) -> Self {
        let data_dir = data_dir_flag
            .or_else(|| {
                data_dir_env
                    .filter(|value| !value.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(storage::get_data_dir);

        let log_dir = storage::get_state_dir().unwrap_or_else(|| data_dir.join("logs"));

        let log_level = log_level_env
            .and_then(|value| logging::normalize_level(&value).ok())
            .unwrap_or_else(logging::default_log_level);

        Self {
            data_dir,
            log_dir,
            log_level,
        }
    }
}
