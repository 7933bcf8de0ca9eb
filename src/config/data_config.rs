//! Data source location.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct DataEnvConfig {
    pub data_dir: PathBuf,
}

impl Default for DataEnvConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl DataEnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("PITWALL_DATA_DIR").filter(|dir| !dir.trim().is_empty()) {
            Some(dir) => Self {
                data_dir: PathBuf::from(dir),
            },
            None => Self::default(),
        }
    }
}
