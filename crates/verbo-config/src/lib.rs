use serde::{Deserialize, Serialize};

use self::data::DataConfig;
use self::drill::DrillConfig;
use self::log::LogConfig;

pub mod data;
pub mod drill;
pub mod log;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub drill: DrillConfig,
    pub log: LogConfig,
}

impl Config {
    /// Defaults, with environment variables taking precedence
    pub fn new() -> Self {
        Config {
            data: DataConfig::new(),
            drill: DrillConfig::new(),
            log: LogConfig::new(),
        }
    }
}
