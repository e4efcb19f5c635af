//! Loading reader configuration (content directory + display policy) from TOML.
//!
//! Example:
//!   content_dir = "./content"
//!   default_level = "intermediate"
//!
//!   [thresholds]
//!   intermediate = 4
//!   advanced = 6

use std::path::PathBuf;

use serde::Deserialize;
use tracing::{error, info};

use crate::proficiency::{LevelThresholds, ReadingLevel};

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct ReaderConfig {
  /// Directory of per-chapter JSON files. Built-in seed content only when absent.
  #[serde(default)]
  pub content_dir: Option<PathBuf>,
  /// Level used when a request does not name one.
  #[serde(default)]
  pub default_level: ReadingLevel,
  #[serde(default)]
  pub thresholds: LevelThresholds,
}

pub fn parse_reader_config(s: &str) -> Result<ReaderConfig, toml::de::Error> {
  toml::from_str::<ReaderConfig>(s)
}

/// Attempt to load `ReaderConfig` from READER_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_reader_config_from_env() -> Option<ReaderConfig> {
  let path = std::env::var("READER_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_reader_config(&s) {
      Ok(cfg) => {
        info!(target: "shengjing_backend", %path, default_level = %cfg.default_level, "Loaded reader config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "shengjing_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "shengjing_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
