//! Loading per-chapter JSON written by the offline segmentation pipeline.
//!
//! A missing or unreadable directory is an error. Individual bad files are
//! logged and skipped so one malformed chapter does not take the reader down.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Chapter;

#[derive(Debug, Error)]
pub enum ContentError {
  #[error("content directory {}: {source}", path.display())]
  Dir { path: PathBuf, source: std::io::Error },
  #[error("reading {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },
  #[error("parsing {}: {source}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },
}

pub fn load_chapter(path: &Path) -> Result<Chapter, ContentError> {
  let raw = std::fs::read_to_string(path)
    .map_err(|source| ContentError::Read { path: path.to_path_buf(), source })?;
  serde_json::from_str::<Chapter>(&raw)
    .map_err(|source| ContentError::Parse { path: path.to_path_buf(), source })
}

/// Every `*.json` chapter in `dir`, sorted by book then chapter.
pub fn load_dir(dir: &Path) -> Result<Vec<Chapter>, ContentError> {
  let entries = std::fs::read_dir(dir)
    .map_err(|source| ContentError::Dir { path: dir.to_path_buf(), source })?;

  let mut chapters = Vec::new();
  for entry in entries {
    let path = match entry {
      Ok(e) => e.path(),
      Err(e) => {
        warn!(target: "reader", dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
        continue;
      }
    };
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
      continue;
    }
    match load_chapter(&path) {
      Ok(ch) => {
        debug!(target: "reader", path = %path.display(), key = %ch.key(), verses = ch.verses.len(), "Loaded chapter");
        chapters.push(ch);
      }
      Err(e) => warn!(target: "reader", error = %e, "Skipping chapter file"),
    }
  }

  chapters.sort_by_key(|c| c.key());
  Ok(chapters)
}
