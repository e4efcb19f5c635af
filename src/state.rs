//! Application state: the in-memory chapter store and the display policy.
//!
//! This module owns:
//!   - chapters keyed by (book, chapter)
//!   - the per-level thresholds and default reading level (from TOML or defaults)
//!
//! Content comes from the configured directory when it loads, otherwise from
//! the built-in seeds. Seeds never overwrite loaded chapters.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::config::{load_reader_config_from_env, ReaderConfig};
use crate::content;
use crate::domain::{Chapter, ChapterKey};
use crate::proficiency::{LevelThresholds, ReadingLevel};
use crate::seeds::seed_chapters;

#[derive(Clone)]
pub struct AppState {
    pub chapters: Arc<RwLock<HashMap<ChapterKey, Chapter>>>,
    pub thresholds: LevelThresholds,
    pub default_level: ReadingLevel,
}

impl AppState {
    /// Build state from env: load config, then content, then seeds.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let cfg = load_reader_config_from_env().unwrap_or_default();
        Self::from_config(&cfg)
    }

    #[instrument(level = "info", skip_all)]
    pub fn from_config(cfg: &ReaderConfig) -> Self {
        let mut by_key = HashMap::<ChapterKey, Chapter>::new();

        if let Some(dir) = &cfg.content_dir {
            match content::load_dir(dir) {
                Ok(chapters) => {
                    for ch in chapters {
                        by_key.insert(ch.key(), ch);
                    }
                }
                Err(e) => {
                    error!(target: "reader", error = %e, "Content directory unavailable; serving seeds only");
                }
            }
        }

        for ch in seed_chapters() {
            by_key.entry(ch.key()).or_insert(ch);
        }

        // Inventory summary by book.
        let mut count_by_book: HashMap<&str, (usize, usize)> = HashMap::new();
        for ch in by_key.values() {
            let entry = count_by_book.entry(ch.book.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += ch.verses.len();
        }
        for (book, (chapters, verses)) in count_by_book {
            info!(target: "reader", %book, chapters, verses, "Startup content inventory");
        }

        Self {
            chapters: Arc::new(RwLock::new(by_key)),
            thresholds: cfg.thresholds,
            default_level: cfg.default_level,
        }
    }

    #[allow(dead_code)]
    #[instrument(level = "debug", skip(self, ch), fields(key = %ch.key()))]
    pub async fn insert_chapter(&self, ch: Chapter) {
        self.chapters.write().await.insert(ch.key(), ch);
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn get_chapter(&self, book: &str, chapter: u32) -> Option<Chapter> {
        let key = ChapterKey::new(book, chapter);
        self.chapters.read().await.get(&key).cloned()
    }

    /// Sorted (key, verse count) listing.
    pub async fn list_chapters(&self) -> Vec<(ChapterKey, usize)> {
        let chapters = self.chapters.read().await;
        let mut out: Vec<_> = chapters.iter().map(|(k, c)| (k.clone(), c.verses.len())).collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    pub fn level_or_default(&self, level: Option<ReadingLevel>) -> ReadingLevel {
        level.unwrap_or(self.default_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Verse;

    #[tokio::test]
    async fn seeds_are_available_without_content_dir() {
        let state = AppState::from_config(&ReaderConfig::default());
        let ch = state.get_chapter("John", 3).await.expect("seeded");
        assert_eq!(ch.verses[0].verse, 16);
        assert!(state.get_chapter("john", 4).await.is_none());
    }

    #[tokio::test]
    async fn missing_content_dir_falls_back_to_seeds() {
        let cfg = ReaderConfig { content_dir: Some("/definitely/not/here".into()), ..Default::default() };
        let state = AppState::from_config(&cfg);
        assert_eq!(state.list_chapters().await.len(), 1);
    }

    #[tokio::test]
    async fn loaded_content_wins_over_seeds() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("john-3.json"),
            r#"{"book":"john","chapter":3,"verses":[{"verse":1,"text":"有一个法利赛人"}]}"#,
        )
        .expect("write");
        let cfg = ReaderConfig { content_dir: Some(dir.path().to_path_buf()), ..Default::default() };
        let state = AppState::from_config(&cfg);
        let ch = state.get_chapter("john", 3).await.expect("loaded");
        assert_eq!(ch.verses.len(), 1);
        assert_eq!(ch.verses[0].verse, 1);
    }

    #[tokio::test]
    async fn inserted_chapters_are_listed_in_order() {
        let state = AppState::from_config(&ReaderConfig::default());
        state
            .insert_chapter(Chapter {
                book: "Genesis".into(),
                chapter: 1,
                verses: vec![Verse { verse: 1, text: "起初".into(), english: String::new(), words: vec![] }],
            })
            .await;
        let keys: Vec<String> = state.list_chapters().await.into_iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["genesis 1", "john 3"]);
    }
}
