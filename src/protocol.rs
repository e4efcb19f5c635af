//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::align::Strategy;
use crate::domain::{AnnotatedChapter, AnnotatedWord, ChapterKey, Word};
use crate::proficiency::{FrequencyTag, ReadingLevel, WordProficiency};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Align(AlignIn),
    Split(SplitIn),
    Visibility(VisibilityIn),
    Annotate(AnnotateIn),
    Chapter {
        book: String,
        chapter: u32,
        #[serde(default)]
        level: Option<ReadingLevel>,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Aligned(AlignOut),
    Split(SplitOut),
    Visibility(VisibilityOut),
    Annotated(AnnotatedWord),
    Chapter(AnnotatedChapter),
    Error { message: String },
}

//
// HTTP request/response DTOs (also embedded in WS messages)
//

/// Upper bound on an explicit `count`; no verse word comes close.
pub const MAX_ALIGN_COUNT: usize = 4096;

/// Either `text` (its filtered character count is used) or an explicit `count`.
#[derive(Debug, Deserialize)]
pub struct AlignIn {
    pub pinyin: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AlignRequestError {
    #[error("count {count} exceeds the maximum of {max}")]
    CountTooLarge { count: usize, max: usize },
}

impl AlignIn {
    /// Explicit count, rejected above `MAX_ALIGN_COUNT`.
    pub fn checked_count(&self) -> Result<usize, AlignRequestError> {
        match self.count.unwrap_or(0) {
            count if count > MAX_ALIGN_COUNT => {
                Err(AlignRequestError::CountTooLarge { count, max: MAX_ALIGN_COUNT })
            }
            count => Ok(count),
        }
    }
}
#[derive(Debug, Serialize)]
pub struct AlignOut {
    pub syllables: Vec<String>,
    pub strategy: Strategy,
    /// Present when the request carried `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct SplitIn {
    pub text: String,
}
#[derive(Debug, Serialize)]
pub struct SplitOut {
    pub characters: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisibilityIn {
    #[serde(default)]
    pub level: Option<ReadingLevel>,
    #[serde(flatten)]
    pub word: WordProficiency,
}
#[derive(Debug, Serialize)]
pub struct VisibilityOut {
    pub level: ReadingLevel,
    pub show: bool,
}

#[derive(Debug, Deserialize)]
pub struct AnnotateIn {
    pub chinese: String,
    #[serde(default)]
    pub pinyin: Option<String>,
    #[serde(default)]
    pub definition: Option<String>,
    #[serde(default)]
    pub level: Option<ReadingLevel>,
    #[serde(default)]
    pub hsk: Option<u8>,
    #[serde(default)]
    pub tocfl: Option<u8>,
    #[serde(default)]
    pub freq: Option<FrequencyTag>,
}

impl AnnotateIn {
    pub fn to_word(&self) -> Word {
        Word {
            chinese: self.chinese.clone(),
            pinyin: self.pinyin.clone(),
            definition: self.definition.clone(),
            hsk: self.hsk,
            tocfl: self.tocfl,
            freq: self.freq,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChapterQuery {
    pub level: Option<ReadingLevel>,
}

#[derive(Debug, Serialize)]
pub struct ChapterSummary {
    pub book: String,
    pub chapter: u32,
    pub verses: usize,
}

impl ChapterSummary {
    pub fn new(key: ChapterKey, verses: usize) -> Self {
        Self { book: key.book, chapter: key.chapter, verses }
    }
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
