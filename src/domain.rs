//! Content models: chapters of pre-segmented verses as produced by the offline pipeline,
//! plus the annotated shapes served to the reader.

use serde::{Deserialize, Serialize};

use crate::align::Strategy;
use crate::chars::RubyPair;
use crate::proficiency::{FrequencyTag, ReadingLevel, WordProficiency};

/// One segmented word inside a verse.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Word {
  pub chinese: String,
  /// Any delimiter convention; may be missing for punctuation or unreviewed content.
  #[serde(default)] pub pinyin: Option<String>,
  #[serde(default)] pub definition: Option<String>,
  #[serde(default)] pub hsk: Option<u8>,
  #[serde(default)] pub tocfl: Option<u8>,
  #[serde(default)] pub freq: Option<FrequencyTag>,
}

impl Word {
  pub fn proficiency(&self) -> WordProficiency {
    WordProficiency { hsk: self.hsk, tocfl: self.tocfl, freq: self.freq }
  }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Verse {
  pub verse: u32,
  /// Full Chinese verse text.
  pub text: String,
  #[serde(default)] pub english: String,
  #[serde(default)] pub words: Vec<Word>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Chapter {
  /// Lowercase book slug, e.g. "john".
  pub book: String,
  pub chapter: u32,
  #[serde(default)] pub verses: Vec<Verse>,
}

impl Chapter {
  pub fn key(&self) -> ChapterKey {
    ChapterKey::new(&self.book, self.chapter)
  }
}

/// Store key; book slugs compare case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ChapterKey {
  pub book: String,
  pub chapter: u32,
}

impl ChapterKey {
  pub fn new(book: &str, chapter: u32) -> Self {
    Self { book: book.trim().to_lowercase(), chapter }
  }
}

impl std::fmt::Display for ChapterKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.book, self.chapter)
  }
}

/// A word ready for ruby rendering.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnnotatedWord {
  pub chinese: String,
  pub pinyin: String,
  pub definition: Option<String>,
  pub show_pinyin: bool,
  /// Whether `pinyin` was derived locally rather than supplied by the content.
  pub derived_pinyin: bool,
  pub strategy: Strategy,
  pub ruby: Vec<RubyPair>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnnotatedVerse {
  pub verse: u32,
  pub text: String,
  pub english: String,
  pub words: Vec<AnnotatedWord>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AnnotatedChapter {
  pub book: String,
  pub chapter: u32,
  pub level: ReadingLevel,
  pub verses: Vec<AnnotatedVerse>,
}
