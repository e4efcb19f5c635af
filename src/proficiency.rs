//! Whether a word still gets its pinyin crutch at the learner's reading level.
//!
//! Two signals are compared against the level's threshold: the numeric level
//! (the higher of HSK/TOCFL) and the frequency tag mapped onto the same 1–6
//! scale. Either one below the threshold hides the pinyin. Words with no
//! signal at all are treated as unfamiliar and keep it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReadingLevel {
  /// Show pinyin on every word.
  #[default]
  BeginnerAll,
  Elementary,
  PreIntermediate,
  Intermediate,
  UpperIntermediate,
  Advanced,
  /// Never show pinyin.
  FluentNone,
}

impl ReadingLevel {
  pub const ALL: [ReadingLevel; 7] = [
    ReadingLevel::BeginnerAll,
    ReadingLevel::Elementary,
    ReadingLevel::PreIntermediate,
    ReadingLevel::Intermediate,
    ReadingLevel::UpperIntermediate,
    ReadingLevel::Advanced,
    ReadingLevel::FluentNone,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      ReadingLevel::BeginnerAll => "beginner_all",
      ReadingLevel::Elementary => "elementary",
      ReadingLevel::PreIntermediate => "pre_intermediate",
      ReadingLevel::Intermediate => "intermediate",
      ReadingLevel::UpperIntermediate => "upper_intermediate",
      ReadingLevel::Advanced => "advanced",
      ReadingLevel::FluentNone => "fluent_none",
    }
  }
}

impl std::fmt::Display for ReadingLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown reading level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for ReadingLevel {
  type Err = UnknownLevel;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_ascii_lowercase();
    ReadingLevel::ALL
      .into_iter()
      .find(|level| level.as_str() == wanted)
      .ok_or_else(|| UnknownLevel(s.to_string()))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyTag {
  Common,
  Uncommon,
  Rare,
  Biblical,
}

impl FrequencyTag {
  /// Position on the shared 1–6 difficulty scale.
  pub fn difficulty(self) -> u8 {
    match self {
      FrequencyTag::Common => 1,
      FrequencyTag::Uncommon => 3,
      FrequencyTag::Biblical => 4,
      FrequencyTag::Rare => 5,
    }
  }
}

/// Proficiency metadata attached to a vocabulary word.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProficiency {
  #[serde(default)] pub hsk: Option<u8>,
  #[serde(default)] pub tocfl: Option<u8>,
  #[serde(default)] pub freq: Option<FrequencyTag>,
}

impl WordProficiency {
  /// Higher of HSK/TOCFL; a level of 0 counts as missing.
  pub fn combined_level(&self) -> Option<u8> {
    let hsk = self.hsk.filter(|l| *l > 0);
    let tocfl = self.tocfl.filter(|l| *l > 0);
    hsk.max(tocfl)
  }
}

/// Per-level threshold: words at or above it are shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelThresholds {
  pub elementary: u8,
  pub pre_intermediate: u8,
  pub intermediate: u8,
  pub upper_intermediate: u8,
  pub advanced: u8,
}

impl Default for LevelThresholds {
  fn default() -> Self {
    Self { elementary: 2, pre_intermediate: 3, intermediate: 4, upper_intermediate: 5, advanced: 6 }
  }
}

impl LevelThresholds {
  /// `None` for the two sentinel levels.
  pub fn threshold(&self, level: ReadingLevel) -> Option<u8> {
    match level {
      ReadingLevel::BeginnerAll | ReadingLevel::FluentNone => None,
      ReadingLevel::Elementary => Some(self.elementary),
      ReadingLevel::PreIntermediate => Some(self.pre_intermediate),
      ReadingLevel::Intermediate => Some(self.intermediate),
      ReadingLevel::UpperIntermediate => Some(self.upper_intermediate),
      ReadingLevel::Advanced => Some(self.advanced),
    }
  }

  pub fn should_show(&self, level: ReadingLevel, word: &WordProficiency) -> bool {
    let threshold = match level {
      ReadingLevel::BeginnerAll => return true,
      ReadingLevel::FluentNone => return false,
      other => match self.threshold(other) {
        Some(t) => t,
        None => return true,
      },
    };

    let known_by_level = word.combined_level().is_some_and(|l| l < threshold);
    let known_by_freq = word.freq.is_some_and(|f| f.difficulty() < threshold);
    !(known_by_level || known_by_freq)
  }
}

/// Display policy with the default thresholds.
#[allow(dead_code)]
pub fn should_show_pinyin(
  level: ReadingLevel,
  hsk: Option<u8>,
  freq: Option<FrequencyTag>,
  tocfl: Option<u8>,
) -> bool {
  LevelThresholds::default().should_show(level, &WordProficiency { hsk, tocfl, freq })
}
