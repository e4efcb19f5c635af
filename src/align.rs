//! Pinyin → per-character syllable alignment.
//!
//! Upstream content carries one pinyin string per word, written in whatever
//! convention the author (or the LLM) chose: apostrophes (`xī'ān`), spaces
//! (`Yēsū Jīdū`), fully concatenated (`fúyīn`) or capitalized proper nouns
//! (`YēsūJīdū`). The reader needs exactly one syllable per rendered Han
//! character, so alignment walks an ordered chain of tiers and keeps the first
//! one whose output length matches the character count.
//!
//! The chain never fails. The last tier slices the string proportionally, so
//! the length contract holds for any input, however malformed.
//!
//! Example:
//!   align("fúyīn", 2)      == ["fú", "yīn"]
//!   align("Yēsūjī", 2)     == ["Yē", "sūjī"]

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::trace;

/// Optional initial (longest digraphs first), vowel nucleus incl. all four
/// tone-marked forms, optional nasal/retroflex coda, optional tone digit.
const PHONETIC_SYLLABLE_PATTERN: &str = concat!(
  "(?i)",
  "(?:zh|ch|sh|[bpmfdtnlgkhjqxrzcsyw])?",
  "[aeiouüāáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜ]+",
  "(?:ng|n|r)?",
  "[1-4]?",
);

static PHONETIC_SYLLABLE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(PHONETIC_SYLLABLE_PATTERN).expect("pinyin syllable pattern compiles"));

static DEFAULT_ALIGNER: PinyinAligner = PinyinAligner::new();

/// ASCII apostrophe plus the typographic one LLM output likes to emit.
const APOSTROPHES: [char; 2] = ['\'', '\u{2019}'];

/// Which tier of the chain produced an alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
  Trivial,
  Apostrophe,
  Whitespace,
  Phonetic,
  Merged,
  Capitalization,
  Proportional,
  Padded,
}

impl Strategy {
  pub fn as_str(self) -> &'static str {
    match self {
      Strategy::Trivial => "trivial",
      Strategy::Apostrophe => "apostrophe",
      Strategy::Whitespace => "whitespace",
      Strategy::Phonetic => "phonetic",
      Strategy::Merged => "merged",
      Strategy::Capitalization => "capitalization",
      Strategy::Proportional => "proportional",
      Strategy::Padded => "padded",
    }
  }
}

impl std::fmt::Display for Strategy {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Syllables (one per character) plus the tier that produced them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alignment {
  pub syllables: Vec<String>,
  pub strategy: Strategy,
}

/// Tokenizes a delimiter-free pinyin run into candidate syllables.
///
/// The phonetic tier and the merge tier both read from this, so a stricter
/// tokenizer (e.g. a finite-state one backed by the full syllable table) can
/// be swapped in without touching the chain.
pub trait SyllableScanner {
  fn scan(&self, text: &str) -> Vec<String>;
}

/// Regex-driven scanner: greedy, left-to-right, non-overlapping.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhoneticScanner;

impl SyllableScanner for PhoneticScanner {
  fn scan(&self, text: &str) -> Vec<String> {
    let normalized = text.replace(APOSTROPHES, " ");
    PHONETIC_SYLLABLE
      .find_iter(&normalized)
      .map(|m| m.as_str().to_string())
      .collect()
  }
}

type Tier = fn(&dyn SyllableScanner, &str, usize) -> Option<Vec<String>>;

/// Attempted in order on the trimmed input; the first `Some` wins.
const TIERS: [(Strategy, Tier); 6] = [
  (Strategy::Apostrophe, by_apostrophes),
  (Strategy::Whitespace, by_whitespace),
  (Strategy::Phonetic, by_phonetic_scan),
  (Strategy::Merged, by_merging_scan),
  (Strategy::Capitalization, by_capitals),
  (Strategy::Proportional, by_proportion),
];

#[derive(Clone, Copy, Debug, Default)]
pub struct PinyinAligner<S = PhoneticScanner> {
  scanner: S,
}

impl PinyinAligner<PhoneticScanner> {
  pub const fn new() -> Self {
    Self { scanner: PhoneticScanner }
  }
}

impl<S: SyllableScanner> PinyinAligner<S> {
  #[allow(dead_code)]
  pub fn with_scanner(scanner: S) -> Self {
    Self { scanner }
  }

  /// `count` syllables for `pinyin`, always exactly `count` long.
  #[allow(dead_code)]
  pub fn align(&self, pinyin: &str, count: usize) -> Vec<String> {
    self.align_detailed(pinyin, count).syllables
  }

  pub fn align_detailed(&self, pinyin: &str, count: usize) -> Alignment {
    let text = pinyin.trim();

    if count == 0 {
      return Alignment { syllables: Vec::new(), strategy: Strategy::Trivial };
    }
    if text.is_empty() {
      return Alignment { syllables: vec![String::new(); count], strategy: Strategy::Trivial };
    }
    if count == 1 {
      return Alignment { syllables: vec![text.to_string()], strategy: Strategy::Trivial };
    }

    for (strategy, tier) in TIERS {
      if let Some(syllables) = tier(&self.scanner, text, count) {
        if syllables.len() == count {
          trace!(target: "reader", %strategy, count, "pinyin aligned");
          return Alignment { syllables, strategy };
        }
      }
    }

    // Unreachable while the proportional tier holds its contract.
    let mut syllables = vec![String::new(); count];
    syllables[0] = pinyin.to_string();
    Alignment { syllables, strategy: Strategy::Padded }
  }
}

/// Align with the default regex scanner.
#[allow(dead_code)]
pub fn align(pinyin: &str, count: usize) -> Vec<String> {
  DEFAULT_ALIGNER.align(pinyin, count)
}

/// Same as [`align`], keeping the tier that produced the result.
pub fn align_detailed(pinyin: &str, count: usize) -> Alignment {
  DEFAULT_ALIGNER.align_detailed(pinyin, count)
}

fn exact(pieces: Vec<String>, count: usize) -> Option<Vec<String>> {
  (pieces.len() == count).then_some(pieces)
}

fn by_apostrophes(_: &dyn SyllableScanner, text: &str, count: usize) -> Option<Vec<String>> {
  if !text.contains(APOSTROPHES) {
    return None;
  }
  let pieces = text
    .split(APOSTROPHES)
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .map(String::from)
    .collect();
  exact(pieces, count)
}

fn by_whitespace(_: &dyn SyllableScanner, text: &str, count: usize) -> Option<Vec<String>> {
  exact(text.split_whitespace().map(String::from).collect(), count)
}

fn by_phonetic_scan(scanner: &dyn SyllableScanner, text: &str, count: usize) -> Option<Vec<String>> {
  exact(scanner.scan(text), count)
}

/// Over-split scans are folded back into `count` ordered buckets:
/// slot `i` takes matches `[i*m/n, (i+1)*m/n)` (floored).
fn by_merging_scan(scanner: &dyn SyllableScanner, text: &str, count: usize) -> Option<Vec<String>> {
  let matches = scanner.scan(text);
  if matches.len() <= count {
    return None;
  }
  let total = matches.len();
  let merged = (0..count)
    .map(|i| {
      let start = i * total / count;
      let end = (i + 1) * total / count;
      matches[start..end].concat()
    })
    .collect();
  Some(merged)
}

/// Each uppercase letter after the first position of a word opens a syllable.
fn by_capitals(_: &dyn SyllableScanner, text: &str, count: usize) -> Option<Vec<String>> {
  let mut pieces = Vec::new();
  for word in text.split_whitespace() {
    let mut current = String::new();
    for (idx, ch) in word.chars().enumerate() {
      if idx > 0 && ch.is_uppercase() && !current.is_empty() {
        pieces.push(std::mem::take(&mut current));
      }
      current.push(ch);
    }
    if !current.is_empty() {
      pieces.push(current);
    }
  }
  exact(pieces, count)
}

/// Character-offset slicing; the last slot absorbs the rounding remainder.
fn by_proportion(_: &dyn SyllableScanner, text: &str, count: usize) -> Option<Vec<String>> {
  let chars: Vec<char> = text.chars().collect();
  let len = chars.len();
  let avg = len as f64 / count as f64;
  let slices = (0..count)
    .map(|i| {
      let start = ((i as f64 * avg).round() as usize).min(len);
      let end = if i + 1 == count {
        len
      } else {
        (((i + 1) as f64 * avg).round() as usize).clamp(start, len)
      };
      chars[start..end].iter().collect()
    })
    .collect();
  Some(slices)
}

#[cfg(test)]
mod tests {
  use super::*;
  use super::Strategy;
  use proptest::prelude::*;

  fn owned(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn zero_count_is_empty() {
    assert!(align("nǐ hǎo", 0).is_empty());
    assert!(align("", 0).is_empty());
  }

  #[test]
  fn empty_pinyin_yields_blank_slots() {
    assert_eq!(align("", 3), owned(&["", "", ""]));
    assert_eq!(align_detailed("   ", 2).strategy, Strategy::Trivial);
    assert_eq!(align("   ", 2), owned(&["", ""]));
  }

  #[test]
  fn single_character_keeps_trimmed_input() {
    assert_eq!(align("  Shén ", 1), owned(&["Shén"]));
    assert_eq!(align("zhōng guó", 1), owned(&["zhōng guó"]));
  }

  #[test]
  fn apostrophes_split_exactly() {
    let a = align_detailed("nǐ'hǎo", 2);
    assert_eq!(a.syllables, owned(&["nǐ", "hǎo"]));
    assert_eq!(a.strategy, Strategy::Apostrophe);
    assert_eq!(align("Xī\u{2019}ān", 2), owned(&["Xī", "ān"]));
  }

  #[test]
  fn whitespace_splits_exactly() {
    let a = align_detailed("Yēsū Jīdū", 2);
    assert_eq!(a.syllables, owned(&["Yēsū", "Jīdū"]));
    assert_eq!(a.strategy, Strategy::Whitespace);
  }

  #[test]
  fn concatenated_syllables_use_phonetic_scan() {
    let a = align_detailed("fúyīn", 2);
    assert_eq!(a.syllables, owned(&["fú", "yīn"]));
    assert_eq!(a.strategy, Strategy::Phonetic);
    assert_eq!(align("Zhōngguó", 2), owned(&["Zhōng", "guó"]));
    assert_eq!(align("Yēhéhuá", 3), owned(&["Yē", "hé", "huá"]));
    assert_eq!(align("shang4di4", 2), owned(&["shang4", "di4"]));
  }

  #[test]
  fn apostrophe_miscount_falls_back_to_scan() {
    // Two apostrophe pieces, three characters.
    assert_eq!(align("Yē'sūjī", 3), owned(&["Yē", "sū", "jī"]));
  }

  #[test]
  fn over_split_scan_merges_in_order() {
    let a = align_detailed("Yēsūjī", 2);
    assert_eq!(a.syllables, owned(&["Yē", "sūjī"]));
    assert_eq!(a.strategy, Strategy::Merged);

    // 5 matches into 2 slots: [0, 2) and [2, 5).
    assert_eq!(align("yēsūjīdūmā", 2), owned(&["yēsū", "jīdūmā"]));
  }

  #[test]
  fn capitals_mark_syllable_starts_when_scan_undercounts() {
    // Vowel-less interjections never match the phonetic pattern.
    let a = align_detailed("HmNg", 2);
    assert_eq!(a.syllables, owned(&["Hm", "Ng"]));
    assert_eq!(a.strategy, Strategy::Capitalization);
  }

  #[test]
  fn proportional_slicing_is_last_resort() {
    let a = align_detailed("abcdef", 4);
    assert_eq!(a.syllables, owned(&["ab", "c", "de", "f"]));
    assert_eq!(a.strategy, Strategy::Proportional);
    assert_eq!(align("12345", 3), owned(&["12", "3", "45"]));
  }

  #[test]
  fn more_characters_than_letters_leaves_blanks() {
    assert_eq!(align("ab", 4), owned(&["a", "", "b", ""]));
  }

  #[test]
  fn adversarial_input_does_not_panic() {
    for input in ["🙏🙏🙏", "''''", "1234", "ā", "\u{3000}", "a' 'b", "ZZZZZZ"] {
      for count in 0..8 {
        assert_eq!(align(input, count).len(), count, "input {input:?} count {count}");
      }
    }
  }

  struct WholeWordScanner;

  impl SyllableScanner for WholeWordScanner {
    fn scan(&self, text: &str) -> Vec<String> {
      text.chars().map(String::from).collect()
    }
  }

  #[test]
  fn scanner_is_replaceable() {
    let aligner = PinyinAligner::with_scanner(WholeWordScanner);
    let a = aligner.align_detailed("abc", 3);
    assert_eq!(a.syllables, owned(&["a", "b", "c"]));
    assert_eq!(a.strategy, Strategy::Phonetic);
  }

  proptest! {
    #[test]
    fn length_always_matches_count(s in "\\PC{0,40}", count in 0usize..24) {
      prop_assert_eq!(align(&s, count).len(), count);
    }

    #[test]
    fn pinyin_like_length_always_matches(s in "[a-zA-Zāáǎàēéěèīíǐìōóǒòūúǔùü' 1-4]{0,40}", count in 0usize..16) {
      prop_assert_eq!(align(&s, count).len(), count);
    }

    #[test]
    fn single_slot_is_identity(s in "\\PC{1,40}") {
      prop_assume!(!s.trim().is_empty());
      prop_assert_eq!(align(&s, 1), vec![s.trim().to_string()]);
    }

    #[test]
    fn merged_output_preserves_scan_order(s in "[bdgjmnst][aeiou]{1,2}([bdgjmnst][aeiou]{1,2}){2,8}", count in 2usize..4) {
      let scanned = PhoneticScanner.scan(&s);
      prop_assume!(scanned.len() > count);
      let merged = align(&s, count);
      prop_assert_eq!(merged.concat(), scanned.concat());
    }
  }
}
