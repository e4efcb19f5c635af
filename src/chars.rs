//! Character splitting for ruby placement.
//!
//! `split_characters` and `align` are a matched pair: the count handed to the
//! aligner must come from the same filtered split that the glyphs are drawn
//! from, otherwise syllables land over the wrong characters.

use serde::Serialize;

use crate::align::{align_detailed, Strategy};

/// One glyph with the syllable rendered above it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RubyPair {
  pub character: String,
  pub syllable: String,
}

/// One entry per codepoint, whitespace (incl. U+3000 ideographic space) removed.
pub fn split_characters(text: &str) -> Vec<String> {
  text
    .chars()
    .filter(|c| !is_layout_space(*c))
    .map(String::from)
    .collect()
}

#[allow(dead_code)]
pub fn character_count(text: &str) -> usize {
  text.chars().filter(|c| !is_layout_space(*c)).count()
}

/// Split `text`, align `pinyin` to it and zip the two.
pub fn zip_ruby(text: &str, pinyin: &str) -> (Vec<RubyPair>, Strategy) {
  let characters = split_characters(text);
  let alignment = align_detailed(pinyin, characters.len());
  let ruby = characters
    .into_iter()
    .zip(alignment.syllables)
    .map(|(character, syllable)| RubyPair { character, syllable })
    .collect();
  (ruby, alignment.strategy)
}

/// Unicode White_Space, which includes U+3000 ideographic space.
fn is_layout_space(c: char) -> bool {
  c.is_whitespace()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ascii_and_ideographic_spaces_are_dropped() {
    assert_eq!(split_characters("神 愛"), vec!["神", "愛"]);
    assert_eq!(split_characters("神\u{3000}愛"), vec!["神", "愛"]);
    assert_eq!(character_count(" 神\t愛\n世人 "), 4);
  }

  #[test]
  fn punctuation_and_latin_count_as_characters() {
    assert_eq!(split_characters("神，A"), vec!["神", "，", "A"]);
  }

  #[test]
  fn empty_text_has_no_characters() {
    assert!(split_characters("").is_empty());
    assert!(split_characters("\u{3000} ").is_empty());
  }

  #[test]
  fn ruby_pairs_follow_character_order() {
    let (pairs, strategy) = zip_ruby("福\u{3000}音", "fúyīn");
    assert_eq!(strategy, Strategy::Phonetic);
    assert_eq!(
      pairs,
      vec![
        RubyPair { character: "福".into(), syllable: "fú".into() },
        RubyPair { character: "音".into(), syllable: "yīn".into() },
      ]
    );
  }

  #[test]
  fn ruby_pairs_cover_every_character_even_without_pinyin() {
    let (pairs, _) = zip_ruby("耶穌基督", "");
    assert_eq!(pairs.len(), 4);
    assert!(pairs.iter().all(|p| p.syllable.is_empty()));
  }
}
