//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Annotating words for ruby display (split → align → display policy)
//!   - Deriving a default reading when content carries no pinyin
//!   - Annotating whole verses and chapters at a reading level

use tracing::{debug, instrument};

use crate::align::align_detailed;
use crate::chars::{split_characters, zip_ruby};
use crate::domain::{AnnotatedChapter, AnnotatedVerse, AnnotatedWord, Chapter, Verse, Word};
use crate::pinyin::default_reading;
use crate::proficiency::{LevelThresholds, ReadingLevel};
use crate::protocol::{AlignIn, AlignOut, AlignRequestError, AnnotateIn, SplitIn, SplitOut, VisibilityIn, VisibilityOut};
use crate::state::AppState;

pub fn annotate_word(word: &Word, level: ReadingLevel, thresholds: &LevelThresholds) -> AnnotatedWord {
  let supplied = word.pinyin.as_deref().map(str::trim).filter(|p| !p.is_empty());
  let (pinyin, derived_pinyin) = match supplied {
    Some(p) => (p.to_string(), false),
    None => (default_reading(&word.chinese), true),
  };

  let (ruby, strategy) = zip_ruby(&word.chinese, &pinyin);
  if derived_pinyin {
    debug!(target: "reader", chinese = %word.chinese, %pinyin, "Derived default reading");
  }

  AnnotatedWord {
    chinese: word.chinese.clone(),
    pinyin,
    definition: word.definition.clone(),
    show_pinyin: thresholds.should_show(level, &word.proficiency()),
    derived_pinyin,
    strategy,
    ruby,
  }
}

pub fn annotate_verse(verse: &Verse, level: ReadingLevel, thresholds: &LevelThresholds) -> AnnotatedVerse {
  AnnotatedVerse {
    verse: verse.verse,
    text: verse.text.clone(),
    english: verse.english.clone(),
    words: verse.words.iter().map(|w| annotate_word(w, level, thresholds)).collect(),
  }
}

pub fn annotate_chapter(chapter: &Chapter, level: ReadingLevel, thresholds: &LevelThresholds) -> AnnotatedChapter {
  AnnotatedChapter {
    book: chapter.book.clone(),
    chapter: chapter.chapter,
    level,
    verses: chapter.verses.iter().map(|v| annotate_verse(v, level, thresholds)).collect(),
  }
}

/// `text` takes precedence over `count`; neither means zero characters.
#[instrument(level = "info", skip(req), fields(pinyin_len = req.pinyin.len()))]
pub fn do_align(req: &AlignIn) -> Result<AlignOut, AlignRequestError> {
  match &req.text {
    Some(text) => {
      let (ruby, strategy) = zip_ruby(text, &req.pinyin);
      let (characters, syllables) = ruby.into_iter().map(|p| (p.character, p.syllable)).unzip();
      Ok(AlignOut { syllables, strategy, characters: Some(characters) })
    }
    None => {
      let alignment = align_detailed(&req.pinyin, req.checked_count()?);
      Ok(AlignOut { syllables: alignment.syllables, strategy: alignment.strategy, characters: None })
    }
  }
}

pub fn do_split(req: &SplitIn) -> SplitOut {
  SplitOut { characters: split_characters(&req.text) }
}

pub fn do_visibility(state: &AppState, req: &VisibilityIn) -> VisibilityOut {
  let level = state.level_or_default(req.level);
  VisibilityOut { level, show: state.thresholds.should_show(level, &req.word) }
}

#[instrument(level = "info", skip(state, req), fields(chinese = %req.chinese))]
pub fn do_annotate(state: &AppState, req: &AnnotateIn) -> AnnotatedWord {
  let level = state.level_or_default(req.level);
  annotate_word(&req.to_word(), level, &state.thresholds)
}

/// Annotated chapter from the store, `None` when unknown.
#[instrument(level = "info", skip(state), fields(%book, chapter))]
pub async fn chapter_at_level(
  state: &AppState,
  book: &str,
  chapter: u32,
  level: Option<ReadingLevel>,
) -> Option<AnnotatedChapter> {
  let level = state.level_or_default(level);
  let ch = state.get_chapter(book, chapter).await?;
  Some(annotate_chapter(&ch, level, &state.thresholds))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::align::Strategy;
  use crate::chars::RubyPair;
  use crate::protocol::MAX_ALIGN_COUNT;
  use crate::proficiency::FrequencyTag;
  use crate::seeds::seed_chapters;

  fn word(chinese: &str, pinyin: Option<&str>, hsk: Option<u8>) -> Word {
    Word {
      chinese: chinese.into(),
      pinyin: pinyin.map(String::from),
      definition: None,
      hsk,
      tocfl: None,
      freq: None,
    }
  }

  #[test]
  fn supplied_pinyin_is_aligned_per_character() {
    let a = annotate_word(&word("福音", Some("fúyīn"), Some(5)), ReadingLevel::Intermediate, &LevelThresholds::default());
    assert!(!a.derived_pinyin);
    assert!(a.show_pinyin);
    assert_eq!(a.strategy, Strategy::Phonetic);
    assert_eq!(
      a.ruby,
      vec![
        RubyPair { character: "福".into(), syllable: "fú".into() },
        RubyPair { character: "音".into(), syllable: "yīn".into() },
      ]
    );
  }

  #[test]
  fn missing_pinyin_is_derived() {
    let a = annotate_word(&word("中国", None, None), ReadingLevel::BeginnerAll, &LevelThresholds::default());
    assert!(a.derived_pinyin);
    assert_eq!(a.pinyin, "zhōng guó");
    assert_eq!(a.strategy, Strategy::Whitespace);
    assert_eq!(a.ruby[1].syllable, "guó");
  }

  #[test]
  fn easy_words_hide_pinyin_at_intermediate() {
    let t = LevelThresholds::default();
    let easy = annotate_word(&word("他们", Some("tāmen"), Some(1)), ReadingLevel::Intermediate, &t);
    assert!(!easy.show_pinyin);
    // Hidden words still carry aligned ruby for tap-to-reveal.
    assert_eq!(easy.ruby.len(), 2);
  }

  #[test]
  fn chapter_annotation_keeps_every_word() {
    let ch = &seed_chapters()[0];
    let a = annotate_chapter(ch, ReadingLevel::Advanced, &LevelThresholds::default());
    assert_eq!(a.verses.len(), ch.verses.len());
    for (av, v) in a.verses.iter().zip(&ch.verses) {
      assert_eq!(av.words.len(), v.words.len());
      for w in &av.words {
        assert_eq!(w.ruby.len(), w.chinese.chars().count());
      }
    }
  }

  #[test]
  fn align_request_prefers_text_over_count() {
    let out = do_align(&AlignIn { pinyin: "Yēsū Jīdū".into(), text: Some("耶穌\u{3000}基督".into()), count: Some(2) })
      .expect("text request");
    assert_eq!(out.syllables.len(), 4);
    assert_eq!(out.characters.as_deref().map(|c| c.len()), Some(4));

    let out = do_align(&AlignIn { pinyin: "Yēsū Jīdū".into(), text: None, count: Some(2) }).expect("count request");
    assert_eq!(out.syllables, vec!["Yēsū", "Jīdū"]);
    assert_eq!(out.strategy, Strategy::Whitespace);
    assert!(out.characters.is_none());
  }

  #[test]
  fn oversized_count_is_rejected_before_allocating() {
    let req = AlignIn { pinyin: "a".into(), text: None, count: Some(usize::MAX) };
    assert_eq!(
      do_align(&req).unwrap_err(),
      AlignRequestError::CountTooLarge { count: usize::MAX, max: MAX_ALIGN_COUNT }
    );

    let at_cap = AlignIn { pinyin: "a".into(), text: None, count: Some(MAX_ALIGN_COUNT) };
    assert_eq!(do_align(&at_cap).expect("at cap").syllables.len(), MAX_ALIGN_COUNT);
  }

  #[test]
  fn annotated_ruby_matches_zip_ruby() {
    let a = annotate_word(&word("耶穌", Some("Yēsū"), None), ReadingLevel::Advanced, &LevelThresholds::default());
    let (ruby, strategy) = zip_ruby("耶穌", "Yēsū");
    assert_eq!(a.ruby, ruby);
    assert_eq!(a.strategy, strategy);
  }

  #[test]
  fn biblical_terms_stay_visible_below_upper_intermediate() {
    let mut w = word("永生", Some("yǒngshēng"), None);
    w.freq = Some(FrequencyTag::Biblical);
    let t = LevelThresholds::default();
    assert!(annotate_word(&w, ReadingLevel::Intermediate, &t).show_pinyin);
    assert!(!annotate_word(&w, ReadingLevel::UpperIntermediate, &t).show_pinyin);
  }
}
