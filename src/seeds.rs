//! Built-in content so the reader is useful without a content directory.

use crate::domain::{Chapter, Verse, Word};
use crate::proficiency::FrequencyTag;

fn word(
  chinese: &str,
  pinyin: Option<&str>,
  definition: &str,
  hsk: Option<u8>,
  freq: Option<FrequencyTag>,
) -> Word {
  Word {
    chinese: chinese.into(),
    pinyin: pinyin.map(String::from),
    definition: (!definition.is_empty()).then(|| definition.to_string()),
    hsk,
    tocfl: None,
    freq,
  }
}

/// John 3:16–17. Pinyin deliberately mixes the delimiter conventions seen upstream.
pub fn seed_chapters() -> Vec<Chapter> {
  use FrequencyTag::*;

  vec![Chapter {
    book: "john".into(),
    chapter: 3,
    verses: vec![
      Verse {
        verse: 16,
        text: "神爱世人，甚至将他的独生子赐给他们，叫一切信他的，不至灭亡，反得永生。".into(),
        english: "For God so loved the world, that he gave his only begotten Son, that whosoever believeth in him should not perish, but have everlasting life.".into(),
        words: vec![
          word("神", Some("Shén"), "God", None, Some(Biblical)),
          word("爱", Some("ài"), "to love", Some(1), Some(Common)),
          word("世人", Some("shì rén"), "people of the world", Some(6), Some(Uncommon)),
          word("，", None, "", None, None),
          word("甚至", Some("shènzhì"), "even; so much that", Some(4), Some(Common)),
          word("将", Some("jiāng"), "(object marker)", Some(5), None),
          word("他的", Some("tā de"), "his", Some(1), Some(Common)),
          word("独生子", Some("dúshēngzǐ"), "only son", None, Some(Biblical)),
          word("赐给", Some("cì gěi"), "to bestow upon", None, Some(Rare)),
          word("他们", Some("tāmen"), "them", Some(1), Some(Common)),
          word("，", None, "", None, None),
          word("叫", Some("jiào"), "so that", Some(1), Some(Common)),
          word("一切", Some("yīqiè"), "all; every", Some(4), Some(Common)),
          word("信", Some("xìn"), "to believe", Some(4), Some(Common)),
          word("他的", Some("tā de"), "in him", Some(1), Some(Common)),
          word("，", None, "", None, None),
          word("不至", Some("bù zhì"), "not come to", None, Some(Uncommon)),
          word("灭亡", Some("mièwáng"), "to perish", Some(6), Some(Rare)),
          word("，", None, "", None, None),
          word("反", Some("fǎn"), "but rather", Some(5), None),
          word("得", Some("dé"), "to obtain", Some(2), Some(Common)),
          word("永生", Some("yǒng'shēng"), "eternal life", None, Some(Biblical)),
          word("。", None, "", None, None),
        ],
      },
      Verse {
        verse: 17,
        text: "因为神差他的儿子降世，不是要定世人的罪，乃是要叫世人因他得救。".into(),
        english: "For God sent not his Son into the world to condemn the world; but that the world through him might be saved.".into(),
        words: vec![
          word("因为", Some("yīnwèi"), "because", Some(2), Some(Common)),
          word("神", Some("Shén"), "God", None, Some(Biblical)),
          word("差", Some("chāi"), "to send", Some(3), None),
          word("他的", Some("tā de"), "his", Some(1), Some(Common)),
          word("儿子", Some("érzi"), "son", Some(1), Some(Common)),
          word("降世", None, "to come into the world", None, Some(Biblical)),
          word("，", None, "", None, None),
          word("不是", Some("bú shì"), "not", Some(1), Some(Common)),
          word("要", Some("yào"), "to intend", Some(2), Some(Common)),
          word("定", Some("dìng"), "to decide", Some(3), None),
          word("世人", Some("shì rén"), "people of the world", Some(6), Some(Uncommon)),
          word("的", Some("de"), "(possessive)", Some(1), Some(Common)),
          word("罪", Some("zuì"), "sin; guilt", Some(6), Some(Biblical)),
          word("，", None, "", None, None),
          word("乃是", Some("nǎishì"), "but rather", None, Some(Rare)),
          word("要", Some("yào"), "to intend", Some(2), Some(Common)),
          word("叫", Some("jiào"), "so that", Some(1), Some(Common)),
          word("世人", Some("shì rén"), "people of the world", Some(6), Some(Uncommon)),
          word("因", Some("yīn"), "through", Some(4), None),
          word("他", Some("tā"), "him", Some(1), Some(Common)),
          word("得救", Some("déjiù"), "to be saved", None, Some(Biblical)),
          word("。", None, "", None, None),
        ],
      },
    ],
  }]
}
