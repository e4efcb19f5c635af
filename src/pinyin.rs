//! Default Hanzi → Hanyu Pinyin readings for words the content pipeline left bare.
//!
//! Example:
//!   输入: "神爱世人！"
//!   输出: "shén ài shì rén ！"
use pinyin::ToPinyin;

/// One space-separated token per non-whitespace character, so the result
/// aligns on the whitespace tier. Non-Han characters are copied as their own token.
///
/// Readings are per character (no word context), so polyphonic characters
/// get the dictionary default.
pub fn default_reading(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);

    for ch in text.chars().filter(|c| !c.is_whitespace()) {
        if !out.is_empty() {
            out.push(' ');
        }
        match ch.to_pinyin() {
            Some(py) => out.push_str(py.with_tone()),
            None => out.push(ch),
        }
    }

    out
}
