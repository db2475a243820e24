//! Aligns a word with its reading and emits the `word[reading]` annotation.

use crate::compound::break_compound_furigana;
use crate::kana::kana_equivalent;

/// Converts `(word, reading)` into annotated text such as ` 食[た]べた`.
///
/// Kana shared at the start or end of both strings stays outside the
/// brackets, copied from `word`. A single space always precedes the
/// annotated part. The reading is expected to be at least as long as the
/// word. A word that spells out its own reading is returned unchanged.
///
/// ```
/// use furigana_rs::format_output;
///
/// assert_eq!(format_output("サイン会", "さいんかい"), "サイン 会[かい]");
/// assert_eq!(format_output("取って置き", "とっておき"), " 取[と]って 置[お]き");
/// ```
pub fn format_output(word: &str, reading: &str) -> String {
    let word_chars: Vec<char> = word.chars().collect();
    let reading_chars: Vec<char> = reading.chars().collect();
    let word_len = word_chars.len();
    let reading_len = reading_chars.len();

    if word_len == 0 || reading_len == 0 {
        return word.to_string();
    }
    if word_len == reading_len
        && word_chars
            .iter()
            .zip(&reading_chars)
            .all(|(left, right)| kana_equivalent(*left, *right))
    {
        return word.to_string();
    }

    let mut suffix_len = (1..word_len)
        .take_while(|&offset| {
            offset <= reading_len
                && kana_equivalent(
                    word_chars[word_len - offset],
                    reading_chars[reading_len - offset],
                )
        })
        .count();
    let prefix_len = (0..word_len - 1)
        .take_while(|&index| {
            index < reading_len && kana_equivalent(word_chars[index], reading_chars[index])
        })
        .count();

    // The annotated core keeps at least one character of the word.
    if prefix_len + suffix_len >= word_len {
        suffix_len = word_len - 1 - prefix_len;
    }
    if prefix_len + suffix_len >= reading_len {
        return break_compound_furigana(&format!(" {word}[{reading}]"));
    }

    let prefix: String = word_chars[..prefix_len].iter().collect();
    let head: String = word_chars[prefix_len..word_len - suffix_len].iter().collect();
    let head_reading: String = reading_chars[prefix_len..reading_len - suffix_len]
        .iter()
        .collect();
    let suffix: String = word_chars[word_len - suffix_len..].iter().collect();

    break_compound_furigana(&format!("{prefix} {head}[{head_reading}]{suffix}"))
}
