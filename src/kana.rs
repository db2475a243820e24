//! Kana script conversion, classification and mora segmentation.
//!
//! Hiragana U+3041..=U+3096 and the iteration marks ゝゞ map one-to-one onto
//! katakana U+30A1..=U+30F6 and ヽヾ by a fixed code point offset. Every other
//! character is left untouched by the conversions.

use std::sync::OnceLock;

use regex::Regex;

const SCRIPT_OFFSET: u32 = 0x60;
const LONG_VOWEL_MARK: char = 'ー';

fn is_convertible_hiragana(code: u32) -> bool {
    (0x3041..=0x3096).contains(&code) || (0x309D..=0x309E).contains(&code)
}

fn is_convertible_katakana(code: u32) -> bool {
    (0x30A1..=0x30F6).contains(&code) || (0x30FD..=0x30FE).contains(&code)
}

fn is_voicing_mark(ch: char) -> bool {
    matches!(ch, '\u{3099}' | '\u{309A}')
}

/// Converts one hiragana character to katakana. Other characters are returned as-is.
pub fn hiragana_char_to_katakana(ch: char) -> char {
    let code = ch as u32;
    if is_convertible_hiragana(code) {
        char::from_u32(code + SCRIPT_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

/// Converts one katakana character to hiragana. Other characters are returned as-is.
pub fn katakana_char_to_hiragana(ch: char) -> char {
    let code = ch as u32;
    if is_convertible_katakana(code) {
        char::from_u32(code - SCRIPT_OFFSET).unwrap_or(ch)
    } else {
        ch
    }
}

/// Replaces every hiragana character in `text` with its katakana counterpart.
pub fn to_katakana(text: &str) -> String {
    text.chars().map(hiragana_char_to_katakana).collect()
}

/// Replaces every katakana character in `text` with its hiragana counterpart.
pub fn to_hiragana(text: &str) -> String {
    text.chars().map(katakana_char_to_hiragana).collect()
}

/// Returns `true` for hiragana, katakana, combining voicing marks and `ー`.
pub fn is_kana_char(ch: char) -> bool {
    let code = ch as u32;
    is_convertible_hiragana(code)
        || is_convertible_katakana(code)
        || is_voicing_mark(ch)
        || ch == LONG_VOWEL_MARK
}

/// Returns `true` if every character of `text` is kana.
pub fn is_kana_str(text: &str) -> bool {
    text.chars().all(is_kana_char)
}

/// Folds characters that sound alike so they compare equal.
///
/// Used only to decide whether a word and its reading share a character; the
/// folded value is never written to output.
fn fold_for_match(ch: char) -> char {
    match hiragana_char_to_katakana(ch) {
        'ハ' => 'ワ',
        'ヂ' => 'ジ',
        'ヅ' => 'ズ',
        'ヲ' => 'オ',
        'ヴ' => 'ブ',
        other => other,
    }
}

/// Compares two characters ignoring script and the ハ/ワ, ヂ/ジ, ヅ/ズ, ヲ/オ,
/// ヴ/ブ distinctions.
pub fn kana_equivalent(left: char, right: char) -> bool {
    left == right || fold_for_match(left) == fold_for_match(right)
}

/// Returns the longest non-empty suffix of `word` that is entirely kana.
pub fn longest_kana_suffix(word: &str) -> Option<&str> {
    word.char_indices()
        .map(|(index, _)| &word[index..])
        .find(|suffix| is_kana_str(suffix))
}

fn last_chars(text: &str, count: usize) -> &str {
    let total = text.chars().count();
    if count >= total {
        return text;
    }
    match text.char_indices().nth(total - count) {
        Some((index, _)) => &text[index..],
        None => text,
    }
}

/// Tests whether `reading` is an inflected form of `headword`, e.g. 臭かった
/// for 臭い.
///
/// A reading is inflected when the headword's kana ending is not equal to the
/// same-length ending of the reading.
pub fn is_inflected(headword: &str, reading: &str) -> bool {
    match longest_kana_suffix(headword) {
        Some(suffix) => {
            let ending = last_chars(reading, suffix.chars().count());
            to_katakana(suffix) != to_katakana(ending)
        }
        None => false,
    }
}

fn mora_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new("(?s).[\u{3099}\u{309A}]?[ぁぃぅぇぉゃゅょゎァィゥェォャュョヮ]?")
            .expect("mora pattern is a valid regex")
    })
}

/// Splits kana into morae, keeping voicing marks and small glides attached to
/// the preceding character: `きゃっきゃ` becomes `きゃ`, `っ`, `きゃ`.
pub fn kana_to_moras(kana: &str) -> Vec<String> {
    mora_pattern()
        .find_iter(kana)
        .map(|found| found.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod kana_tests {
    use super::*;

    const HIRAGANA: &str = "ぁあぃいぅうぇえぉおかがきぎくぐけげこごさざしじすずせぜそぞただちぢっつづてでとどなにぬねのはばぱひびぴふぶぷへべぺほぼぽまみむめもゃやゅゆょよらりるれろゎわゐゑをんゔゕゖゝゞ";
    const KATAKANA: &str = "ァアィイゥウェエォオカガキギクグケゲコゴサザシジスズセゼソゾタダチヂッツヅテデトドナニヌネノハバパヒビピフブプヘベペホボポマミムメモャヤュユョヨラリルレロヮワヰヱヲンヴヵヶヽヾ";

    #[test]
    fn converts_mixed_text() {
        assert_eq!(
            to_hiragana("<div>オープンソース形態素解析エンジンです。Test 😀"),
            "<div>おーぷんそーす形態素解析えんじんです。Test 😀"
        );
        assert_eq!(to_katakana("お前はもう死んでいる。"), "オ前ハモウ死ンデイル。");
    }

    #[test]
    fn script_round_trip_is_lossless() {
        assert_eq!(to_katakana(HIRAGANA), KATAKANA);
        assert_eq!(to_hiragana(KATAKANA), HIRAGANA);
        assert_eq!(to_hiragana(&to_katakana(HIRAGANA)), HIRAGANA);
        assert_eq!(to_katakana(&to_hiragana(KATAKANA)), KATAKANA);
    }

    #[test]
    fn katakana_without_hiragana_counterpart_is_unchanged() {
        assert_eq!(to_hiragana("ヷヺ"), "ヷヺ");
    }

    #[test]
    fn classifies_kana_strings() {
        assert!(is_kana_str("ひらがなカタカナ"));
        assert!(is_kana_str("ニュース"));
        assert!(is_kana_str("か゚"));
        assert!(!is_kana_str("故郷は"));
        assert!(!is_kana_char('A'));
    }

    #[test]
    fn finds_longest_kana_suffix() {
        assert_eq!(longest_kana_suffix("分かる"), Some("かる"));
        assert_eq!(longest_kana_suffix("綺麗"), None);
        assert_eq!(longest_kana_suffix("ありがとう"), Some("ありがとう"));
    }

    #[test]
    fn detects_inflected_readings() {
        assert!(!is_inflected("分かる", "わかる"));
        assert!(!is_inflected("臭い", "くさい"));
        assert!(is_inflected("分かる", "わかった"));
        assert!(!is_inflected("綺麗", "きれい"));
        assert!(!is_inflected("分かる", "ワカル"));
    }

    #[test]
    fn splits_moras_with_glides_and_marks() {
        assert_eq!(kana_to_moras("きゃっきゃ"), vec!["きゃ", "っ", "きゃ"]);
        assert_eq!(kana_to_moras("ニュース"), vec!["ニュ", "ー", "ス"]);
        assert_eq!(kana_to_moras("か゚き"), vec!["か\u{309A}", "き"]);
        assert!(kana_to_moras("").is_empty());
    }

    #[test]
    fn mora_split_is_restartable() {
        let first = kana_to_moras("しょうがっこう");
        let second = kana_to_moras("しょうがっこう");
        assert_eq!(first, second);
        assert_eq!(first.concat(), "しょうがっこう");
    }

    #[test]
    fn equivalence_ignores_script_and_voicing_variants() {
        assert!(kana_equivalent('か', 'カ'));
        assert!(kana_equivalent('は', 'わ'));
        assert!(kana_equivalent('ヂ', 'じ'));
        assert!(kana_equivalent('づ', 'ズ'));
        assert!(kana_equivalent('を', 'お'));
        assert!(kana_equivalent('ゔ', 'ぶ'));
        assert!(!kana_equivalent('か', 'が'));
    }
}
