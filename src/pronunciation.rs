//! Collapses readings that differ only in spelling, not in sound.
//!
//! Reading lists (pitch accent files in particular) often carry the same word
//! twice, once with a long vowel spelled out (`おはよう`) and once with `ー`.
//! [`literal_pronunciation`] maps both to the same katakana string.

use std::sync::OnceLock;

use crate::kana::to_katakana;

const PROTECTED: &str = "[この][うえ]";

/// Hiragana substitutions, applied in order.
const EQUIVALENT_SOUNDS: &[(&str, &str)] = &[
    ("このうえ", PROTECTED),
    ("ふうう", "ふーう"),
    ("いまは", "いまわ"),
    ("おおう", "おーう"),
    ("じゃあ", "じゃー"),
    ("じゅう", "じゅー"),
    ("じょう", "じょー"),
    ("つづ", "つず"),
    ("ぼお", "ぼー"),
    ("もお", "もー"),
    ("れい", "れー"),
    ("めい", "めー"),
    ("べい", "べー"),
    ("けい", "けー"),
    ("ぐう", "ぐー"),
    ("ごう", "ごー"),
    ("ずう", "ずー"),
    ("づう", "ずー"),
    ("づー", "ずー"),
    ("ぞう", "ぞー"),
    ("どう", "どー"),
    ("どお", "どー"),
    ("ぶう", "ぶー"),
    ("ぼう", "ぼー"),
    ("ぷう", "ぷー"),
    ("ぽう", "ぽー"),
    ("うう", "うー"),
    ("おう", "おー"),
    ("おお", "おー"),
    ("くう", "くー"),
    ("こう", "こー"),
    ("すう", "すー"),
    ("そう", "そー"),
    ("つう", "つー"),
    ("とう", "とー"),
    ("とお", "とー"),
    ("こお", "こー"),
    ("ぬう", "ぬー"),
    ("のう", "のー"),
    ("ふう", "ふー"),
    ("ほう", "ほー"),
    ("ほお", "ほー"),
    ("むう", "むー"),
    ("もう", "もー"),
    ("よう", "よー"),
    ("るう", "るー"),
    ("ろう", "ろー"),
    ("ぅう", "ぅー"),
    ("ぉう", "ぉー"),
    ("ょう", "ょー"),
    ("ゆう", "ゆー"),
    ("いい", "いー"),
    ("ちい", "ちー"),
    ("せい", "せー"),
    ("じい", "じー"),
    ("かあ", "かー"),
    ("ゅう", "ゅー"),
    ("ぜい", "ぜー"),
    ("よお", "よー"),
    ("ねえ", "ねー"),
    ("にい", "にー"),
    ("ばあ", "ばー"),
    ("らあ", "らー"),
    ("ごお", "ごー"),
    ("ひい", "ひー"),
    ("へい", "へー"),
    ("しい", "しー"),
    ("さあ", "さー"),
    ("れえ", "れー"),
    ("ぱあ", "ぱー"),
    ("てい", "てー"),
    ("ぢ", "じ"),
    ("づ", "ず"),
    ("を", "お"),
    ("ゔ", "ぶ"),
    (PROTECTED, "このうえ"),
];

/// Semi-voiced kana used for nasal g in some sources, mapped to plain voiced kana.
const NASAL_G: &[(&str, &str)] = &[
    ("か\u{309A}", "が"),
    ("カ\u{309A}", "ガ"),
    ("き\u{309A}", "ぎ"),
    ("キ\u{309A}", "ギ"),
    ("く\u{309A}", "ぐ"),
    ("ク\u{309A}", "グ"),
    ("け\u{309A}", "げ"),
    ("ケ\u{309A}", "ゲ"),
    ("こ\u{309A}", "ご"),
    ("コ\u{309A}", "ゴ"),
];

/// Hiragana substitutions followed by their katakana versions.
fn substitutions() -> &'static [(String, String)] {
    static TABLE: OnceLock<Vec<(String, String)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let hiragana = EQUIVALENT_SOUNDS
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()));
        let katakana = EQUIVALENT_SOUNDS
            .iter()
            .map(|(from, to)| (to_katakana(from), to_katakana(to)));
        hiragana.chain(katakana).collect()
    })
}

/// Rewrites long vowels and homophonous kana to one canonical spelling.
///
/// `このうえ` is shielded so the `のう` rule does not apply inside it.
pub fn unify_repr(reading: &str) -> String {
    let mut unified = reading.to_string();
    for (from, to) in substitutions() {
        if unified.contains(from.as_str()) {
            unified = unified.replace(from.as_str(), to);
        }
    }
    unified
}

/// Replaces semi-voiced か゚..こ゚ (nasal g notation) with が..ご.
pub fn replace_handakuten(reading: &str) -> String {
    NASAL_G
        .iter()
        .fold(reading.to_string(), |text, (from, to)| text.replace(from, to))
}

/// Katakana spelling of how `text` is actually pronounced.
pub fn literal_pronunciation(text: &str) -> String {
    to_katakana(&unify_repr(&replace_handakuten(text)))
}
