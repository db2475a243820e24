#![deny(missing_docs)]

//! Furigana for Japanese text, generated with MeCab.
//!
//! The crate runs MeCab once per sentence, fixes a handful of readings MeCab
//! is known to get wrong, and renders each word as `word[reading]` with the
//! shared kana moved outside the brackets.
//!
//! ## Quick Start
//! ```no_run
//! use furigana_rs::Mecab;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mecab = Mecab::new()?;
//!     println!("{}", mecab.reading("昨日すき焼きを食べました")?);
//!     // 昨日[きのう]すき 焼[や]きを 食[た]べました
//!     for token in mecab.translate("真莉、大好きだよん")? {
//!         println!("{} {:?} {}", token.word, token.reading(), token.part_of_speech);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Explicit Setup
//! ```no_run
//! use std::time::Duration;
//! use furigana_rs::{Mecab, MecabConfig, ReadingOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MecabConfig::default()
//!         .with_executable("/usr/bin/mecab")
//!         .with_dictionary_dir("/var/lib/mecab/dic/ipadic-utf8")
//!         .with_timeout(Duration::from_secs(2))
//!         .with_cache_capacity(512)
//!         .with_reading_options(ReadingOptions::default().add_skip_expression("日本"));
//!     let mecab = Mecab::from_config(config)?;
//!     let _ = mecab.reading("日本の猫")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pure Helpers
//! The alignment and kana utilities do not need MeCab:
//! ```
//! use furigana_rs::{break_compound_furigana, format_output, to_hiragana};
//!
//! assert_eq!(format_output("食べた", &to_hiragana("タベタ")), " 食[た]べた");
//! assert_eq!(break_compound_furigana("取って置[とってお]き"), "取[と]って 置[お]き");
//! ```
//!
//! ## Environment Variables
//! - `MECAB_PATH`: explicit MeCab executable.
//! - `MECAB_DIC_DIR`: explicit system dictionary directory.
//! - `FURIGANA_SUPPORT_DIR`: directory with the bundled executable,
//!   `mecabrc` and `user_dic.dic` (`support/` next to the running binary by
//!   default).

mod cache;
mod compound;
mod config;
mod constants;
mod correction;
mod discovery;
mod error;
mod format;
mod kana;
mod model;
mod parser;
mod process;
mod pronunciation;
mod runtime;
mod types;

pub use cache::ResultCache;
pub use compound::{break_compound_furigana, dismember, split_compound};
pub use config::{MecabConfig, ReadingOptions};
pub use constants::*;
pub use correction::replace_mistakes;
pub use error::{FuriganaError, Result};
pub use format::format_output;
pub use kana::{
    hiragana_char_to_katakana, is_inflected, is_kana_char, is_kana_str, kana_equivalent,
    kana_to_moras, katakana_char_to_hiragana, longest_kana_suffix, to_hiragana, to_katakana,
};
pub use model::{Dismembered, ParsedToken};
pub use parser::{decode_output, parse_output};
pub use process::{escape_text, node_format, Analyzer, MecabProcess};
pub use pronunciation::{literal_pronunciation, replace_handakuten, unify_repr};
pub use runtime::Mecab;
pub use types::{Inflection, PartOfSpeech};

#[cfg(test)]
mod test_support;
