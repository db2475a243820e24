//! Closed enumerations over the IPADIC tags MeCab prints for each node.
//!
//! Both enums are built with a total `from_tag` function: a tag the table does
//! not know resolves to `Unknown` instead of failing, so dictionaries with
//! extra tags still flow through the pipeline.

use std::fmt;

/// Top-level grammatical category (IPADIC feature 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartOfSpeech {
    /// Tag missing or not recognized.
    #[default]
    Unknown,
    /// 名詞
    Noun,
    /// 動詞
    Verb,
    /// 形容詞
    IAdjective,
    /// 連体詞
    PreNounAdjectival,
    /// 副詞
    Adverb,
    /// 助詞
    Particle,
    /// 助動詞
    BoundAuxiliary,
    /// 接続詞
    Conjunction,
    /// 感動詞
    Interjection,
    /// 接頭詞
    Prefix,
    /// 記号
    Symbol,
    /// フィラー
    Filler,
    /// その他
    Other,
}

impl PartOfSpeech {
    const TAGS: [(Self, &'static str); 13] = [
        (Self::Noun, "名詞"),
        (Self::Verb, "動詞"),
        (Self::IAdjective, "形容詞"),
        (Self::PreNounAdjectival, "連体詞"),
        (Self::Adverb, "副詞"),
        (Self::Particle, "助詞"),
        (Self::BoundAuxiliary, "助動詞"),
        (Self::Conjunction, "接続詞"),
        (Self::Interjection, "感動詞"),
        (Self::Prefix, "接頭詞"),
        (Self::Symbol, "記号"),
        (Self::Filler, "フィラー"),
        (Self::Other, "その他"),
    ];

    /// Maps a raw MeCab tag to a category. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        Self::TAGS
            .iter()
            .find(|(_, known)| *known == tag)
            .map_or(Self::Unknown, |(value, _)| *value)
    }

    /// Returns the IPADIC tag, or `None` for [`PartOfSpeech::Unknown`].
    pub fn as_tag(self) -> Option<&'static str> {
        Self::TAGS
            .iter()
            .find(|(value, _)| *value == self)
            .map(|(_, tag)| *tag)
    }
}

impl From<&str> for PartOfSpeech {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag().unwrap_or("*"))
    }
}

/// Conjugation form (IPADIC feature 5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Inflection {
    /// Tag missing, `*`, or not recognized.
    #[default]
    Unknown,
    /// 基本形
    DictionaryForm,
    /// 未然形
    Imperfective,
    /// 未然ウ接続
    ImperfectiveU,
    /// 未然ヌ接続
    ImperfectiveNu,
    /// 未然レル接続
    ImperfectiveReru,
    /// 未然特殊
    ImperfectiveSpecial,
    /// 連用形
    Continuative,
    /// 連用タ接続
    ContinuativeTa,
    /// 連用テ接続
    ContinuativeTe,
    /// 連用ゴザイ接続
    ContinuativeGozai,
    /// 連用デ接続
    ContinuativeDe,
    /// 連用ニ接続
    ContinuativeNi,
    /// 仮定形
    Hypothetical,
    /// 仮定縮約１
    HypotheticalContracted1,
    /// 仮定縮約２
    HypotheticalContracted2,
    /// 命令ｅ
    ImperativeE,
    /// 命令ｉ
    ImperativeI,
    /// 命令ｒｏ
    ImperativeRo,
    /// 命令ｙｏ
    ImperativeYo,
    /// 体言接続
    Attributive,
    /// 体言接続特殊
    AttributiveSpecial,
    /// 体言接続特殊２
    AttributiveSpecial2,
    /// 音便基本形
    EuphonicDictionaryForm,
    /// 文語基本形
    ClassicalDictionaryForm,
    /// ガル接続
    GaruAttached,
}

impl Inflection {
    const TAGS: [(Self, &'static str); 25] = [
        (Self::DictionaryForm, "基本形"),
        (Self::Imperfective, "未然形"),
        (Self::ImperfectiveU, "未然ウ接続"),
        (Self::ImperfectiveNu, "未然ヌ接続"),
        (Self::ImperfectiveReru, "未然レル接続"),
        (Self::ImperfectiveSpecial, "未然特殊"),
        (Self::Continuative, "連用形"),
        (Self::ContinuativeTa, "連用タ接続"),
        (Self::ContinuativeTe, "連用テ接続"),
        (Self::ContinuativeGozai, "連用ゴザイ接続"),
        (Self::ContinuativeDe, "連用デ接続"),
        (Self::ContinuativeNi, "連用ニ接続"),
        (Self::Hypothetical, "仮定形"),
        (Self::HypotheticalContracted1, "仮定縮約１"),
        (Self::HypotheticalContracted2, "仮定縮約２"),
        (Self::ImperativeE, "命令ｅ"),
        (Self::ImperativeI, "命令ｉ"),
        (Self::ImperativeRo, "命令ｒｏ"),
        (Self::ImperativeYo, "命令ｙｏ"),
        (Self::Attributive, "体言接続"),
        (Self::AttributiveSpecial, "体言接続特殊"),
        (Self::AttributiveSpecial2, "体言接続特殊２"),
        (Self::EuphonicDictionaryForm, "音便基本形"),
        (Self::ClassicalDictionaryForm, "文語基本形"),
        (Self::GaruAttached, "ガル接続"),
    ];

    /// Maps a raw MeCab tag to an inflection form. Never fails.
    pub fn from_tag(tag: &str) -> Self {
        Self::TAGS
            .iter()
            .find(|(_, known)| *known == tag)
            .map_or(Self::Unknown, |(value, _)| *value)
    }

    /// Returns the IPADIC tag, or `None` for [`Inflection::Unknown`].
    pub fn as_tag(self) -> Option<&'static str> {
        Self::TAGS
            .iter()
            .find(|(value, _)| *value == self)
            .map(|(_, tag)| *tag)
    }
}

impl From<&str> for Inflection {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl fmt::Display for Inflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag().unwrap_or("*"))
    }
}
