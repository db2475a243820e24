//! Fixes for segments MeCab reproducibly gets wrong.
//!
//! The rule table is closed. Each rule matches one token exactly on word,
//! headword and reading, may additionally require the headword of the
//! previous or next token, and rewrites the match into one or more new
//! tokens. Rules are tried in declaration order and the first match wins.

use std::collections::BTreeSet;

use tracing::trace;

use crate::model::ParsedToken;
use crate::types::{Inflection, PartOfSpeech};

#[derive(Debug, Clone, Copy)]
struct Pattern {
    word: &'static str,
    headword: &'static str,
    reading: &'static str,
}

impl Pattern {
    fn matches(&self, token: &ParsedToken) -> bool {
        token.word == self.word
            && token.headword == self.headword
            && token.reading() == Some(self.reading)
    }
}

/// Constraint on a neighbouring token's headword.
#[derive(Debug, Clone, Copy)]
enum Context {
    Any,
    Previous(&'static str),
    Next(&'static str),
}

impl Context {
    fn holds(&self, tokens: &[ParsedToken], index: usize) -> bool {
        let neighbour = match self {
            Context::Any => return true,
            Context::Previous(_) => index.checked_sub(1).and_then(|i| tokens.get(i)),
            Context::Next(_) => tokens.get(index + 1),
        };
        match (self, neighbour) {
            (Context::Previous(headword) | Context::Next(headword), Some(token)) => {
                token.headword == *headword
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Replacement {
    word: &'static str,
    headword: &'static str,
    reading: &'static str,
    part_of_speech: PartOfSpeech,
    inflection: Inflection,
}

impl Replacement {
    fn to_token(self) -> ParsedToken {
        ParsedToken::new(
            self.word,
            self.headword,
            Some(self.reading),
            self.part_of_speech,
            self.inflection,
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum Fix {
    /// Replaces headword and/or reading, keeping every other field.
    Override {
        headword: Option<&'static str>,
        reading: Option<&'static str>,
    },
    /// Replaces the token with several tokens.
    Split(&'static [Replacement]),
    /// Replaces the token and the one after it with a single token.
    MergeNext(Replacement),
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    pattern: Pattern,
    context: Context,
    fix: Fix,
}

/// Output of one firing rule: the tokens to emit and the positions it used up
/// besides its own.
struct Firing {
    tokens: Vec<ParsedToken>,
    consumed: Vec<usize>,
}

impl Rule {
    fn matches(&self, tokens: &[ParsedToken], index: usize) -> bool {
        self.pattern.matches(&tokens[index]) && self.context.holds(tokens, index)
    }

    fn fire(&self, tokens: &[ParsedToken], index: usize) -> Firing {
        let token = &tokens[index];
        match self.fix {
            Fix::Override { headword, reading } => {
                let mut fixed = token.clone();
                if let Some(headword) = headword {
                    fixed = fixed.with_headword(headword);
                }
                if let Some(reading) = reading {
                    fixed = fixed.with_katakana_reading(reading);
                }
                Firing {
                    tokens: vec![fixed],
                    consumed: Vec::new(),
                }
            }
            Fix::Split(parts) => Firing {
                tokens: parts.iter().map(|part| part.to_token()).collect(),
                consumed: Vec::new(),
            },
            Fix::MergeNext(merged) => Firing {
                tokens: vec![merged.to_token()],
                consumed: vec![index + 1],
            },
        }
    }
}

const fn override_reading(
    word: &'static str,
    headword: &'static str,
    reading: &'static str,
    context: Context,
    fixed_reading: &'static str,
) -> Rule {
    Rule {
        pattern: Pattern {
            word,
            headword,
            reading,
        },
        context,
        fix: Fix::Override {
            headword: None,
            reading: Some(fixed_reading),
        },
    }
}

static RULES: &[Rule] = &[
    // 悪い parsed as the noun 悪意.
    Rule {
        pattern: Pattern {
            word: "悪い",
            headword: "悪意",
            reading: "アクイ",
        },
        context: Context::Any,
        fix: Fix::Override {
            headword: Some("悪い"),
            reading: Some("ワルイ"),
        },
    },
    // いた目 (い + た + 目) parsed as 板目.
    Rule {
        pattern: Pattern {
            word: "いた目",
            headword: "板目",
            reading: "イタメ",
        },
        context: Context::Any,
        fix: Fix::Split(&[
            Replacement {
                word: "い",
                headword: "いる",
                reading: "イ",
                part_of_speech: PartOfSpeech::Verb,
                inflection: Inflection::Continuative,
            },
            Replacement {
                word: "た",
                headword: "た",
                reading: "タ",
                part_of_speech: PartOfSpeech::BoundAuxiliary,
                inflection: Inflection::Continuative,
            },
            Replacement {
                word: "目",
                headword: "目",
                reading: "メ",
                part_of_speech: PartOfSpeech::Noun,
                inflection: Inflection::Unknown,
            },
        ]),
    },
    // 軽そう parsed as 軽装.
    Rule {
        pattern: Pattern {
            word: "軽そう",
            headword: "軽装",
            reading: "ケイソウ",
        },
        context: Context::Any,
        fix: Fix::Split(&[
            Replacement {
                word: "軽",
                headword: "軽い",
                reading: "カル",
                part_of_speech: PartOfSpeech::IAdjective,
                inflection: Inflection::GaruAttached,
            },
            Replacement {
                word: "そう",
                headword: "そう",
                reading: "ソウ",
                part_of_speech: PartOfSpeech::Adverb,
                inflection: Inflection::Unknown,
            },
        ]),
    },
    override_reading("何", "何", "ナン", Context::Next("を"), "ナニ"),
    override_reading("何", "何", "ナン", Context::Next("が"), "ナニ"),
    override_reading("方", "方", "ホウ", Context::Previous("言う"), "カタ"),
    // The given name 真莉 comes out as the prefix 真 plus an unknown 莉.
    Rule {
        pattern: Pattern {
            word: "真",
            headword: "真",
            reading: "マ",
        },
        context: Context::Next("莉"),
        fix: Fix::MergeNext(Replacement {
            word: "真莉",
            headword: "真莉",
            reading: "マリ",
            part_of_speech: PartOfSpeech::Noun,
            inflection: Inflection::Unknown,
        }),
    },
];

/// Rewrites known misparses in one sentence worth of tokens.
///
/// Positions are scanned left to right; a position already used by an
/// earlier merge is not emitted again. Tokens no rule matches are copied
/// through unchanged.
pub fn replace_mistakes(tokens: &[ParsedToken]) -> Vec<ParsedToken> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut consumed = BTreeSet::new();

    for (index, token) in tokens.iter().enumerate() {
        if consumed.contains(&index) {
            continue;
        }
        match RULES.iter().find(|rule| rule.matches(tokens, index)) {
            Some(rule) => {
                let firing = rule.fire(tokens, index);
                trace!(word = %token.word, replaced_by = firing.tokens.len(), "correction rule fired");
                output.extend(firing.tokens);
                consumed.extend(firing.consumed);
            }
            None => output.push(token.clone()),
        }
    }

    output
}
