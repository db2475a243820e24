use crate::constants::NODE_FIELD_COUNT;
use crate::types::{Inflection, PartOfSpeech};

/// One node of MeCab output after parsing.
///
/// Values are never changed in place; corrections build new tokens with the
/// `with_*` methods so untouched fields carry over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedToken {
    /// Surface form as it appears in the input.
    pub word: String,
    /// Dictionary (uninflected) form.
    pub headword: String,
    /// Katakana reading, if MeCab supplied one.
    pub katakana_reading: Option<String>,
    /// Grammatical category.
    pub part_of_speech: PartOfSpeech,
    /// Conjugation form.
    pub inflection: Inflection,
}

impl ParsedToken {
    /// Creates a token from already-typed values.
    pub fn new(
        word: impl Into<String>,
        headword: impl Into<String>,
        katakana_reading: Option<&str>,
        part_of_speech: PartOfSpeech,
        inflection: Inflection,
    ) -> Self {
        Self {
            word: word.into(),
            headword: headword.into(),
            katakana_reading: katakana_reading.map(str::to_string),
            part_of_speech,
            inflection,
        }
    }

    /// Builds a token from the raw fields of one node.
    ///
    /// Fewer than five fields means MeCab did not recognize the segment: the
    /// first field then stands in for word, headword and reading, and both
    /// tags are `Unknown`. For recognized nodes an empty or `*` headword falls
    /// back to the word, and an empty or `*` reading is dropped.
    pub fn from_fields(fields: &[&str]) -> Self {
        let word = fields.first().copied().unwrap_or_default();
        if fields.len() < NODE_FIELD_COUNT {
            return Self::unknown(word);
        }

        let headword = match fields[1] {
            "" | "*" => word,
            headword => headword,
        };
        let katakana_reading = match fields[2] {
            "" | "*" => None,
            reading => Some(reading),
        };

        Self::new(
            word,
            headword,
            katakana_reading,
            PartOfSpeech::from_tag(fields[3]),
            Inflection::from_tag(fields[4]),
        )
    }

    /// Token for a segment the dictionary does not know.
    pub fn unknown(word: &str) -> Self {
        Self::new(
            word,
            word,
            Some(word),
            PartOfSpeech::Unknown,
            Inflection::Unknown,
        )
    }

    /// Returns a copy with a different headword.
    pub fn with_headword(mut self, headword: impl Into<String>) -> Self {
        self.headword = headword.into();
        self
    }

    /// Returns a copy with a different reading.
    pub fn with_katakana_reading(mut self, reading: impl Into<String>) -> Self {
        self.katakana_reading = Some(reading.into());
        self
    }

    /// Returns a copy with a different category.
    pub fn with_part_of_speech(mut self, part_of_speech: PartOfSpeech) -> Self {
        self.part_of_speech = part_of_speech;
        self
    }

    /// Returns a copy with a different conjugation form.
    pub fn with_inflection(mut self, inflection: Inflection) -> Self {
        self.inflection = inflection;
        self
    }

    /// Reading as a string slice.
    pub fn reading(&self) -> Option<&str> {
        self.katakana_reading.as_deref()
    }
}

/// A piece of a compound annotation: `word[reading]tail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dismembered {
    /// Characters the reading belongs to.
    pub word: String,
    /// Reading of `word`.
    pub reading: String,
    /// Text already resolved that follows the annotation.
    pub tail: String,
}

impl Dismembered {
    /// Creates a piece from its three parts.
    pub fn new(
        word: impl Into<String>,
        reading: impl Into<String>,
        tail: impl Into<String>,
    ) -> Self {
        Self {
            word: word.into(),
            reading: reading.into(),
            tail: tail.into(),
        }
    }

    /// Renders the piece as `word[reading]tail`.
    pub fn assemble(&self) -> String {
        format!("{}[{}]{}", self.word, self.reading, self.tail)
    }
}
