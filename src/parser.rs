//! Splits raw MeCab output into [`ParsedToken`]s.
//!
//! MeCab is run with a node format that joins the five fields of a node with
//! [`COMPONENT_SEPARATOR`], ends every node with [`NODE_SEPARATOR`] and ends
//! the sentence with [`FOOTER`].

use tracing::warn;

use crate::constants::{COMPONENT_SEPARATOR, FOOTER, NODE_SEPARATOR};
use crate::error::{FuriganaError, Result};
use crate::model::ParsedToken;

/// Trims the trailing line break and decodes MeCab's bytes as UTF-8,
/// replacing invalid sequences.
pub fn decode_output(bytes: &[u8]) -> String {
    let end = bytes
        .iter()
        .rposition(|byte| !matches!(byte, b'\r' | b'\n'))
        .map_or(0, |index| index + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Parses one MeCab response.
///
/// Nodes after the footer are ignored. A response without a footer is not
/// MeCab node output at all and is reported as
/// [`FuriganaError::UnexpectedOutput`].
pub fn parse_output(output: &str) -> Result<Vec<ParsedToken>> {
    if is_missing_file_report(output) {
        return Err(FuriganaError::UnexpectedOutput(format!(
            "mecab could not open its dictionary; make sure the dictionary path \
             contains only ASCII characters: {output}"
        )));
    }

    let mut tokens = Vec::new();
    for section in output.split(NODE_SEPARATOR) {
        if section.starts_with(FOOTER) {
            return Ok(tokens);
        }
        if section.is_empty() {
            continue;
        }
        let fields: Vec<&str> = section.split(COMPONENT_SEPARATOR).collect();
        tokens.push(ParsedToken::from_fields(&fields));
    }

    warn!(output = %output, "mecab output has no footer");
    Err(FuriganaError::UnexpectedOutput(output.to_string()))
}

fn is_missing_file_report(output: &str) -> bool {
    output.contains("tagger.cpp") && output.contains("no such file or directory")
}
