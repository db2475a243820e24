//! Splits one annotation that covers several kanji into smaller annotations
//! wherever kana inside the word pins down the boundary, e.g.
//! `取って置[とってお]き` becomes `取[と]って 置[お]き`.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Dismembered;

fn chunk_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)^([^\[\]]*)\[([^\[\]]*)\](.*)$").expect("chunk pattern is a valid regex")
    })
}

/// Parses `word[reading]tail`. Returns `None` when the brackets are missing
/// or out of order.
pub fn dismember(chunk: &str) -> Option<Dismembered> {
    let captures = chunk_pattern().captures(chunk)?;
    Some(Dismembered::new(&captures[1], &captures[2], &captures[3]))
}

fn shared_prefix_len(word: &[char], reading: &[char]) -> usize {
    word.iter()
        .zip(reading)
        .take_while(|(left, right)| left == right)
        .count()
}

fn find_split_point(word: &[char], reading: &[char], lower: usize) -> Option<(usize, usize)> {
    for word_index in lower..word.len() {
        for reading_index in lower..reading.len() {
            // Heuristic: a boundary with more kanji before it than kana is
            // treated as ambiguous.
            if word_index > reading_index {
                continue;
            }
            if word[word_index] == reading[reading_index] {
                return Some((word_index, reading_index));
            }
        }
    }
    None
}

fn split_once(piece: &Dismembered) -> Option<(Dismembered, Option<Dismembered>)> {
    let word: Vec<char> = piece.word.chars().collect();
    let reading: Vec<char> = piece.reading.chars().collect();
    if word.len() < 2 || reading.len() < 2 {
        return None;
    }

    // The first kana of the reading always belongs to the first kanji.
    let lower = shared_prefix_len(&word, &reading).max(1);
    let (word_index, reading_index) = find_split_point(&word, &reading, lower)?;
    let run = word[word_index..]
        .iter()
        .zip(&reading[reading_index..])
        .take_while(|(left, right)| left == right)
        .count();

    let head: String = word[..word_index].iter().collect();
    let head_reading: String = reading[..reading_index].iter().collect();
    let shared: String = word[word_index..word_index + run].iter().collect();
    let rest_word: String = word[word_index + run..].iter().collect();
    let rest_reading: String = reading[reading_index + run..].iter().collect();

    match (rest_word.is_empty(), rest_reading.is_empty()) {
        (true, true) => Some((
            Dismembered::new(head, head_reading, shared + &piece.tail),
            None,
        )),
        (false, false) => Some((
            Dismembered::new(head, head_reading, shared),
            Some(Dismembered::new(rest_word, rest_reading, piece.tail.as_str())),
        )),
        _ => None,
    }
}

/// Splits one piece as far as it unambiguously goes.
///
/// The word parts (with their tails) of the result concatenate to the word
/// and tail of `piece`.
pub fn split_compound(piece: Dismembered) -> Vec<Dismembered> {
    let mut pieces = Vec::new();
    let mut rest = piece;
    loop {
        match split_once(&rest) {
            Some((first, Some(second))) => {
                pieces.push(first);
                rest = second;
            }
            Some((last, None)) => {
                pieces.push(last);
                break;
            }
            None => {
                pieces.push(rest);
                break;
            }
        }
    }
    pieces
}

fn break_chunk(chunk: &str) -> String {
    match dismember(chunk) {
        Some(piece) => split_compound(piece)
            .iter()
            .map(Dismembered::assemble)
            .collect::<Vec<_>>()
            .join(" "),
        None => chunk.to_string(),
    }
}

/// Splits every space-separated annotation in `expr`.
///
/// Chunks without a well-formed `[reading]` are returned unchanged.
pub fn break_compound_furigana(expr: &str) -> String {
    expr.split(' ').map(break_chunk).collect::<Vec<_>>().join(" ")
}
