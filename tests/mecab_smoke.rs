//! Runs against a real MeCab installation. Skips quietly when none is found.

use furigana_rs::{FuriganaError, Mecab, PartOfSpeech};

fn installed_mecab() -> Option<Mecab> {
    match Mecab::new() {
        Ok(mecab) => Some(mecab),
        Err(err) => {
            println!("skipping: {err}");
            None
        }
    }
}

#[test]
fn smoke_test_with_installed_mecab() {
    let Some(mecab) = installed_mecab() else {
        return;
    };

    // A missing or non-IPADIC dictionary makes mecab fail; nothing to check then.
    let tokens = match mecab.translate("昨日、林檎を2個買った。") {
        Ok(tokens) => tokens,
        Err(FuriganaError::UnexpectedOutput(output)) => {
            println!("skipping: {output}");
            return;
        }
        Err(err) => panic!("mecab failed: {err}"),
    };
    assert!(!tokens.is_empty());
    assert!(tokens
        .iter()
        .any(|token| token.part_of_speech == PartOfSpeech::Noun));

    let reading = mecab.reading("昨日、林檎を2個買った。").expect("cached tokens");
    assert_eq!(reading, reading.trim());
    assert!(!reading.contains("  "));
    assert!(reading.contains('['));
}

#[test]
fn merge_rule_applies_to_real_output() {
    let Some(mecab) = installed_mecab() else {
        return;
    };
    let Ok(tokens) = mecab.translate("真莉、大好きだよん＾＾") else {
        return;
    };
    assert!(tokens.iter().all(|token| token.word != "真"));
}
