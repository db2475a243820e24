use std::sync::{Mutex, MutexGuard};

use tracing::{debug, trace};

use crate::cache::ResultCache;
use crate::config::{MecabConfig, ReadingOptions};
use crate::constants::NUMBERS;
use crate::correction::replace_mistakes;
use crate::error::Result;
use crate::format::format_output;
use crate::kana::{is_kana_str, to_hiragana};
use crate::model::ParsedToken;
use crate::parser::parse_output;
use crate::process::{Analyzer, MecabProcess};

/// Analyzes sentences with MeCab and adds furigana to them.
///
/// Corrected tokens are cached per input sentence. The cache sits behind a
/// mutex, so a `Mecab` can be shared between threads when its analyzer can.
pub struct Mecab<A: Analyzer = MecabProcess> {
    analyzer: A,
    cache: Mutex<ResultCache<String, Vec<ParsedToken>>>,
    options: ReadingOptions,
}

impl Mecab<MecabProcess> {
    /// Builds a controller from environment variables and discovered paths.
    ///
    /// Equivalent to `Mecab::from_config(MecabConfig::default())`.
    pub fn new() -> Result<Self> {
        Self::from_config(MecabConfig::default())
    }

    /// Builds a controller that runs the MeCab executable described by
    /// `config`.
    pub fn from_config(config: MecabConfig) -> Result<Self> {
        let analyzer = MecabProcess::from_config(&config)?;
        Ok(Self::with_analyzer(analyzer, &config))
    }
}

impl<A: Analyzer> Mecab<A> {
    /// Builds a controller around any analyzer. Only the cache capacity and
    /// reading options of `config` are used.
    pub fn with_analyzer(analyzer: A, config: &MecabConfig) -> Self {
        Self {
            analyzer,
            cache: Mutex::new(ResultCache::new(config.cache_capacity)),
            options: config.reading.clone(),
        }
    }

    /// Analyzer used for cache misses.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Options used by [`Mecab::reading`].
    pub fn reading_options(&self) -> &ReadingOptions {
        &self.options
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResultCache<String, Vec<ParsedToken>>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Splits `expr` into corrected tokens.
    ///
    /// Results are cached by the exact input string. The analyzer runs
    /// without the cache lock held, so two threads may analyze the same
    /// sentence at once; the first stored result wins.
    pub fn translate(&self, expr: &str) -> Result<Vec<ParsedToken>> {
        if let Some(tokens) = self.lock_cache().get(expr) {
            debug!(expr, "token cache hit");
            return Ok(tokens.clone());
        }

        let output = self.analyzer.run(expr)?;
        let tokens = replace_mistakes(&parse_output(&output)?);
        trace!(expr, tokens = tokens.len(), "analyzed");

        Ok(self
            .lock_cache()
            .set_default(expr.to_string(), tokens)
            .clone())
    }

    /// Returns `expr` with furigana in `word[reading]` form.
    ///
    /// Every annotated span is preceded by one space, which keeps readings
    /// attached to the right characters. The result carries no leading or
    /// trailing whitespace.
    ///
    /// ```no_run
    /// use furigana_rs::Mecab;
    ///
    /// let mecab = Mecab::new()?;
    /// assert_eq!(mecab.reading("昨日")?, "昨日[きのう]");
    /// # Ok::<(), furigana_rs::FuriganaError>(())
    /// ```
    pub fn reading(&self, expr: &str) -> Result<String> {
        let mut out = String::new();
        for token in self.translate(expr)? {
            let piece = self.annotate(&token);
            let piece = if out.ends_with(' ') {
                piece.trim_start_matches(' ')
            } else {
                piece.as_str()
            };
            out.push_str(piece);
        }
        Ok(out.trim().to_string())
    }

    fn annotate(&self, token: &ParsedToken) -> String {
        let word = token.word.as_str();
        let Some(reading) = token.reading() else {
            return word.to_string();
        };
        let reading = to_hiragana(reading);
        if reading.is_empty() || reading == word || self.is_skipped(word) || is_kana_str(word) {
            return word.to_string();
        }
        format_output(word, &reading)
    }

    fn is_skipped(&self, word: &str) -> bool {
        (self.options.skip_numbers && NUMBERS.contains(word))
            || self.options.skip_expressions.iter().any(|skip| skip == word)
    }

    /// Changes the cache capacity (`0` = unbounded), evicting the excess.
    pub fn set_cache_capacity(&self, capacity: usize) {
        self.lock_cache().set_capacity(capacity);
    }

    /// Current cache capacity.
    pub fn cache_capacity(&self) -> usize {
        self.lock_cache().capacity()
    }

    /// Number of cached sentences.
    pub fn cached_len(&self) -> usize {
        self.lock_cache().len()
    }

    /// Drops every cached sentence.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }
}

#[cfg(test)]
mod runtime_tests {
    use super::Mecab;
    use crate::config::{MecabConfig, ReadingOptions};
    use crate::constants::{COMPONENT_SEPARATOR, FOOTER, NODE_SEPARATOR};
    use crate::error::{FuriganaError, Result};
    use crate::process::Analyzer;
    use crate::types::PartOfSpeech;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Replay {
        responses: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl Replay {
        fn with(mut self, expr: &str, nodes: &[&[&str]]) -> Self {
            let mut output = String::new();
            for fields in nodes {
                output.push_str(&fields.join(COMPONENT_SEPARATOR));
                output.push_str(NODE_SEPARATOR);
            }
            output.push_str(FOOTER);
            self.responses.insert(expr.to_string(), output);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Analyzer for Replay {
        fn run(&self, text: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(text)
                .cloned()
                .ok_or_else(|| FuriganaError::UnexpectedOutput(text.to_string()))
        }
    }

    fn sukiyaki() -> Replay {
        Replay::default().with(
            "昨日すき焼きを食べました",
            &[
                &["昨日", "昨日", "キノウ", "名詞", "*"],
                &["すき焼き", "すき焼き", "スキヤキ", "名詞", "*"],
                &["を", "を", "ヲ", "助詞", "*"],
                &["食べ", "食べる", "タベ", "動詞", "連用形"],
                &["まし", "ます", "マシ", "助動詞", "連用形"],
                &["た", "た", "タ", "助動詞", "基本形"],
            ],
        )
    }

    fn mecab(replay: Replay) -> Mecab<Replay> {
        Mecab::with_analyzer(replay, &MecabConfig::default())
    }

    #[test]
    fn reading_annotates_kanji_only() {
        let mecab = mecab(sukiyaki());
        assert_eq!(
            mecab.reading("昨日すき焼きを食べました").expect("replayed"),
            "昨日[きのう]すき 焼[や]きを 食[た]べました"
        );
    }

    #[test]
    fn translate_is_cached_per_sentence() {
        let mecab = mecab(sukiyaki());
        let first = mecab.translate("昨日すき焼きを食べました").expect("replayed");
        let second = mecab.translate("昨日すき焼きを食べました").expect("cached");
        assert_eq!(first, second);
        assert_eq!(mecab.analyzer().calls(), 1);
        assert_eq!(mecab.cached_len(), 1);

        mecab.clear_cache();
        mecab.translate("昨日すき焼きを食べました").expect("replayed");
        assert_eq!(mecab.analyzer().calls(), 2);
    }

    #[test]
    fn poisoned_cache_lock_is_recovered() {
        let mecab = mecab(sukiyaki());
        let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = mecab.lock_cache();
            panic!("panic while holding the cache lock");
        }));
        assert!(panicked.is_err());
        assert!(mecab.cache.is_poisoned());

        let tokens = mecab.translate("昨日すき焼きを食べました").expect("replayed");
        assert_eq!(tokens.len(), 6);
        assert_eq!(mecab.cached_len(), 1);
        assert_eq!(
            mecab.reading("昨日すき焼きを食べました").expect("cached"),
            "昨日[きのう]すき 焼[や]きを 食[た]べました"
        );
        assert_eq!(mecab.analyzer().calls(), 1);
    }

    #[test]
    fn translate_applies_corrections() {
        let replay = Replay::default().with("悪い", &[&["悪い", "悪意", "アクイ", "名詞", "*"]]);
        let tokens = mecab(replay).translate("悪い").expect("replayed");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].headword, "悪い");
        assert_eq!(tokens[0].reading(), Some("ワルイ"));
    }

    #[test]
    fn failures_are_not_cached() {
        let mecab = mecab(Replay::default());
        assert!(mecab.translate("未知").is_err());
        assert!(mecab.translate("未知").is_err());
        assert_eq!(mecab.analyzer().calls(), 2);
        assert_eq!(mecab.cached_len(), 0);
    }

    #[test]
    fn unknown_words_pass_through() {
        let replay = Replay::default().with("ｗｗ猫", &[&["ｗｗ"], &["猫", "猫", "ネコ", "名詞", "*"]]);
        let mecab = mecab(replay);
        let tokens = mecab.translate("ｗｗ猫").expect("replayed");
        assert_eq!(tokens[0].part_of_speech, PartOfSpeech::Unknown);
        assert_eq!(mecab.reading("ｗｗ猫").expect("cached"), "ｗｗ 猫[ねこ]");
    }

    #[test]
    fn numbers_are_skipped_by_default() {
        let replay = Replay::default().with(
            "二人",
            &[
                &["二", "二", "ニ", "名詞", "*"],
                &["人", "人", "ニン", "名詞", "*"],
            ],
        );
        let mecab = mecab(replay);
        assert_eq!(mecab.reading("二人").expect("replayed"), "二 人[にん]");
    }

    #[test]
    fn numbers_can_be_annotated() {
        let replay = Replay::default().with("三", &[&["三", "三", "サン", "名詞", "*"]]);
        let config = MecabConfig::default()
            .with_reading_options(ReadingOptions::default().with_skip_numbers(false));
        let mecab = Mecab::with_analyzer(replay, &config);
        assert_eq!(mecab.reading("三").expect("replayed"), "三[さん]");
    }

    #[test]
    fn skip_expressions_stay_plain() {
        let replay = Replay::default().with(
            "日本の猫",
            &[
                &["日本", "日本", "ニッポン", "名詞", "*"],
                &["の", "の", "ノ", "助詞", "*"],
                &["猫", "猫", "ネコ", "名詞", "*"],
            ],
        );
        let config = MecabConfig::default()
            .with_reading_options(ReadingOptions::default().add_skip_expression("日本"));
        let mecab = Mecab::with_analyzer(replay, &config);
        assert_eq!(mecab.reading("日本の猫").expect("replayed"), "日本の 猫[ねこ]");
    }

    #[test]
    fn adjacent_annotations_get_one_space() {
        let replay = Replay::default().with(
            "漢字猫",
            &[
                &["漢字", "漢字", "カンジ", "名詞", "*"],
                &["猫", "猫", "ネコ", "名詞", "*"],
            ],
        );
        let mecab = mecab(replay);
        let reading = mecab.reading("漢字猫").expect("replayed");
        assert_eq!(reading, "漢字[かんじ] 猫[ねこ]");
        assert!(!reading.contains("  "));
    }

    #[test]
    fn cache_capacity_comes_from_config() {
        let replay = Replay::default()
            .with("猫", &[&["猫", "猫", "ネコ", "名詞", "*"]])
            .with("犬", &[&["犬", "犬", "イヌ", "名詞", "*"]])
            .with("鳥", &[&["鳥", "鳥", "トリ", "名詞", "*"]]);
        let config = MecabConfig::default().with_cache_capacity(2);
        let mecab = Mecab::with_analyzer(replay, &config);
        for expr in ["猫", "犬", "鳥"] {
            mecab.translate(expr).expect("replayed");
        }
        assert_eq!(mecab.cache_capacity(), 2);
        assert_eq!(mecab.cached_len(), 2);

        mecab.translate("猫").expect("replayed");
        assert_eq!(mecab.analyzer().calls(), 4);

        mecab.set_cache_capacity(1);
        assert_eq!(mecab.cached_len(), 1);
    }
}
