//! Prints furigana for each command-line argument.
//!
//! ```text
//! RUST_LOG=furigana_rs=debug cargo run --example reading -- 昨日すき焼きを食べました
//! ```

use furigana_rs::{Mecab, MecabConfig};
use tracing_subscriber::EnvFilter;

const SAMPLES: &[&str] = &[
    "カリン、自分でまいた種は自分で刈り取れ",
    "昨日、林檎を2個買った。",
    "真莉、大好きだよん＾＾",
    "彼二千三百六十円も使った。",
    "二人の美人",
    "詳細はお気軽にお問い合わせ下さい。",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let mecab = Mecab::from_config(MecabConfig::default().with_cache_capacity(128))?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    let inputs: Vec<&str> = if args.is_empty() {
        SAMPLES.to_vec()
    } else {
        args.iter().map(String::as_str).collect()
    };

    for input in inputs {
        println!("{}", mecab.reading(input)?);
    }
    Ok(())
}
