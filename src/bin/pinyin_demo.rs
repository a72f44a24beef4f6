// Minimal harness printing a few inputs under every tone style
// Run with: cargo run --bin pinyin_demo
// src/bin/pinyin_demo.rs
use pinyin_core::{flatten, ToneStyle, Transliterator, TransliterationConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    let transliterator = match Transliterator::builtin() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let test_cases = ["中国人", "明月几时有", "A1 你", "嗯", "欸", "绿女", "我的家", "小猫喜欢吃鱼"];
    for text in test_cases.iter() {
        for style in ToneStyle::ALL {
            for heteronyms in [false, true] {
                let config = TransliterationConfig::new(style, heteronyms);
                let groups = transliterator.transliterate(text, &config);
                println!("{} [{}, heteronyms={}] => {:?}", text, style, heteronyms, flatten(&groups));
            }
        }
        let lazy = transliterator.lazy(text, &TransliterationConfig::default());
        println!("{} [lazy] => {}", text, lazy.join(" "));
    }
    ExitCode::SUCCESS
}
