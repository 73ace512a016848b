use std::sync::LazyLock;

use regex::Regex;

use crate::config::{SECONDS_PER_IMAGE, WORDS_PER_MINUTE};

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("IMAGE_RE should compile"));
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("CODE_FENCE_RE should compile"));

/// Breakdown behind a reading time estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReadingStats {
    pub words: usize,
    pub images: usize,
    pub code_words: usize,
    pub minutes: u32,
}

/// Whole minutes needed to read `content`, rounded up.
pub fn estimate_reading_time(content: &str) -> u32 {
    reading_stats(content).minutes
}

pub fn reading_stats(content: &str) -> ReadingStats {
    let words = content.split_whitespace().count();
    let images = IMAGE_RE.find_iter(content).count();

    let code_words = CODE_FENCE_RE
        .find_iter(content)
        .map(|m| m.as_str().split_whitespace().count())
        .sum::<usize>();

    // Code reads at half the prose rate.
    let code_wpm = WORDS_PER_MINUTE / 2.0;
    let total = words as f64 / WORDS_PER_MINUTE
        + images as f64 * SECONDS_PER_IMAGE / 60.0
        + code_words as f64 / code_wpm;

    ReadingStats {
        words,
        images,
        code_words,
        minutes: total.ceil() as u32,
    }
}
