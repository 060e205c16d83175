//! Reading-time estimate for an article body.
//!
//! Only prose is counted: front matter, code, image syntax and Markdown
//! markers are removed before words are counted.

use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_WORDS_PER_MINUTE: usize = 120;

static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[\s\S]*?---\r?\n").expect("valid regex"));
static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\s\S]*?```").expect("valid regex"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("valid regex"));
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("valid regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid regex"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#{1,6}\s+").expect("valid regex"));
static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("valid regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*[-*+]\s+").expect("valid regex"));
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*\d+\.\s+").expect("valid regex"));

/// Estimate reading time formatted as `"<N> min"`.
///
/// `N` is `ceil(words / words_per_minute)` with no lower bound, so an empty
/// body reads as `"0 min"`. A rate of 0 falls back to
/// [`DEFAULT_WORDS_PER_MINUTE`].
pub fn estimate_reading_time(body: &str, words_per_minute: usize) -> String {
    let wpm = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    };
    let minutes = count_prose_words(body).div_ceil(wpm);
    format!("{minutes} min")
}

/// Count the whitespace-separated words left once Markdown syntax is removed.
pub fn count_prose_words(body: &str) -> usize {
    let text = FRONT_MATTER.replace(body, "");
    let text = FENCED_CODE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    // Images go before links, otherwise their alt text would survive as a link.
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = BULLET.replace_all(&text, "");
    let text = NUMBERED.replace_all(&text, "");
    text.split_whitespace().count()
}
