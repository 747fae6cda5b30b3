//! Word-limit enforcement for generated text.
//!
//! A "word" is any run of non-whitespace characters, so hyphenated or
//! punctuated tokens count once each.

/// Hard cap on the number of words returned to callers.
pub const MAX_WORDS: usize = 20;

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Cap `text` at `limit` words.
///
/// Text within the limit is returned trimmed but otherwise untouched. Longer
/// text is cut to its first `limit` words joined by single spaces.
pub fn cap_words(text: &str, limit: usize) -> String {
    if word_count(text) > limit {
        text.split_whitespace()
            .take(limit)
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        text.trim().to_string()
    }
}
