//! Text normalization for incoming messages.
//!
//! A normalizer turns raw chat/e-mail text into lowercase alphabetic tokens
//! with stop words removed. The recommender only depends on the
//! [`TextNormalizer`] trait, so a different language model can be plugged in
//! without touching scoring.

use crate::stop_words::ENGLISH_STOP_WORDS;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::trace;

/// Chunks that are e-mail addresses or URLs. These carry no topic and
/// would otherwise split into junk words (`john`, `example`, `com`).
static ADDRESS_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)@|^[<(\[]*[a-z][a-z0-9+.-]*://|^[<(\[]*www\.").expect("address pattern is a valid regex")
});

/// Converts raw text into a normalized token sequence.
///
/// Must never fail: text in a language the normalizer doesn't model is
/// passed through as best it can (possibly as an empty sequence).
pub trait TextNormalizer: Send + Sync {
    /// Returns the name of this normalizer (for logging/debugging)
    fn name(&self) -> &str;

    /// Lowercase, alphabetic-only, stop-word-free tokens in input order
    fn normalize(&self, text: &str) -> Vec<String>;
}

/// Normalize and join tokens with single spaces.
pub fn normalize_to_string(normalizer: &dyn TextNormalizer, text: &str) -> String {
    normalizer.normalize(text).join(" ")
}

/// Default normalizer: whitespace + punctuation tokenization and an
/// English stop-word list.
///
/// ## Tokenization
/// 1. Split on whitespace
/// 2. Drop chunks that look like e-mail addresses or URLs
/// 3. Split each chunk at punctuation (hyphens, slashes, brackets, ...)
/// 4. Drop clitics after an apostrophe (`manager's` -> `manager`,
///    `don't` -> `do`)
/// 5. Keep a token only if every character is alphabetic
/// 6. Lowercase and drop stop words
///
/// Scripts other than Latin (e.g. Arabic) survive steps 1-4 unchanged;
/// there is no stop-word list for them.
#[derive(Debug, Clone)]
pub struct StopWordNormalizer {
    stop_words: HashSet<String>,
}

impl StopWordNormalizer {
    /// Create a normalizer with the built-in English stop words
    pub fn new() -> Self {
        Self::with_stop_words(ENGLISH_STOP_WORDS.iter().copied())
    }

    /// Create a normalizer with a custom stop-word list (matched lowercase)
    pub fn with_stop_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            stop_words: words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Add extra stop words on top of the current list (builder pattern)
    pub fn with_extra_stop_words<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.stop_words.extend(words.into_iter().map(str::to_lowercase));
        self
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

impl Default for StopWordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer for StopWordNormalizer {
    fn name(&self) -> &str {
        "StopWordNormalizer"
    }

    fn normalize(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = text
            .split_whitespace()
            .filter(|chunk| !is_address_like(chunk))
            .flat_map(split_punctuation)
            .filter_map(strip_clitic)
            .filter(|token| token.chars().all(char::is_alphabetic))
            .map(|token| token.to_lowercase())
            .filter(|token| !self.is_stop_word(token))
            .collect();

        trace!("Normalized {} chars into {} tokens", text.len(), tokens.len());
        tokens
    }
}

fn is_address_like(chunk: &str) -> bool {
    ADDRESS_LIKE.is_match(chunk)
}

fn is_apostrophe(c: char) -> bool {
    c == '\'' || c == '\u{2019}'
}

/// Split a whitespace-free chunk into pieces at punctuation. Apostrophes
/// stay attached so clitics can be handled afterwards.
fn split_punctuation(chunk: &str) -> impl Iterator<Item = &str> {
    chunk
        .split(|c: char| !(c.is_alphanumeric() || is_apostrophe(c)))
        .filter(|piece| !piece.is_empty())
}

/// Keep the stem before an apostrophe; `n't` contractions lose their `n`.
fn strip_clitic(piece: &str) -> Option<&str> {
    let piece = piece.trim_matches(is_apostrophe);
    let stem = match piece.find(is_apostrophe) {
        Some(idx) => {
            let (head, tail) = piece.split_at(idx);
            let tail = tail.trim_start_matches(is_apostrophe);
            if tail.eq_ignore_ascii_case("t") && head.len() > 1 && head.to_lowercase().ends_with('n') {
                &head[..head.len() - 1]
            } else {
                head
            }
        }
        None => piece,
    };
    (!stem.is_empty()).then_some(stem)
}
