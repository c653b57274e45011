//! Token-level steps of the pipeline: split, fold, dedupe, order.
//!
//! These run after the character-level [stages](crate::stage) have reduced the
//! text to space-separated words. Each is a plain function so it can be tested
//! and reused on its own; [`TokenSet::from_text`] chains them.

use crate::format::{self, OutputFormat};
use icu_normalizer::{ComposingNormalizer, ComposingNormalizerBorrowed};
use std::{collections::HashSet, sync::LazyLock};

static NFKC: LazyLock<ComposingNormalizerBorrowed> =
    LazyLock::new(ComposingNormalizer::new_nfkc);

/// Split on whitespace into non-empty tokens. Empty or blank input yields no
/// tokens at all.
#[inline]
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Lower-case every token. Locale-independent: `I` always becomes `i`.
pub fn fold_case<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens.iter().map(|t| fold_token(t.as_ref())).collect()
}

/// Capitals without a lower-case mapping of their own (`𝐀`, `𝔄`) are folded
/// through their NFKC compatibility form. Negative circled and squared Latin
/// capitals (`🅐`, `🅰`) have neither and stay as they are.
fn fold_token(token: &str) -> String {
    let lower = token.to_lowercase();
    if !lower.chars().any(char::is_uppercase) {
        return lower;
    }
    NFKC.normalize(&lower).to_lowercase()
}

/// Keep the first occurrence of every token, drop the rest.
pub fn dedupe(tokens: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(tokens.len());
    tokens
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Sort ascending by code point.
pub fn order(mut tokens: Vec<String>) -> Vec<String> {
    tokens.sort_unstable();
    tokens
}

/// The pipeline's final product: unique, lower-case tokens in ascending
/// code-point order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Tokenize, fold, dedupe and order already-stripped text.
    pub fn from_text(text: &str) -> Self {
        let folded = fold_case(&tokenize(text));
        Self {
            tokens: order(dedupe(folded)),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens
            .binary_search_by(|t| t.as_str().cmp(token))
            .is_ok()
    }

    pub fn render(&self, format: OutputFormat) -> String {
        format::render(&self.tokens, format)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
