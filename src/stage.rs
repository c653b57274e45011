//! Core text-cleaning stage abstraction.
//!
//! Every character-level step of the cleaning pipeline is a [`Stage`]: a pure
//! `text -> text` transform over `Cow<str>`. A stage that has nothing to do
//! hands its input back untouched, so a clean document flows through the whole
//! pipeline without a single allocation.
//!
//! Stages are total. They never fail on well-formed `str` input, including the
//! empty string, unterminated markup and mixed scripts.

pub mod collapse_whitespace;
pub mod extract_html_text;
pub mod remove_single_chars;
pub mod strip_digits;
pub mod strip_punctuation;
pub mod strip_tags;

use crate::context::Context;
use regex::Regex;
use std::borrow::Cow;

/// A single cleaning step.
pub trait Stage: Send + Sync {
    /// Human-readable name, used in logs and test failures.
    fn name(&self) -> &'static str;

    /// Fast pre-check. Returning `false` skips the whole stage and must mean
    /// that `apply` would return its input unchanged.
    fn needs_apply(&self, text: &str, ctx: &Context) -> bool;

    /// Allocation-aware transformation. Must always be correct, even when
    /// called without consulting `needs_apply` first.
    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str>;
}

/// `Regex::replace_all` that keeps the input `Cow` (borrowed or owned) when
/// nothing matched.
pub(crate) fn replace_all_cow<'a>(re: &Regex, text: Cow<'a, str>, rep: &str) -> Cow<'a, str> {
    match text {
        Cow::Borrowed(s) => re.replace_all(s, rep),
        Cow::Owned(s) => {
            let replaced = match re.replace_all(&s, rep) {
                Cow::Owned(r) => Some(r),
                Cow::Borrowed(_) => None,
            };
            Cow::Owned(replaced.unwrap_or(s))
        }
    }
}
