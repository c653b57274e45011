use crate::{
    context::{Context, WordClass},
    stage::{Stage, replace_all_cow},
    testing::stage_contract::StageTestConfig,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref NON_WORD_UNICODE: Regex = Regex::new(r"[^\w\s]").unwrap();
    static ref NON_WORD_ASCII: Regex = Regex::new(r"[^0-9A-Za-z_\s]").unwrap();
}

#[inline(always)]
fn pattern(class: WordClass) -> &'static Regex {
    match class {
        WordClass::Unicode => &NON_WORD_UNICODE,
        WordClass::Ascii => &NON_WORD_ASCII,
    }
}

/// Replaces every character that is neither a word character nor whitespace
/// with a space, one space per character.
///
/// Word characters are letters, digits and `_`. Under [`WordClass::Unicode`]
/// that includes every script (`café`, `москва`, `東京` survive); under
/// [`WordClass::Ascii`] only `[0-9A-Za-z_]` does, so accented and non-Latin
/// letters turn into separators too.
pub struct StripPunctuation;

impl Stage for StripPunctuation {
    fn name(&self) -> &'static str {
        "strip_punctuation"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        pattern(ctx.word_class).is_match(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        replace_all_cow(pattern(ctx.word_class), text, " ")
    }
}

impl StageTestConfig for StripPunctuation {
    fn samples(_class: WordClass) -> &'static [&'static str] {
        &[
            "Hello, World!",
            "test-case.",
            "snake_case stays",
            "$100 & 50%",
            " déjà-vu ",
            "¿Qué?",
            "",
        ]
    }

    fn should_pass_through(_class: WordClass) -> &'static [&'static str] {
        &["hello", "abc def", "snake_case", "tab\tand\nnewline", "room101", ""]
    }

    fn should_transform(class: WordClass) -> &'static [(&'static str, &'static str)] {
        match class {
            WordClass::Unicode => &[
                ("Hello, World!", "Hello  World "),
                ("test-case.", "test case "),
                ("café, crème", "café  crème"),
                ("Москва!", "Москва "),
            ],
            WordClass::Ascii => &[
                ("Hello, World!", "Hello  World "),
                ("test-case.", "test case "),
                ("café, crème", "caf   cr me"),
                ("Москва!", "       "),
            ],
        }
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(StripPunctuation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_punctuation_char_becomes_one_space() {
        let ctx = Context::default();
        let out = StripPunctuation.apply(Cow::Borrowed("a...b"), &ctx);
        assert_eq!(out, "a   b");
    }

    #[test]
    fn underscore_is_a_word_character() {
        let ctx = Context::new(WordClass::Ascii);
        assert!(!StripPunctuation.needs_apply("__init__", &ctx));
    }

    #[test]
    fn unicode_digits_survive_unicode_class() {
        let ctx = Context::default();
        assert!(!StripPunctuation.needs_apply("٣٤٥", &ctx));
    }
}
