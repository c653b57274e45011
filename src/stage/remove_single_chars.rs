use crate::{
    context::{Context, WordClass},
    stage::{Stage, replace_all_cow},
    testing::stage_contract::StageTestConfig,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref SINGLE_UNICODE: Regex = Regex::new(r"\b\w\b").unwrap();
    static ref SINGLE_ASCII: Regex = Regex::new(r"\b[0-9A-Za-z_]\b").unwrap();
}

#[inline(always)]
fn pattern(class: WordClass) -> &'static Regex {
    match class {
        WordClass::Unicode => &SINGLE_UNICODE,
        WordClass::Ascii => &SINGLE_ASCII,
    }
}

/// Removes words made of exactly one word character (`a`, `I`, `x` in `x-ray`).
///
/// The removed character is replaced according to
/// [`Context::single_char_gap`](crate::context::SingleCharGap): a space by
/// default, or nothing. After whitespace collapsing both give the same tokens;
/// only the intermediate text differs.
///
/// Word boundaries are always Unicode-aware, so under [`WordClass::Ascii`] the
/// `a` in `éa` is not a standalone word.
pub struct RemoveSingleChars;

impl Stage for RemoveSingleChars {
    fn name(&self) -> &'static str {
        "remove_single_chars"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        pattern(ctx.word_class).is_match(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        replace_all_cow(
            pattern(ctx.word_class),
            text,
            ctx.single_char_gap.replacement(),
        )
    }
}

impl StageTestConfig for RemoveSingleChars {
    fn samples(_class: WordClass) -> &'static [&'static str] {
        &["Hello World 123", "a b c", "I am here", "x-ray", "é ok", "ab cd", ""]
    }

    fn should_pass_through(_class: WordClass) -> &'static [&'static str] {
        &["hello", "ab cd", "room  ", ""]
    }

    fn should_transform(class: WordClass) -> &'static [(&'static str, &'static str)] {
        match class {
            WordClass::Unicode => &[
                ("a b test", "    test"),
                ("I am here", "  am here"),
                ("x-ray", " -ray"),
                ("é ok", "  ok"),
            ],
            WordClass::Ascii => &[
                ("a b test", "    test"),
                ("I am here", "  am here"),
                ("x-ray", " -ray"),
                ("é ok", "é ok"),
            ],
        }
    }
}
