use crate::{
    context::{Context, WordClass},
    stage::{Stage, replace_all_cow},
    testing::stage_contract::StageTestConfig,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref DIGITS_UNICODE: Regex = Regex::new(r"\d+").unwrap();
    static ref DIGITS_ASCII: Regex = Regex::new(r"[0-9]+").unwrap();
}

#[inline(always)]
fn pattern(class: WordClass) -> &'static Regex {
    match class {
        WordClass::Unicode => &DIGITS_UNICODE,
        WordClass::Ascii => &DIGITS_ASCII,
    }
}

/// Replaces every maximal run of decimal digits with a single space.
///
/// Only the run is removed: `room101` becomes `room ` rather than vanishing.
/// A purely numeric word leaves nothing but whitespace behind.
pub struct StripDigits;

impl Stage for StripDigits {
    fn name(&self) -> &'static str {
        "strip_digits"
    }

    fn needs_apply(&self, text: &str, ctx: &Context) -> bool {
        match ctx.word_class {
            WordClass::Ascii => text.bytes().any(|b| b.is_ascii_digit()),
            WordClass::Unicode => pattern(ctx.word_class).is_match(text),
        }
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        replace_all_cow(pattern(ctx.word_class), text, " ")
    }
}

impl StageTestConfig for StripDigits {
    fn samples(_class: WordClass) -> &'static [&'static str] {
        &["Hello World 123", "room101", "3.14159", "2024-01-01", "no digits", ""]
    }

    fn should_transform(class: WordClass) -> &'static [(&'static str, &'static str)] {
        match class {
            WordClass::Unicode => &[
                ("room101", "room "),
                ("a1b22c333", "a b c "),
                ("42", " "),
                ("٣٤٥ items", "  items"),
            ],
            WordClass::Ascii => &[
                ("room101", "room "),
                ("a1b22c333", "a b c "),
                ("42", " "),
                ("٣٤٥ items", "٣٤٥ items"),
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
        assert_stage_contract!(StripDigits);
    }
}
