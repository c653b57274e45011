use crate::{
    context::{Context, WordClass},
    stage::{Stage, replace_all_cow},
    testing::stage_contract::StageTestConfig,
};
use lazy_static::lazy_static;
use memchr::memchr2;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    /// Shortest `<...>` span on one line, or a named / decimal / hex entity.
    static ref TAG_OR_ENTITY: Regex =
        Regex::new(r"<.*?>|&(?:[a-z0-9]+|#[0-9]{1,6}|#x[0-9a-f]{1,6});").unwrap();
}

/// Replaces every markup tag and every HTML entity reference with a space.
///
/// - `<p>`, `</div>`, `<a href="…">` → `' '` (non-greedy: the shortest span wins)
/// - `&amp;`, `&#169;`, `&#x1f600;` → `' '` (entities are dropped, not decoded)
/// - an unterminated `<` stays as literal text for later stages to handle
/// - a tag never spans a line break
///
/// Zero-copy when the input contains neither `<` nor `&`.
pub struct StripTags;

impl Stage for StripTags {
    fn name(&self) -> &'static str {
        "strip_tags"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
        memchr2(b'<', b'&', text.as_bytes()).is_some() && TAG_OR_ENTITY.is_match(text)
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Cow<'a, str> {
        if memchr2(b'<', b'&', text.as_bytes()).is_none() {
            return text;
        }
        replace_all_cow(&TAG_OR_ENTITY, text, " ")
    }
}

impl StageTestConfig for StripTags {
    fn samples(_class: WordClass) -> &'static [&'static str] {
        &[
            "<p>Hello &amp; world</p>",
            "Price: &euro;99",
            "x < y and y > z",
            "<<a>>",
            "<div class=\"test",
            "fish &chips",
            "&#169; &#x1F600;",
            "line one <br\n> line two",
            "",
        ]
    }

    fn should_transform(_class: WordClass) -> &'static [(&'static str, &'static str)] {
        &[
            ("<p>Price: $100</p>", " Price: $100 "),
            ("a&amp;b", "a b"),
            ("&#38;&#x26;", "  "),
            ("<b>bold</b> <i>it</i>", " bold   it "),
            ("unterminated <tag", "unterminated <tag"),
            ("<a<b>c>", " c>"),
        ]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn strip(s: &str) -> String {
        StripTags.apply(Cow::Borrowed(s), &Context::default()).into_owned()
    }

    #[test]
    fn pure_text_is_zero_copy() {
        let input = "Hello world";
        let ctx = Context::default();
        assert!(!StripTags.needs_apply(input, &ctx));
        let out = StripTags.apply(Cow::Borrowed(input), &ctx);
        assert!(matches!(out, Cow::Borrowed(s) if s.as_ptr() == input.as_ptr()));
    }

    #[test]
    fn ampersand_without_entity_is_kept() {
        assert_eq!(strip("salt & pepper"), "salt & pepper");
        assert!(!StripTags.needs_apply("salt & pepper", &Context::default()));
    }

    #[test]
    fn upper_case_entity_names_are_not_entities() {
        assert_eq!(strip("&AMP;"), "&AMP;");
    }

    #[test]
    fn tag_does_not_cross_lines() {
        assert_eq!(strip("a <b\nc> d"), "a <b\nc> d");
    }

    #[test]
    fn numeric_entity_length_is_bounded() {
        assert_eq!(strip("&#1234567;"), "&#1234567;");
        assert_eq!(strip("&#123456;"), " ");
    }

    #[test]
    fn empty_tag_is_a_tag() {
        assert_eq!(strip("a<>b"), "a b");
    }
}
