use crate::{
    context::{Context, WordClass},
    stage::Stage,
    testing::stage_contract::StageTestConfig,
};
use memchr::{memchr, memchr_iter};
use std::{borrow::Cow, iter::Peekable, str::Chars};

/// Upper bound on decoding rounds for nested escapes like `&amp;amp;lt;`.
const MAX_DECODE_ROUNDS: usize = 8;

#[inline(always)]
fn contains_entities(text: &str) -> bool {
    memchr(b'&', text.as_bytes()).is_some()
}

/// A `<` that opens a tag, closing tag, comment, declaration or processing
/// instruction. Any other `<` is plain text (`a < b`, `<3`).
#[inline(always)]
fn opens_markup(next: Option<char>) -> bool {
    next.is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'))
}

fn contains_markup(text: &str) -> bool {
    let bytes = text.as_bytes();
    memchr_iter(b'<', bytes).any(|i| opens_markup(bytes.get(i + 1).map(|&b| b as char)))
}

/// Decode entities until nothing changes, so a second pass finds none left.
fn decode_entities(text: &str) -> Option<String> {
    if !contains_entities(text) {
        return None;
    }
    let mut current: Option<String> = None;
    for _ in 0..MAX_DECODE_ROUNDS {
        let source = current.as_deref().unwrap_or(text);
        if !contains_entities(source) {
            break;
        }
        let mut decoded = String::with_capacity(source.len());
        html_escape::decode_html_entities_to_string(source, &mut decoded);
        if decoded == source {
            break;
        }
        current = Some(decoded);
    }
    current
}

/// Pulls the visible text out of an HTML or XML page.
///
/// Entities are decoded first (nested escapes included), so escaped markup is
/// treated like real markup. Then:
/// - every tag, declaration and comment is replaced by a single space, so
///   `<p>a</p><p>b</p>` keeps `a` and `b` apart
/// - a `<` not followed by a letter, `/`, `!` or `?` is text and stays
/// - `<script>` and `<style>` elements are dropped together with their content
/// - `<![CDATA[ … ]]>` content is kept, with a space in place of the markers
/// - an unterminated tag swallows the rest of the input
///
/// Used ahead of the word pipeline for fetched web pages; plain documents
/// skip it and rely on [`StripTags`](super::strip_tags::StripTags) alone.
pub struct ExtractHtmlText;

impl Stage for ExtractHtmlText {
    fn name(&self) -> &'static str {
        "extract_html_text"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
        contains_markup(text) || decode_entities(text).is_some()
    }

    fn apply<'a>(&self, text: Cow<'a, str>, _ctx: &Context) -> Cow<'a, str> {
        let decoded = match decode_entities(&text) {
            Some(decoded) => Cow::Owned(decoded),
            None => text,
        };
        if !contains_markup(&decoded) {
            return decoded;
        }
        Cow::Owned(strip_markup(&decoded))
    }
}

#[derive(Debug, Clone)]
enum ParseState {
    Text,
    Tag,
    Comment,
    Cdata,
    ScriptOrStyle(String),
}

fn strip_markup(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut chars = html.chars().peekable();
    let mut state = ParseState::Text;

    while let Some(c) = chars.next() {
        match state {
            ParseState::Text => {
                if c != '<' {
                    result.push(c);
                    continue;
                }
                let next = chars.peek().copied();
                if !opens_markup(next) {
                    result.push(c);
                    continue;
                }
                result.push(' ');
                state = match next {
                    Some('!') if lookahead_is(&chars, "!--") => {
                        skip(&mut chars, 3);
                        ParseState::Comment
                    }
                    Some('!') if lookahead_is(&chars, "![CDATA[") => {
                        skip(&mut chars, 8);
                        ParseState::Cdata
                    }
                    Some('s') | Some('S') => {
                        let tag_name = peek_tag_name(&chars);
                        if tag_name.eq_ignore_ascii_case("script")
                            || tag_name.eq_ignore_ascii_case("style")
                        {
                            // Rest of the opening tag, attributes included
                            for ch in chars.by_ref() {
                                if ch == '>' {
                                    break;
                                }
                            }
                            ParseState::ScriptOrStyle(tag_name)
                        } else {
                            ParseState::Tag
                        }
                    }
                    _ => ParseState::Tag,
                };
            }

            ParseState::Tag => {
                if c == '>' {
                    state = ParseState::Text;
                }
            }

            ParseState::Comment => {
                if c == '-' && lookahead_is(&chars, "->") {
                    skip(&mut chars, 2);
                    state = ParseState::Text;
                }
            }

            ParseState::Cdata => {
                if c == ']' && lookahead_is(&chars, "]>") {
                    skip(&mut chars, 2);
                    result.push(' ');
                    state = ParseState::Text;
                } else if c == '<' {
                    result.push(' ');
                } else {
                    result.push(c);
                }
            }

            ParseState::ScriptOrStyle(ref tag_name) => {
                if c == '<' && chars.peek() == Some(&'/') {
                    let mut closing = chars.clone();
                    closing.next();
                    if check_closing_tag(&closing, tag_name) {
                        let tag_len = tag_name.len();
                        skip(&mut chars, 1 + tag_len);
                        // Tag state consumes the closing '>'
                        state = ParseState::Tag;
                    }
                }
            }
        }
    }
    result
}

#[inline(always)]
fn skip(chars: &mut Peekable<Chars>, n: usize) {
    for _ in 0..n {
        chars.next();
    }
}

/// Whether the upcoming chars start with `expected`, without consuming them.
fn lookahead_is(chars: &Peekable<Chars>, expected: &str) -> bool {
    let mut ahead = chars.clone();
    expected.chars().all(|e| ahead.next() == Some(e))
}

/// Tag name (ASCII letters only) without consuming it.
fn peek_tag_name(chars: &Peekable<Chars>) -> String {
    chars
        .clone()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect()
}

/// Whether the upcoming chars spell `tag_name`, case-insensitively.
fn check_closing_tag(chars: &Peekable<Chars>, tag_name: &str) -> bool {
    let mut ahead = chars.clone();
    tag_name
        .chars()
        .all(|expected| ahead.next().is_some_and(|c| c.eq_ignore_ascii_case(&expected)))
}

impl StageTestConfig for ExtractHtmlText {
    fn samples(_class: WordClass) -> &'static [&'static str] {
        &[
            "<p>Hello &amp; world</p>",
            "Price: &euro;99",
            "<script>alert(1)</script>",
            "Normal text with > and & in prose &amp; such",
            "<div class=\"test\">content</div>",
            "<![CDATA[preserve this]]>",
            "<![CDATA[if a<b then]]>",
            "&amp;lt;b&amp;gt;bold",
            "I <3 markup < prose",
            "plain text",
            "",
        ]
    }

    fn should_pass_through(_class: WordClass) -> &'static [&'static str] {
        &["hello", "abc def", "a < b and c", "<3 <", "fish & chips", ""]
    }

    fn should_transform(_class: WordClass) -> &'static [(&'static str, &'static str)] {
        &[
            ("<p>a</p><p>b</p>", " a  b "),
            ("caf&eacute;", "café"),
            ("<style>body { color: red; }</style>text", " text"),
            ("<!-- if x > 5 then --> visible", "  visible"),
            ("<div class=\"test", " "),
            ("<p>price < cost and more words</p>", " price < cost and more words "),
            ("&amp;lt;b&amp;gt;bold", " bold"),
            ("<?xml version=\"1.0\"?><r>x</r>", "  x "),
        ]
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;
    use crate::assert_stage_contract;

    #[test]
    fn universal_contract_compliance() {
        assert_stage_contract!(ExtractHtmlText);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(s: &str) -> String {
        ExtractHtmlText
            .apply(Cow::Borrowed(s), &Context::default())
            .into_owned()
    }

    #[test]
    fn script_content_is_dropped() {
        assert_eq!(
            extract("<script src=\"x.js\">alert('<tag>');</script>text"),
            " text"
        );
    }

    #[test]
    fn escaped_script_is_decoded_then_dropped() {
        assert_eq!(
            extract("&lt;script&gt;alert(1)&lt;/script&gt;").trim(),
            ""
        );
    }

    #[test]
    fn cdata_content_is_kept() {
        assert_eq!(extract("<![CDATA[keep me]]>after"), " keep me after");
        assert_eq!(extract("<![CDATA[a<b]]>"), " a b ");
    }

    #[test]
    fn nested_tags_leave_only_text() {
        assert_eq!(
            extract("<div><p><span>nested</span></p></div>")
                .split_whitespace()
                .collect::<Vec<_>>(),
            ["nested"]
        );
    }

    #[test]
    fn bare_ampersand_is_untouched() {
        let input = "fish & chips";
        assert!(!ExtractHtmlText.needs_apply(input, &Context::default()));
        assert_eq!(extract(input), input);
    }

    #[test]
    fn bare_less_than_is_text() {
        let words = |s: &str| {
            extract(s)
                .split_whitespace()
                .map(str::to_owned)
                .collect::<Vec<_>>()
        };
        assert_eq!(
            words("<p>price < cost and more words</p>"),
            ["price", "<", "cost", "and", "more", "words"]
        );
        assert_eq!(words("I <3 it"), ["I", "<3", "it"]);
        assert_eq!(words("trailing <"), ["trailing", "<"]);
    }

    #[test]
    fn nested_escapes_decode_in_one_pass() {
        let once = extract("&amp;lt;b&amp;gt;bold");
        assert_eq!(once, " bold");
        assert!(!ExtractHtmlText.needs_apply(&once, &Context::default()));
    }
}
