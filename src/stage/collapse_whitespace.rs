use crate::{
    context::{Context, WordClass},
    stage::Stage,
    testing::stage_contract::StageTestConfig,
};
use memchr::memmem;
use std::borrow::Cow;

/// Collapse every whitespace run into a single ASCII space.
///
/// | Flag   | Effect when enabled                              |
/// |--------|--------------------------------------------------|
/// | `trim` | leading and trailing whitespace is dropped       |
///
/// Whitespace is Unicode `White_Space=Yes` (tabs, newlines, NBSP, U+3000, …).
/// Every recognized run, whatever its length or characters, is emitted as one
/// `' '`; a lone `' '` is the only whitespace that survives untouched.
///
/// One pass, at most one allocation, zero-copy when the text is already
/// collapsed.
#[derive(Debug, Clone, Copy)]
pub struct CollapseWhitespace {
    pub trim: bool,
}

/// Collapse runs and trim both ends (the cleaning pipeline default).
pub const COLLAPSE_AND_TRIM: CollapseWhitespace = CollapseWhitespace { trim: true };

/// Collapse runs, keep a single space at either end.
pub const COLLAPSE_ONLY: CollapseWhitespace = CollapseWhitespace { trim: false };

impl Default for CollapseWhitespace {
    fn default() -> Self {
        COLLAPSE_AND_TRIM
    }
}

impl Stage for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "collapse_whitespace"
    }

    fn needs_apply(&self, text: &str, _ctx: &Context) -> bool {
        if text.is_empty() {
            return false;
        }
        if self.trim
            && (text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace))
        {
            return true;
        }
        if memmem::find(text.as_bytes(), b"  ").is_some() {
            return true;
        }
        if text.is_ascii() {
            return text
                .bytes()
                .any(|b| b != b' ' && (b.is_ascii_whitespace() || b == 0x0B));
        }
        let mut prev_ws = false;
        for c in text.chars() {
            let is_ws = c.is_whitespace();
            if is_ws && (c != ' ' || prev_ws) {
                return true;
            }
            prev_ws = is_ws;
        }
        false
    }

    fn apply<'a>(&self, text: Cow<'a, str>, ctx: &Context) -> Cow<'a, str> {
        if !self.needs_apply(&text, ctx) {
            return text;
        }
        let mut result = String::with_capacity(text.len());
        let mut started = false;
        let mut pending_ws = false;
        for c in text.chars() {
            if c.is_whitespace() {
                pending_ws = true;
                continue;
            }
            if pending_ws && (started || !self.trim) {
                result.push(' ');
            }
            pending_ws = false;
            result.push(c);
            started = true;
        }
        if pending_ws && !self.trim {
            result.push(' ');
        }
        Cow::Owned(result)
    }
}

impl StageTestConfig for CollapseWhitespace {
    fn samples(_class: WordClass) -> &'static [&'static str] {
        &[
            "   hello\tworld  \n\r   ",
            "hello\u{00A0}\u{2003}\u{3000}world",
            "a   b\t\tc\n\nd   e",
            "hello world",
            "  clean text  ",
            "\u{000B}vt",
            "line1\nline2",
            "   ",
            "",
        ]
    }

    fn should_pass_through(_class: WordClass) -> &'static [&'static str] {
        &["hello", "hello world", "a b c d", "日本 語", ""]
    }

    fn should_transform(_class: WordClass) -> &'static [(&'static str, &'static str)] {
        &[
            ("   hello\tworld  \n\r   ", "hello world"),
            ("a   b\t\tc\n\nd   e", "a b c d e"),
            ("hello\u{00A0}\u{2003}\u{3000}world", "hello world"),
            ("line1\nline2", "line1 line2"),
            ("   ", ""),
        ]
    }
}
