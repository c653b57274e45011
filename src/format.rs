use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// How a token list is rendered to text.
///
/// Deserializes through [`OutputFormat::from_selector`], so configuration
/// accepts the same lenient values as `-f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OutputFormat {
    /// `a, b, c` on one line.
    #[default]
    Csv,
    /// One token per line.
    Txt,
}

impl OutputFormat {
    /// Case-insensitive. Anything other than `txt` selects [`OutputFormat::Csv`].
    pub fn from_selector(selector: &str) -> Self {
        if selector.trim().eq_ignore_ascii_case("txt") {
            OutputFormat::Txt
        } else {
            OutputFormat::Csv
        }
    }

    pub fn separator(self) -> &'static str {
        match self {
            OutputFormat::Csv => ", ",
            OutputFormat::Txt => "\n",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Txt => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_selector(s))
    }
}

impl From<String> for OutputFormat {
    fn from(selector: String) -> Self {
        Self::from_selector(&selector)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Join `tokens` with the separator of `format`. No trailing separator.
pub fn render<S: AsRef<str>>(tokens: &[S], format: OutputFormat) -> String {
    let sep = format.separator();
    let capacity = tokens.iter().map(|t| t.as_ref().len()).sum::<usize>()
        + sep.len() * tokens.len().saturating_sub(1);
    let mut out = String::with_capacity(capacity);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        out.push_str(token.as_ref());
    }
    out
}
