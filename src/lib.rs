pub mod cleaner;
pub mod cli;
pub mod config;
pub mod context;
pub mod format;
pub mod output;
pub mod process;
pub mod profile;
pub mod source;
pub mod stage;
#[doc(hidden)]
pub mod testing;
pub mod token;

pub use cleaner::Cleaner;
pub use context::{Context, SingleCharGap, WordClass};
pub use format::OutputFormat;
pub use stage::Stage;
pub use stage::collapse_whitespace::{COLLAPSE_AND_TRIM, COLLAPSE_ONLY, CollapseWhitespace};
pub use stage::extract_html_text::ExtractHtmlText;
pub use stage::remove_single_chars::RemoveSingleChars;
pub use stage::strip_digits::StripDigits;
pub use stage::strip_punctuation::StripPunctuation;
pub use stage::strip_tags::StripTags;
pub use token::TokenSet;

#[cfg(test)]
mod tests {
    include!("tests/unit.rs");
    include!("tests/integration.rs");
    include!("tests/proptest.rs");
}
