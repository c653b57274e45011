use crate::{
    process::Process,
    profile::Profile,
    stage::{
        collapse_whitespace::COLLAPSE_AND_TRIM, extract_html_text::ExtractHtmlText,
        remove_single_chars::RemoveSingleChars, strip_digits::StripDigits,
        strip_punctuation::StripPunctuation, strip_tags::StripTags,
    },
};

/// The canonical word-list cleaning sequence:
/// tags → punctuation → digits → single chars → whitespace.
pub fn words() -> Profile<impl Process> {
    Profile::builder("words")
        .add_stage(StripTags)
        .add_stage(StripPunctuation)
        .add_stage(StripDigits)
        .add_stage(RemoveSingleChars)
        .add_stage(COLLAPSE_AND_TRIM)
        .build()
}

/// [`words`] preceded by full HTML text extraction, for fetched web pages:
/// script and style content never reaches the word list.
pub fn web_page() -> Profile<impl Process> {
    Profile::builder("web_page")
        .add_stage(ExtractHtmlText)
        .add_stage(StripTags)
        .add_stage(StripPunctuation)
        .add_stage(StripDigits)
        .add_stage(RemoveSingleChars)
        .add_stage(COLLAPSE_AND_TRIM)
        .build()
}
