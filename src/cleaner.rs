use crate::{
    context::{Context, SingleCharGap, WordClass},
    process::{DynamicProcess, Process},
    profile::Profile,
    stage::{
        Stage, collapse_whitespace::COLLAPSE_AND_TRIM, remove_single_chars::RemoveSingleChars,
        strip_digits::StripDigits, strip_punctuation::StripPunctuation, strip_tags::StripTags,
    },
    token::TokenSet,
};
use std::borrow::Cow;
use tracing::debug;

/// Turns raw documents into sorted, deduplicated word lists.
///
/// ```
/// use textproc::{Cleaner, OutputFormat};
///
/// let cleaner = Cleaner::new();
/// let words = cleaner.clean("Hello, World! 123 a b test-case.");
/// assert_eq!(words.render(OutputFormat::Csv), "case, hello, test, world");
/// ```
///
/// A `Cleaner` holds no per-document state, so one instance can be shared
/// across threads and reused for any number of documents.
pub struct Cleaner {
    ctx: Context,
    pipeline: DynamicProcess,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl Cleaner {
    /// The canonical pipeline with Unicode word characters.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CleanerBuilder {
        CleanerBuilder::default()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Run only the character-level stages.
    pub fn strip<'a>(&self, text: impl Into<Cow<'a, str>>) -> Cow<'a, str> {
        self.pipeline.process(text.into(), &self.ctx)
    }

    /// Full pipeline: strip, tokenize, fold, dedupe, order.
    pub fn clean(&self, text: &str) -> TokenSet {
        let stripped = self.strip(text);
        let tokens = TokenSet::from_text(&stripped);
        debug!(
            input_len = text.len(),
            tokens = tokens.len(),
            "cleaned document"
        );
        tokens
    }

    /// Full pipeline with the character-level stages taken from `profile`
    /// instead of this cleaner's own.
    pub fn clean_with_profile<P: Process>(&self, profile: &Profile<P>, text: &str) -> TokenSet {
        let stripped = profile.run(Cow::Borrowed(text), &self.ctx);
        let tokens = TokenSet::from_text(&stripped);
        debug!(
            profile = profile.name(),
            input_len = text.len(),
            tokens = tokens.len(),
            "cleaned document"
        );
        tokens
    }
}

pub struct CleanerBuilder {
    ctx: Context,
    stages: Option<DynamicProcess>,
}

impl Default for CleanerBuilder {
    fn default() -> Self {
        Self {
            ctx: Context::default(),
            stages: None,
        }
    }
}

impl CleanerBuilder {
    pub fn word_class(mut self, word_class: WordClass) -> Self {
        self.ctx.word_class = word_class;
        self
    }

    pub fn single_char_gap(mut self, gap: SingleCharGap) -> Self {
        self.ctx.single_char_gap = gap;
        self
    }

    /// Replace the canonical stages with a custom sequence. The first call
    /// starts from an empty pipeline.
    pub fn add_stage<T: Stage + 'static>(mut self, stage: T) -> Self {
        let stages = self.stages.take().unwrap_or_default();
        self.stages = Some(stages.push(stage));
        self
    }

    pub fn build(self) -> Cleaner {
        let pipeline = self.stages.unwrap_or_else(canonical_stages);
        Cleaner {
            ctx: self.ctx,
            pipeline,
        }
    }
}

fn canonical_stages() -> DynamicProcess {
    DynamicProcess::new()
        .push(StripTags)
        .push(StripPunctuation)
        .push(StripDigits)
        .push(RemoveSingleChars)
        .push(COLLAPSE_AND_TRIM)
}
