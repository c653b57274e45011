// src/context.rs
// Runtime knobs shared by every stage. Tiny, Copy, and free of allocation so it
// can be passed by reference through every hot path.

use serde::{Deserialize, Serialize};

/// Which characters count as "word" characters (and digits) for the
/// punctuation, digit and single-char stages.
///
/// `Unicode` (the default) keeps letters of every script, so `café` and
/// `москва` survive punctuation stripping. `Ascii` treats only `[0-9A-Za-z_]`
/// as word characters and only `[0-9]` as digits; everything else becomes a
/// separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordClass {
    #[default]
    Unicode,
    Ascii,
}

impl WordClass {
    pub const ALL: &'static [WordClass] = &[WordClass::Unicode, WordClass::Ascii];
}

/// What the single-char stage leaves behind in place of a removed character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleCharGap {
    /// Replace with `' '`, like every other stripping stage.
    #[default]
    Space,
    /// Replace with nothing.
    Empty,
}

impl SingleCharGap {
    #[inline(always)]
    pub fn replacement(self) -> &'static str {
        match self {
            SingleCharGap::Space => " ",
            SingleCharGap::Empty => "",
        }
    }
}

/// Runtime context passed to every stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    pub word_class: WordClass,
    pub single_char_gap: SingleCharGap,
}

impl Context {
    #[inline(always)]
    pub fn new(word_class: WordClass) -> Self {
        Self {
            word_class,
            single_char_gap: SingleCharGap::default(),
        }
    }

    #[inline(always)]
    pub fn with_single_char_gap(mut self, gap: SingleCharGap) -> Self {
        self.single_char_gap = gap;
        self
    }
}
