//! Where raw text comes from: local files and web pages.
//!
//! Everything here is I/O glue around the pure cleaning pipeline. A source is
//! read once, decoded to UTF-8 and handed over as a [`Document`].

pub mod http;
pub mod stats;

use crate::format::OutputFormat;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use lazy_static::lazy_static;
use regex::Regex;
use stats::SourceStats;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open `{path}`: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("this error happened while processing the requested URL `{url}`: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("requested URL `{url}` answered with status {status}")]
    Status { url: String, status: u16 },
    #[error(
        "requested URL has different content than text, xml or json (content type: `{content_type}`)"
    )]
    UnsupportedContentType { content_type: String },
}

/// A source argument, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
}

lazy_static! {
    static ref URL_PREFIX: Regex = Regex::new(r"(https?://)?(www\.)?").unwrap();
}

impl Source {
    /// Anything starting with `http` is a URL, everything else a file path.
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http") {
            Source::Url(arg.to_string())
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Output file used when none is given on the command line.
    ///
    /// - `notes/text.txt` → `notes/text_cleaned.csv`
    /// - `https://www.example.com/docs/page` → `example.com_docs_page.csv`
    pub fn default_output(&self, format: OutputFormat) -> PathBuf {
        match self {
            Source::File(path) => {
                let mut name = path.with_extension("").into_os_string();
                name.push(format!("_cleaned.{}", format.extension()));
                PathBuf::from(name)
            }
            Source::Url(url) => {
                let bare = URL_PREFIX.replacen(url, 1, "");
                PathBuf::from(format!("{}.{}", bare.replace('/', "_"), format.extension()))
            }
        }
    }

    pub fn display(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }
}

/// Decoded source text plus what is known about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub text: String,
    /// HTML or XML that should go through full text extraction first.
    pub markup: bool,
    pub stats: SourceStats,
}

/// Read and decode a local file.
pub fn read_file(path: &Path) -> Result<Document, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let text = decode(&bytes, None);
    let stats = SourceStats::measure(bytes.len() as u64, &text);
    debug!(path = %path.display(), size = bytes.len(), lines = stats.lines, words = stats.words, "read source file");
    Ok(Document {
        text,
        markup: false,
        stats,
    })
}

/// Decode bytes to UTF-8.
///
/// A byte-order mark wins, then a declared charset label, then UTF-8 when the
/// bytes are valid UTF-8, and Windows-1252 as the last resort (it maps every
/// byte, so decoding never fails).
pub fn decode(bytes: &[u8], declared: Option<&str>) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        debug!(encoding = encoding.name(), "decoding by byte-order mark");
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return text.into_owned();
    }
    if let Some(encoding) = declared.and_then(|label| Encoding::for_label(label.as_bytes())) {
        debug!(encoding = encoding.name(), "decoding by declared charset");
        let (text, _, _) = encoding.decode(bytes);
        return text.into_owned();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            debug!(encoding = UTF_8.name(), "decoding as UTF-8");
            text.to_owned()
        }
        Err(_) => {
            debug!(encoding = WINDOWS_1252.name(), "not UTF-8, falling back");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}
