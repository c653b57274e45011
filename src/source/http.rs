use super::{Document, SourceError, decode, stats::SourceStats};
use reqwest::{blocking::Client, header::CONTENT_TYPE, redirect::Policy};
use std::time::Duration;
use tracing::{debug, info};

/// Media types that are fetched and cleaned. Anything else is refused.
pub const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "text/plain",
    "text/html",
    "text/xml",
    "text/csv",
    "text/css",
    "application/xml",
    "application/json",
];

/// `text/html; charset=UTF-8` → `text/html`.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// The `charset` parameter of a `Content-Type` header, if any.
pub fn charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Accepts a `Content-Type` header value if its media type is allowed.
pub fn check_content_type(content_type: &str) -> Result<String, SourceError> {
    let media = media_type(content_type);
    if ALLOWED_CONTENT_TYPES.contains(&media.as_str()) {
        Ok(media)
    } else {
        Err(SourceError::UnsupportedContentType {
            content_type: content_type.to_string(),
        })
    }
}

/// HTML and XML bodies need full text extraction.
pub fn is_markup(media: &str) -> bool {
    matches!(media, "text/html" | "text/xml" | "application/xml")
}

/// GET `url` once: no retries, no redirects, bounded by `timeout`.
pub fn fetch(url: &str, timeout: Duration) -> Result<Document, SourceError> {
    let client = Client::builder()
        .timeout(timeout)
        .redirect(Policy::none())
        .build()
        .map_err(SourceError::Client)?;

    info!(url, timeout_secs = timeout.as_secs(), "fetching source");
    let response = client
        .get(url)
        .send()
        .map_err(|source| SourceError::Unreachable {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let media = check_content_type(&content_type)?;

    let body = response
        .bytes()
        .map_err(|source| SourceError::Unreachable {
            url: url.to_string(),
            source,
        })?;
    debug!(url, media = %media, size = body.len(), "received body");

    let text = decode(&body, charset(&content_type));
    let stats = SourceStats::measure(body.len() as u64, &text);
    Ok(Document {
        text,
        markup: is_markup(&media),
        stats,
    })
}
