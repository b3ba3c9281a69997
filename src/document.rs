//! Filing document retrieval and section extraction.
//!
//! Filings arrive as HTML, inline-XBRL HTML, plain XBRL instances or raw
//! text. This module fetches a document, flattens it into canonical text
//! lines, and extracts the span bounded by caller-supplied start and end
//! markers. Marker matching is a case-insensitive substring test against
//! individual lines; the extracted span is start-inclusive, end-exclusive.

use async_trait::async_trait;
use url::Url;

use crate::core::EdgarClient;
use crate::error::{FilingError, Result};
use crate::options::{ExtractOptions, MissingMarkerPolicy};
use crate::parsing::text::{flatten_html, to_lines};
use crate::traits::DocumentOperations;

/// How many leading bytes of a document to sniff for format detection.
const SNIFF_WINDOW: usize = 512;

/// Detected format of a filing document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A plain XBRL instance document.
    Xbrl,
    /// HTML, including inline-XBRL HTML.
    Html,
    /// Anything else; treated as pre-broken text.
    PlainText,
}

/// Classifies a document by URL extension first, then by sniffing its
/// leading content. Defaults to plain text when neither is conclusive.
pub fn detect_kind(url: &str, content: &str) -> DocumentKind {
    let path = url.split(['?', '#']).next().unwrap_or(url).to_lowercase();
    if path.ends_with(".xml") || path.ends_with(".xbrl") {
        return DocumentKind::Xbrl;
    }
    if path.ends_with(".htm") || path.ends_with(".html") {
        return DocumentKind::Html;
    }

    let head: String = content.chars().take(SNIFF_WINDOW).collect::<String>().to_lowercase();
    if head.contains("<?xml") && head.contains("xbrl") {
        DocumentKind::Xbrl
    } else if head.contains("<html") || head.contains("<!doctype html") || head.contains("<body") {
        DocumentKind::Html
    } else {
        DocumentKind::PlainText
    }
}

/// A section extracted from a flattened document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    /// The extracted lines, in document order.
    pub lines: Vec<String>,
    /// The line that matched the start marker, if one was requested and hit.
    pub start_marker: Option<String>,
    /// The line that matched the end marker, if one was requested and hit.
    pub end_marker: Option<String>,
}

impl ExtractedSection {
    /// Joins the section back into a single newline-separated string.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Extracts the span of `lines` bounded by the options' markers.
///
/// The start marker selects the first matching line (inclusive); the end
/// marker is searched from the line after the start and selects the first
/// match (exclusive). A missing start marker falls back to line 0 or errors
/// per [`MissingMarkerPolicy`]; a missing end marker always means "to the
/// end of the document".
pub fn extract_span(lines: &[String], options: &ExtractOptions) -> Result<ExtractedSection> {
    let start = match &options.start_marker {
        Some(marker) => match find_line(lines, 0, marker) {
            Some(idx) => Some(idx),
            None => match options.missing_marker {
                MissingMarkerPolicy::FromStart => {
                    tracing::debug!("start marker {:?} not found, extracting from top", marker);
                    None
                }
                MissingMarkerPolicy::Error => {
                    return Err(FilingError::NoDataFound(format!(
                        "start marker {:?} not found",
                        marker
                    )));
                }
            },
        },
        None => None,
    };
    let start_idx = start.unwrap_or(0);

    // When the start marker matched, the end search begins after it so a
    // marker pair sharing text cannot produce an empty span.
    let end_from = match start {
        Some(idx) => idx + 1,
        None => start_idx,
    };
    let end = options
        .end_marker
        .as_ref()
        .and_then(|marker| find_line(lines, end_from, marker));
    let end_idx = end.unwrap_or(lines.len());

    Ok(ExtractedSection {
        lines: lines[start_idx..end_idx].to_vec(),
        start_marker: start.map(|idx| lines[idx].clone()),
        end_marker: end.map(|idx| lines[idx].clone()),
    })
}

fn find_line(lines: &[String], from: usize, marker: &str) -> Option<usize> {
    let needle = marker.to_lowercase();
    lines[from..]
        .iter()
        .position(|line| line.to_lowercase().contains(&needle))
        .map(|offset| from + offset)
}

/// Unwraps EDGAR's inline-XBRL viewer URLs (`.../ix?doc=/Archives/...`)
/// into the direct document URL they wrap. Other URLs pass through.
pub(crate) fn resolve_inline_viewer(url: &str) -> Result<String> {
    let parsed = EdgarClient::ensure_absolute_url(url)?;
    if !parsed.path().ends_with("/ix") && parsed.path() != "/ix" {
        return Ok(url.to_string());
    }
    let Some((_, doc)) = parsed.query_pairs().find(|(key, _)| key == "doc") else {
        return Ok(url.to_string());
    };
    let base = Url::parse(&format!("{}://{}", parsed.scheme(), parsed.authority()))
        .map_err(|e| FilingError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
    let resolved = base.join(&doc).map_err(|e| FilingError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(resolved.to_string())
}

#[async_trait]
impl DocumentOperations for EdgarClient {
    /// Fetches a filing document and flattens it into canonical lines.
    ///
    /// HTML is flattened through the DOM walk; XBRL and plain text are
    /// split on raw line boundaries.
    async fn document_lines(&self, url: &str) -> Result<Vec<String>> {
        let direct = resolve_inline_viewer(url)?;
        let content = self.get(&direct).await?;
        Ok(match detect_kind(&direct, &content) {
            DocumentKind::Html => flatten_html(&content),
            DocumentKind::Xbrl | DocumentKind::PlainText => to_lines(&content),
        })
    }

    /// Fetches a document and extracts the marker-bounded section.
    async fn extract_section(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<ExtractedSection> {
        let lines = self.document_lines(url).await?;
        extract_span(&lines, &options)
    }
}
