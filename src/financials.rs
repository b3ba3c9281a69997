//! Financial-field extraction from filing documents.
//!
//! Tries a fixed ladder of strategies against each filing and records where
//! every value came from: a companion XBRL instance when the document URL
//! suggests one, statement tables in the HTML body, and finally a plain-text
//! proximity scan pairing label lines with a nearby numeric line.

use async_trait::async_trait;
use std::collections::BTreeMap;

use crate::core::EdgarClient;
use crate::document::{DocumentKind, detect_kind, resolve_inline_viewer};
use crate::error::Result;
use crate::parsing::numeric::parse_numeric;
use crate::parsing::tables::{canonical_label, extract_statement_fields};
use crate::parsing::text::{flatten_html, to_lines};
use crate::parsing::xbrl::extract_concept_values;
use crate::traits::FinancialOperations;

#[cfg(any(feature = "index", feature = "filings"))]
use crate::parsing::index::FilingRecord;

/// How many lines after a label line the text scan inspects for a value.
const SCAN_WINDOW: usize = 3;

/// Which extraction strategy produced a field's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// A companion or inline XBRL instance.
    Xbrl,
    /// A labeled row of an HTML statement table.
    HtmlTable,
    /// A label line paired with a nearby numeric line in flattened text.
    TextScan,
}

/// One extracted financial figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialField {
    /// Canonical field name, e.g. `"total_assets"`.
    pub label: String,
    /// The value with scale and sign applied, in the filing's units.
    pub value: f64,
    pub source: FieldSource,
}

/// Canonical label -> field map for one filing.
pub type FinancialFields = BTreeMap<String, FinancialField>;

/// A filing record together with the fields extracted from its document.
#[cfg(any(feature = "index", feature = "filings"))]
#[derive(Debug, Clone)]
pub struct FilingAnalysis {
    pub record: FilingRecord,
    pub fields: FinancialFields,
}

/// Derives the companion XBRL instance URL for an HTML filing document,
/// if the URL shape admits one.
fn derive_xbrl_url(document_url: &str) -> Option<String> {
    let stem = document_url
        .strip_suffix(".htm")
        .or_else(|| document_url.strip_suffix(".html"))?;
    Some(format!("{}.xml", stem))
}

/// Scans flattened text lines for label lines with a numeric value on the
/// same line or within the next few lines.
fn scan_lines(lines: &[String]) -> BTreeMap<String, f64> {
    let mut fields = BTreeMap::new();
    for (i, line) in lines.iter().enumerate() {
        let Some(label) = canonical_label(line) else {
            continue;
        };
        if fields.contains_key(label) {
            continue;
        }
        let window_end = (i + 1 + SCAN_WINDOW).min(lines.len());
        let value = value_after_label(line).or_else(|| {
            lines[i + 1..window_end].iter().find_map(|l| parse_numeric(l))
        });
        if let Some(value) = value {
            fields.insert(label.to_string(), value);
        }
    }
    fields
}

/// Pulls a trailing numeric token off a label line ("Total assets 10,000").
fn value_after_label(line: &str) -> Option<f64> {
    line.split_whitespace().next_back().and_then(parse_numeric)
}

fn tag(values: BTreeMap<String, f64>, source: FieldSource) -> FinancialFields {
    values
        .into_iter()
        .map(|(label, value)| {
            let field = FinancialField {
                label: label.clone(),
                value,
                source,
            };
            (label, field)
        })
        .collect()
}

#[async_trait]
impl FinancialOperations for EdgarClient {
    /// Extracts recognized financial fields from one filing document.
    ///
    /// The strategy ladder stops at the first rung yielding any fields:
    /// companion XBRL instance, then HTML statement tables, then the text
    /// proximity scan. A document none of them can read produces an empty
    /// map, not an error; only fetching the document itself can fail.
    async fn financial_fields(&self, document_url: &str) -> Result<FinancialFields> {
        let direct = resolve_inline_viewer(document_url)?;

        // A companion instance is speculative; failure to fetch or parse
        // it just moves us down the ladder.
        if let Some(xbrl_url) = derive_xbrl_url(&direct) {
            match self.get(&xbrl_url).await {
                Ok(content) => match extract_concept_values(&content) {
                    Ok(values) if !values.is_empty() => {
                        return Ok(tag(values, FieldSource::Xbrl));
                    }
                    Ok(_) => {}
                    Err(e) => tracing::debug!("companion XBRL unusable: {}", e),
                },
                Err(e) => tracing::debug!("no companion XBRL at {}: {}", xbrl_url, e),
            }
        }

        let content = self.get(&direct).await?;
        match detect_kind(&direct, &content) {
            DocumentKind::Xbrl => {
                let values = extract_concept_values(&content)?;
                Ok(tag(values, FieldSource::Xbrl))
            }
            DocumentKind::Html => {
                let document = scraper::Html::parse_document(&content);
                let values = extract_statement_fields(&document)?;
                if !values.is_empty() {
                    return Ok(tag(values, FieldSource::HtmlTable));
                }
                Ok(tag(scan_lines(&flatten_html(&content)), FieldSource::TextScan))
            }
            DocumentKind::PlainText => {
                Ok(tag(scan_lines(&to_lines(&content)), FieldSource::TextScan))
            }
        }
    }

    /// Runs field extraction over a batch of filing records, sequentially.
    ///
    /// A filing whose document cannot be fetched or read is logged and
    /// skipped rather than failing the batch.
    #[cfg(any(feature = "index", feature = "filings"))]
    async fn analyze_filings(
        &self,
        records: &[FilingRecord],
        limit: Option<usize>,
    ) -> Result<Vec<FilingAnalysis>> {
        let take = limit.unwrap_or(records.len()).min(records.len());
        let mut analyses = Vec::with_capacity(take);

        for record in &records[..take] {
            match self.financial_fields(&record.document_url).await {
                Ok(fields) => analyses.push(FilingAnalysis {
                    record: record.clone(),
                    fields,
                }),
                Err(e) => {
                    tracing::warn!(
                        "skipping {} ({}): {}",
                        record.company_name,
                        record.document_url,
                        e
                    );
                }
            }
        }
        Ok(analyses)
    }
}
