//! Per-company filing resolution via the EDGAR submissions API.
//!
//! The data API exposes each company's filing history as JSON keyed by a
//! zero-padded 10-digit CIK. The response stores recent filings as parallel
//! column arrays, which are zipped back into [`FilingRecord`]s with
//! document URLs constructed from the accession number and primary
//! document name.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::EdgarClient;
use crate::error::{FilingError, Result};
use crate::options::FilingOptions;
use crate::parsing::index::FilingRecord;
use crate::traits::FilingOperations;

/// Company submissions payload. Only the fields this crate consumes are
/// modeled; the API returns considerably more.
#[derive(Debug, Clone, Deserialize)]
pub struct Submissions {
    pub cik: String,
    pub name: String,
    pub filings: FilingsData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilingsData {
    pub recent: RecentFilings,
}

/// Columnar arrays of recent filings; index `i` across all arrays
/// describes one filing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFilings {
    pub accession_number: Vec<String>,
    pub filing_date: Vec<String>,
    pub form: Vec<String>,
    pub primary_document: Vec<String>,
}

/// Normalizes a CIK to the canonical zero-padded 10-digit form used in
/// submissions URLs. Accepts padded and unpadded input.
pub fn normalize_cik(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(FilingError::Parse(format!("invalid CIK: {:?}", raw)));
    }
    let unpadded = trimmed.trim_start_matches('0');
    let unpadded = if unpadded.is_empty() { "0" } else { unpadded };
    if unpadded.len() > 10 {
        return Err(FilingError::Parse(format!("CIK too long: {:?}", raw)));
    }
    Ok(format!("{:0>10}", unpadded))
}

/// Strips the zero padding back off a canonical CIK. Never empty: an
/// all-zero CIK stays `"0"`.
fn unpadded_cik(padded: &str) -> &str {
    let stripped = padded.trim_start_matches('0');
    if stripped.is_empty() { "0" } else { stripped }
}

#[async_trait]
impl FilingOperations for EdgarClient {
    /// Retrieves the company's submissions payload.
    async fn submissions(&self, cik: &str) -> Result<Submissions> {
        let padded = normalize_cik(cik)?;
        let url = format!("{}/submissions/CIK{}.json", self.urls.data, padded);
        let body = self.get(&url).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Resolves a company's recent filings of one form type, newest first.
    ///
    /// Rows with unparseable dates or missing documents are skipped; a
    /// company with no matching filings yields an empty list, not an
    /// error.
    async fn company_filings(
        &self,
        cik: &str,
        form_type: &str,
        options: Option<FilingOptions>,
    ) -> Result<Vec<FilingRecord>> {
        let submissions = self.submissions(cik).await?;
        let recent = &submissions.filings.recent;
        let padded = normalize_cik(cik)?;
        let unpadded = unpadded_cik(&padded).to_string();

        let mut records = Vec::new();
        for i in 0..recent.form.len() {
            if !recent.form[i].eq_ignore_ascii_case(form_type) {
                continue;
            }
            let (Some(raw_date), Some(accession), Some(document)) = (
                recent.filing_date.get(i),
                recent.accession_number.get(i),
                recent.primary_document.get(i),
            ) else {
                continue;
            };
            let Ok(filing_date) = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") else {
                tracing::debug!("skipping filing with unparseable date {:?}", raw_date);
                continue;
            };
            if document.is_empty() {
                continue;
            }

            let document_url = format!(
                "{}/data/{}/{}/{}",
                self.urls.archives,
                unpadded,
                accession.replace('-', ""),
                document
            );
            if EdgarClient::ensure_absolute_url(&document_url).is_err() {
                tracing::warn!("rejecting filing with invalid URL: {}", document_url);
                continue;
            }

            records.push(FilingRecord {
                form_type: recent.form[i].clone(),
                company_name: submissions.name.clone(),
                cik: unpadded.clone(),
                filing_date,
                document_url,
            });
        }

        records.sort_by(|a, b| b.filing_date.cmp(&a.filing_date));

        Ok(match options {
            Some(opts) => Self::apply_company_filters(records, &opts),
            None => records,
        })
    }
}

impl EdgarClient {
    fn apply_company_filters(
        mut records: Vec<FilingRecord>,
        opts: &FilingOptions,
    ) -> Vec<FilingRecord> {
        if let Some(start) = opts.start_date {
            records.retain(|r| r.filing_date >= start);
        }
        if let Some(end) = opts.end_date {
            records.retain(|r| r.filing_date <= end);
        }
        if let Some(limit) = opts.limit {
            records.truncate(limit);
        }
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cik_normalization_accepts_padded_and_unpadded_forms() {
        assert_eq!(normalize_cik("320193").unwrap(), "0000320193");
        assert_eq!(normalize_cik("0000320193").unwrap(), "0000320193");
        assert_eq!(normalize_cik(" 790652 ").unwrap(), "0000790652");
        assert_eq!(normalize_cik("320193").unwrap(), normalize_cik("0000320193").unwrap());
    }

    #[test]
    fn unpadding_a_canonical_cik_is_never_empty() {
        assert_eq!(unpadded_cik("0000320193"), "320193");
        assert_eq!(unpadded_cik(&normalize_cik("0").unwrap()), "0");
        assert_eq!(unpadded_cik("0000000000"), "0");
    }

    #[test]
    fn cik_normalization_rejects_garbage() {
        assert!(normalize_cik("AAPL").is_err());
        assert!(normalize_cik("").is_err());
        assert!(normalize_cik("123456789012").is_err());
    }

    #[test]
    fn parses_submissions_payload() {
        let json = r#"{
            "cik": "320193",
            "name": "Apple Inc.",
            "filings": {
                "recent": {
                    "accessionNumber": ["0000320193-24-000010"],
                    "filingDate": ["2024-02-01"],
                    "form": ["10-Q"],
                    "primaryDocument": ["aapl-20231230.htm"]
                }
            }
        }"#;

        let submissions: Submissions = serde_json::from_str(json).unwrap();
        assert_eq!(submissions.name, "Apple Inc.");
        assert_eq!(submissions.filings.recent.form, vec!["10-Q"]);
        assert_eq!(
            submissions.filings.recent.accession_number,
            vec!["0000320193-24-000010"]
        );
    }
}
