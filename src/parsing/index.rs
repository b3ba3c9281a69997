//! Quarterly index line parsing.
//!
//! EDGAR's quarterly index files are line oriented, but the field layout
//! varies: some variants are pipe-delimited (`CIK|Company|Form|Date|Path`),
//! others are whitespace-separated listings with the form type, CIK, date
//! and document path in varying column positions. The parser inspects each
//! line's shape before splitting and anchors field assignment on what the
//! tokens look like rather than on fixed positions.

use chrono::NaiveDate;
use std::io::BufRead;
use url::Url;

use crate::error::Result;

/// Path segment that marks a per-filing directory. A line without it is
/// never a filing record.
const DATA_PATH_FRAGMENT: &str = "edgar/data/";

/// One entry resolved from a quarterly index.
#[derive(Debug, Clone, PartialEq)]
pub struct FilingRecord {
    /// Form type exactly as listed (e.g. "10-Q").
    pub form_type: String,
    /// Best-effort company name; "Unknown" when the line layout omits it.
    pub company_name: String,
    /// Central Index Key without zero padding.
    pub cik: String,
    pub filing_date: NaiveDate,
    /// Absolute document URL, validated before the record is produced.
    pub document_url: String,
}

impl FilingRecord {
    /// The canonical zero-padded 10-digit CIK form used in SEC URLs.
    pub fn padded_cik(&self) -> String {
        format!("{:0>10}", self.cik)
    }
}

/// Parses quarterly index content into [`FilingRecord`]s for one form type.
///
/// A line is a candidate only if it contains the target form type as a
/// whole token and an `edgar/data/` path fragment; everything else is
/// skipped silently. Candidate lines that fail field extraction or URL
/// validation are skipped with a warning rather than failing the whole
/// parse.
pub struct IndexParser {
    form_type: String,
    archives_prefix: String,
}

impl IndexParser {
    const ARCHIVES_PREFIX: &'static str = "https://www.sec.gov/Archives/";

    pub fn new(form_type: impl Into<String>) -> Self {
        Self {
            form_type: form_type.into(),
            archives_prefix: Self::ARCHIVES_PREFIX.to_string(),
        }
    }

    /// Overrides the authority that relative document paths are joined onto.
    pub fn with_archives_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archives_prefix = prefix.into();
        self
    }

    /// Reads index content and returns every record matching the target
    /// form type, in document order.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<Vec<FilingRecord>> {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(record) = self.parse_line(&line) {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Parses a single index line, or `None` if it is not a usable record.
    pub fn parse_line(&self, line: &str) -> Option<FilingRecord> {
        if !line.contains(DATA_PATH_FRAGMENT) {
            return None;
        }
        let record = if line.contains('|') {
            self.parse_delimited(line)
        } else {
            self.parse_listing(line)
        };
        if record.is_none() && !line.trim().is_empty() {
            tracing::debug!("skipping unusable index line: {}", line.trim());
        }
        record
    }

    /// Pipe-delimited layout: `CIK|Company|Form|Date|Path`.
    fn parse_delimited(&self, line: &str) -> Option<FilingRecord> {
        let fields: Vec<&str> = line.split('|').map(str::trim).collect();
        if fields.len() < 5 {
            return None;
        }
        if fields[2] != self.form_type {
            return None;
        }
        let cik = normalize_cik_token(fields[0])?;
        let filing_date = parse_filing_date(fields[3])?;
        let document_url = self.join_document_url(fields[4])?;

        Some(FilingRecord {
            form_type: fields[2].to_string(),
            company_name: fields[1].to_string(),
            cik,
            filing_date,
            document_url,
        })
    }

    /// Whitespace-delimited listing layout. Column counts vary between
    /// index variants, so fields are identified by shape: the path token
    /// contains `edgar/data/`, the date token parses as a date, and the CIK
    /// is the remaining all-digit token nearest the end.
    fn parse_listing(&self, line: &str) -> Option<FilingRecord> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let form_idx = tokens.iter().position(|t| *t == self.form_type)?;
        let path_idx = tokens.iter().position(|t| t.contains(DATA_PATH_FRAGMENT))?;

        let date_idx = tokens
            .iter()
            .enumerate()
            .rev()
            .find(|(i, t)| *i != form_idx && *i != path_idx && parse_filing_date(t).is_some())
            .map(|(i, _)| i)?;
        let filing_date = parse_filing_date(tokens[date_idx])?;

        let cik_idx = tokens
            .iter()
            .enumerate()
            .rev()
            .find(|(i, t)| {
                *i != form_idx
                    && *i != path_idx
                    && *i != date_idx
                    && !t.is_empty()
                    && t.chars().all(|c| c.is_ascii_digit())
            })
            .map(|(i, _)| i)?;
        let cik = normalize_cik_token(tokens[cik_idx])?;

        let company_name = tokens[..form_idx]
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != path_idx && *i != date_idx && *i != cik_idx)
            .map(|(_, t)| *t)
            .collect::<Vec<_>>()
            .join(" ");
        let company_name = if company_name.is_empty() {
            "Unknown".to_string()
        } else {
            company_name
        };

        let document_url = self.join_document_url(tokens[path_idx])?;

        Some(FilingRecord {
            form_type: self.form_type.clone(),
            company_name,
            cik,
            filing_date,
            document_url,
        })
    }

    /// Joins a relative path onto the archives authority and enforces the
    /// absolute-URL invariant. Records with unusable URLs are rejected
    /// before anyone can fetch them.
    fn join_document_url(&self, path: &str) -> Option<String> {
        let candidate = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.archives_prefix, path.trim_start_matches('/'))
        };

        match Url::parse(&candidate) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some() => {
                Some(candidate)
            }
            _ => {
                tracing::warn!("rejecting record with invalid document URL: {}", candidate);
                None
            }
        }
    }
}

/// Strips zero padding from a numeric CIK token; non-numeric tokens are
/// rejected.
fn normalize_cik_token(token: &str) -> Option<String> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let stripped = token.trim_start_matches('0');
    Some(if stripped.is_empty() { "0" } else { stripped }.to_string())
}

/// Index variants write dates as `YYYY-MM-DD` or compact `YYYYMMDD`.
fn parse_filing_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(token, "%Y%m%d"))
        .ok()
}
