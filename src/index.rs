//! Quarterly filing index resolution.
//!
//! EDGAR publishes a flat-file index of every filing submitted in a given
//! year and quarter. The resolver turns a `(year, quarter, form type)`
//! query into validated [`FilingRecord`]s: it downloads the quarterly index
//! (transparently decompressing `.gz` variants), filters lines for the
//! target form type, and rejects records whose document URL is not a
//! syntactically valid absolute URL.
//!
//! Index retrieval is read-only and idempotent; a single attempt is made
//! per call, and the most recent listing is kept in a session cache so an
//! interactive caller re-running the same query does not refetch it.
//!
//! # Examples
//!
//! ```ignore
//! use filingkit::{EdgarClient, EdgarPeriod, IndexOperations, Quarter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new("MyApp contact@example.com")?;
//!     let period = EdgarPeriod::new(2024, Quarter::Q1)?;
//!     let filings = client.quarterly_filings(period, "10-Q", None).await?;
//!     for filing in &filings {
//!         println!("{} filed {} on {}", filing.company_name, filing.form_type, filing.filing_date);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::io::{BufReader, Read};

use crate::core::EdgarClient;
use crate::error::{FilingError, Result};
use crate::options::FilingOptions;
use crate::parsing::index::{FilingRecord, IndexParser};
use crate::traits::IndexOperations;

/// Quarterly index file variant fetched by the resolver. The gzipped
/// master index is the smallest variant carrying every field the parser
/// needs.
const QUARTERLY_INDEX_FILE: &str = "master.gz";

/// Fiscal quarter (Q1-Q4).
///
/// EDGAR index directories are grouped by quarter (`QTR1`..`QTR4`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Q1 = 1,
    Q2 = 2,
    Q3 = 3,
    Q4 = 4,
}

impl Quarter {
    /// Creates a Quarter from its number (1-4).
    pub fn from_number(quarter: u32) -> Result<Self> {
        match quarter {
            1 => Ok(Quarter::Q1),
            2 => Ok(Quarter::Q2),
            3 => Ok(Quarter::Q3),
            4 => Ok(Quarter::Q4),
            _ => Err(FilingError::InvalidQuarter),
        }
    }

    /// Converts the quarter to its integer representation (1-4).
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

/// A validated fiscal period (year + quarter) locating one quarterly index.
///
/// Quarterly indices live under `.../full-index/<YEAR>/QTR<1-4>/`. The year
/// must be 1994 or later, EDGAR's first full year of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgarPeriod {
    year: i32,
    quarter: Quarter,
}

impl EdgarPeriod {
    pub fn new(year: i32, quarter: Quarter) -> Result<Self> {
        if year < 1994 {
            return Err(FilingError::InvalidYear);
        }
        Ok(Self { year, quarter })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn quarter(&self) -> Quarter {
        self.quarter
    }
}

/// Inflates a gzipped index body into text.
fn decompress_gzip(bytes: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder.read_to_string(&mut content)?;
    Ok(content)
}

impl EdgarClient {
    fn quarterly_index_url(&self, period: EdgarPeriod, file_name: &str) -> String {
        format!(
            "{}/full-index/{}/QTR{}/{}",
            self.urls.archives,
            period.year(),
            period.quarter().as_i32(),
            file_name
        )
    }

    /// Downloads an index file as text, decompressing `.gz` variants.
    async fn download_index_file(&self, url: &str) -> Result<String> {
        if url.ends_with(".gz") {
            let bytes = self.get_bytes(url).await?;
            decompress_gzip(&bytes)
        } else {
            self.get(url).await
        }
    }

    /// Applies in-memory filters to resolved records.
    fn apply_filters(mut records: Vec<FilingRecord>, opts: &FilingOptions) -> Vec<FilingRecord> {
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

    fn cached_listing(&self, key: &str) -> Option<Vec<FilingRecord>> {
        let guard = self.index_cache.lock().ok()?;
        guard
            .as_ref()
            .filter(|(cached_key, _)| cached_key == key)
            .map(|(_, records)| records.clone())
    }

    fn store_listing(&self, key: &str, records: &[FilingRecord]) {
        if let Ok(mut guard) = self.index_cache.lock() {
            *guard = Some((key.to_string(), records.to_vec()));
        }
    }
}

#[async_trait]
impl IndexOperations for EdgarClient {
    /// Resolves a quarter's index into records for one form type.
    ///
    /// Records are returned in index order, unsorted; callers wanting the
    /// newest first can sort by `filing_date` descending.
    ///
    /// # Errors
    ///
    /// * `FilingError::Fetch` for network failures (single attempt)
    /// * `FilingError::NotFound` when the index file does not exist
    async fn quarterly_filings(
        &self,
        period: EdgarPeriod,
        form_type: &str,
        options: Option<FilingOptions>,
    ) -> Result<Vec<FilingRecord>> {
        let key = format!("{}:Q{}:{}", period.year(), period.quarter().as_i32(), form_type);

        let records = match self.cached_listing(&key) {
            Some(records) => {
                tracing::debug!("index cache hit for {}", key);
                records
            }
            None => {
                let url = self.quarterly_index_url(period, QUARTERLY_INDEX_FILE);
                let content = self.download_index_file(&url).await?;

                let parser = IndexParser::new(form_type)
                    .with_archives_prefix(format!("{}/Archives/", self.urls.www));
                let records = parser.parse(BufReader::new(content.as_bytes()))?;
                self.store_listing(&key, &records);
                records
            }
        };

        Ok(match options {
            Some(opts) => Self::apply_filters(records, &opts),
            None => records,
        })
    }
}
