//! Operation traits implemented by [`EdgarClient`].
//!
//! Each feature of the crate contributes one trait, so callers can bound
//! generics on exactly the capabilities they use and tests can substitute
//! fakes at the same seams.
//!
//! [`EdgarClient`]: crate::core::EdgarClient

use async_trait::async_trait;

use crate::error::Result;

#[cfg(any(feature = "index", feature = "filings"))]
use crate::options::FilingOptions;
#[cfg(any(feature = "index", feature = "filings"))]
use crate::parsing::index::FilingRecord;

#[cfg(feature = "index")]
use crate::index::EdgarPeriod;

#[cfg(feature = "filings")]
use crate::filings::Submissions;

#[cfg(feature = "document")]
use crate::document::ExtractedSection;
#[cfg(feature = "document")]
use crate::options::ExtractOptions;

#[cfg(feature = "financials")]
use crate::financials::FinancialFields;
#[cfg(all(feature = "financials", any(feature = "index", feature = "filings")))]
use crate::financials::FilingAnalysis;

/// Quarterly index resolution.
#[cfg(feature = "index")]
#[async_trait]
pub trait IndexOperations {
    /// Resolves one quarter's index into records for one form type.
    async fn quarterly_filings(
        &self,
        period: EdgarPeriod,
        form_type: &str,
        options: Option<FilingOptions>,
    ) -> Result<Vec<FilingRecord>>;
}

/// Per-company filing lookup through the submissions API.
#[cfg(feature = "filings")]
#[async_trait]
pub trait FilingOperations {
    /// Retrieves the raw submissions payload for a company.
    async fn submissions(&self, cik: &str) -> Result<Submissions>;

    /// Resolves a company's recent filings of one form type, newest first.
    async fn company_filings(
        &self,
        cik: &str,
        form_type: &str,
        options: Option<FilingOptions>,
    ) -> Result<Vec<FilingRecord>>;
}

/// Document retrieval and section extraction.
#[cfg(feature = "document")]
#[async_trait]
pub trait DocumentOperations {
    /// Fetches a filing document and flattens it into canonical lines.
    async fn document_lines(&self, url: &str) -> Result<Vec<String>>;

    /// Fetches a document and extracts the marker-bounded section.
    async fn extract_section(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<ExtractedSection>;
}

/// Financial-field extraction.
#[cfg(feature = "financials")]
#[async_trait]
pub trait FinancialOperations {
    /// Extracts recognized financial fields from one filing document.
    async fn financial_fields(&self, document_url: &str) -> Result<FinancialFields>;

    /// Runs field extraction over a batch of filing records.
    #[cfg(any(feature = "index", feature = "filings"))]
    async fn analyze_filings(
        &self,
        records: &[FilingRecord],
        limit: Option<usize>,
    ) -> Result<Vec<FilingAnalysis>>;
}

/// Text summarization through a configured external endpoint.
#[cfg(feature = "summarize")]
#[async_trait]
pub trait SummaryOperations {
    /// Summarizes filing text, returning the summary body.
    async fn summarize(&self, text: &str) -> Result<String>;
}
