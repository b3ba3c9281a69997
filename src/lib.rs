//! # filingkit
//!
//! A client library for the SEC EDGAR system: quarterly index resolution,
//! per-company filing lookup, document section extraction, financial-field
//! extraction and optional summarization, with built-in request pacing that
//! honors the SEC's fair-access guidelines.
//!
//! ## Quick start
//!
//! ```ignore
//! use filingkit::{EdgarClient, EdgarPeriod, IndexOperations, Quarter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // The SEC requires a contact-style user agent.
//!     let client = EdgarClient::new("MyApp/1.0 (me@example.com)")?;
//!
//!     let period = EdgarPeriod::new(2024, Quarter::Q1)?;
//!     let filings = client.quarterly_filings(period, "10-Q", None).await?;
//!     for filing in filings.iter().take(5) {
//!         println!("{}  {}  {}", filing.filing_date, filing.company_name, filing.document_url);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature flags
//!
//! All features are enabled by default.
//!
//! * `index` - quarterly full-index resolution
//! * `filings` - per-company lookup via the submissions API
//! * `document` - document fetching and section extraction
//! * `financials` - financial-field extraction (implies `document`)
//! * `summarize` - summarization through an OpenAI-compatible endpoint
//!
//! ## Request pacing and failure model
//!
//! All outbound requests share one token-bucket rate limiter (10 requests
//! per second by default) and make exactly one attempt: a network failure,
//! timeout or unexpected status surfaces immediately as a
//! [`FilingError`] with no automatic retry.

pub mod config;
pub mod core;
#[cfg(feature = "document")]
pub mod document;
pub mod error;
#[cfg(feature = "filings")]
pub mod filings;
#[cfg(feature = "financials")]
pub mod financials;
#[cfg(feature = "index")]
pub mod index;
pub mod options;
pub mod parsing;
#[cfg(feature = "summarize")]
pub mod summarize;
pub mod traits;

pub use crate::config::{ClientConfig, SecUrls};
pub use crate::core::EdgarClient;
pub use crate::error::{FilingError, Result};

#[cfg(feature = "summarize")]
pub use crate::config::SummarizerConfig;

#[cfg(any(feature = "index", feature = "filings"))]
pub use crate::options::FilingOptions;
#[cfg(any(feature = "index", feature = "filings"))]
pub use crate::parsing::index::FilingRecord;

#[cfg(feature = "index")]
pub use crate::index::{EdgarPeriod, Quarter};
#[cfg(feature = "index")]
pub use crate::traits::IndexOperations;

#[cfg(feature = "filings")]
pub use crate::filings::{Submissions, normalize_cik};
#[cfg(feature = "filings")]
pub use crate::traits::FilingOperations;

#[cfg(feature = "document")]
pub use crate::document::{DocumentKind, ExtractedSection, extract_span};
#[cfg(feature = "document")]
pub use crate::options::{ExtractOptions, MissingMarkerPolicy};
#[cfg(feature = "document")]
pub use crate::traits::DocumentOperations;

#[cfg(feature = "financials")]
pub use crate::financials::{FieldSource, FinancialField, FinancialFields};
#[cfg(all(feature = "financials", any(feature = "index", feature = "filings")))]
pub use crate::financials::FilingAnalysis;
#[cfg(feature = "financials")]
pub use crate::traits::FinancialOperations;

#[cfg(feature = "summarize")]
pub use crate::traits::SummaryOperations;

/// Crate version, for user-agent strings and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
