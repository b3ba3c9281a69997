//! Parsers for index files, filing documents and financial facts.
//!
//! Everything in here is pure: parsers take text or a parsed DOM and
//! produce records, lines or values, with no HTTP involved. The client
//! modules wire them up to fetched content.

#[cfg(any(feature = "index", feature = "filings"))]
pub mod index;
pub mod numeric;
#[cfg(feature = "financials")]
pub mod tables;
#[cfg(feature = "document")]
pub mod text;
#[cfg(feature = "financials")]
pub mod xbrl;
