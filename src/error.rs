use std::string::FromUtf8Error;
use thiserror::Error;

/// Error taxonomy for all filingkit operations.
///
/// Every component boundary converts its internal failures into one of these
/// variants; callers never see raw, unclassified errors. The four core kinds
/// are `Fetch` (transport), `InvalidUrl` (rejected before any fetch), `Parse`
/// (well-formed transport, malformed payload) and `NoDataFound` (well-formed
/// payload, nothing matched) -- the last two are deliberately distinct so a
/// caller can tell "the service is unreachable" apart from "your search
/// matched nothing".
#[derive(Error, Debug)]
pub enum FilingError {
    #[error("HTTP request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("no matching data: {0}")]
    NoDataFound(String),

    #[error("invalid year: must be 1994 or greater")]
    InvalidYear,

    #[error("invalid quarter: must be between 1 and 4")]
    InvalidQuarter,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, FilingError>;
