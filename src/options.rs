#[cfg(any(feature = "index", feature = "filings"))]
use chrono::NaiveDate;

/// Options for filtering resolved filing records.
#[cfg(any(feature = "index", feature = "filings"))]
#[derive(Debug, Clone, Default)]
pub struct FilingOptions {
    /// Maximum number of records to return.
    pub limit: Option<usize>,
    /// Keep only filings dated on or after this day.
    pub start_date: Option<NaiveDate>,
    /// Keep only filings dated on or before this day.
    pub end_date: Option<NaiveDate>,
}

#[cfg(any(feature = "index", feature = "filings"))]
impl FilingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// What to do when a requested start marker never matches.
///
/// Extracting from the beginning of the document is the default; callers
/// who would rather hear about the miss can opt into a hard error.
#[cfg(feature = "document")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingMarkerPolicy {
    /// Fall back to extracting from line 0.
    #[default]
    FromStart,
    /// Surface the miss as `FilingError::NoDataFound`.
    Error,
}

/// Options bounding a section extraction.
///
/// Markers are matched as case-insensitive substrings of individual
/// flattened lines. With neither marker set, the full flattened document is
/// returned.
#[cfg(feature = "document")]
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub start_marker: Option<String>,
    pub end_marker: Option<String>,
    pub missing_marker: MissingMarkerPolicy,
}

#[cfg(feature = "document")]
impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start_marker(mut self, marker: impl Into<String>) -> Self {
        self.start_marker = Some(marker.into());
        self
    }

    pub fn with_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.end_marker = Some(marker.into());
        self
    }

    pub fn with_missing_marker(mut self, policy: MissingMarkerPolicy) -> Self {
        self.missing_marker = policy;
        self
    }
}
