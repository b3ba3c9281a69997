//! Financial-statement table scanning.
//!
//! Locates tables introduced by a known statement heading ("balance
//! sheet", "statement of operations", ...) and pulls labeled numeric values
//! out of their rows: the label cell is matched by a known phrase, the
//! value is the first parseable number in the cells that follow it.

use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;

use super::numeric::parse_numeric;
use crate::error::{FilingError, Result};

/// Heading phrases that mark a table as a financial statement.
pub const STATEMENT_HEADINGS: &[&str] = &[
    "balance sheet",
    "statement of operations",
    "statements of operations",
    "income statement",
    "statement of cash flows",
    "statements of cash flows",
    "cash flow",
];

/// Known label phrases and their canonical field names, most specific
/// first: lookup stops at the first phrase contained in the cell text.
pub const LABEL_PHRASES: &[(&str, &str)] = &[
    ("total current assets", "current_assets"),
    ("total current liabilities", "current_liabilities"),
    ("current assets", "current_assets"),
    ("current liabilities", "current_liabilities"),
    ("total assets", "total_assets"),
    ("total liabilities", "total_liabilities"),
    ("total stockholders equity", "stockholders_equity"),
    ("stockholders equity", "stockholders_equity"),
    ("shareholders equity", "stockholders_equity"),
    ("total revenue", "revenue"),
    ("net sales", "revenue"),
    ("revenues", "revenue"),
    ("revenue", "revenue"),
    ("net income", "net_income"),
    ("operating income", "operating_income"),
    ("income from operations", "operating_income"),
    ("cash and cash equivalents", "cash"),
    ("basic earnings per share", "eps_basic"),
    ("diluted earnings per share", "eps_diluted"),
];

/// How many preceding sibling nodes to inspect when looking for the
/// heading that introduces a table.
const HEADING_LOOKBACK: usize = 8;

/// Maps a label cell to its canonical field name.
pub fn canonical_label(cell: &str) -> Option<&'static str> {
    let normalized = cell.to_lowercase().replace(['\u{2019}', '\''], "");
    // "Total liabilities and stockholders' equity" is a balancing total,
    // not a liabilities figure.
    if normalized.contains("total liabilities and") {
        return None;
    }
    LABEL_PHRASES
        .iter()
        .find(|(phrase, _)| normalized.contains(phrase))
        .map(|(_, label)| *label)
}

/// Scans every statement table in the document for labeled values.
///
/// The first value found for each canonical label wins, matching the
/// statement order of the document.
pub fn extract_statement_fields(document: &Html) -> Result<BTreeMap<String, f64>> {
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("td, th")?;

    let mut fields = BTreeMap::new();
    for table in document.select(&table_sel) {
        if !is_statement_table(&table) {
            continue;
        }
        for row in table.select(&row_sel) {
            let cells: Vec<String> = row
                .select(&cell_sel)
                .map(|cell| cell.text().collect::<String>().trim().to_string())
                .collect();

            for (i, cell) in cells.iter().enumerate() {
                let Some(label) = canonical_label(cell) else {
                    continue;
                };
                if !fields.contains_key(label) {
                    if let Some(value) = cells[i + 1..].iter().find_map(|c| parse_numeric(c)) {
                        fields.insert(label.to_string(), value);
                    }
                }
                break;
            }
        }
    }
    Ok(fields)
}

/// A table counts as a statement when a known heading appears in the text
/// immediately preceding it, or in its own leading rows (filings often put
/// the title inside the table).
fn is_statement_table(table: &ElementRef) -> bool {
    let mut inspected = 0;
    for sibling in table.prev_siblings() {
        if inspected >= HEADING_LOOKBACK {
            break;
        }
        let text = match ElementRef::wrap(sibling) {
            Some(element) => element.text().collect::<String>(),
            None => match sibling.value().as_text() {
                Some(text) => text.to_string(),
                None => continue,
            },
        };
        if contains_statement_heading(&text) {
            return true;
        }
        inspected += 1;
    }

    let leading: String = table.text().take(30).collect();
    contains_statement_heading(&leading)
}

fn contains_statement_heading(text: &str) -> bool {
    let lower = text.to_lowercase();
    STATEMENT_HEADINGS.iter().any(|h| lower.contains(h))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FilingError::Parse(format!("selector '{}': {}", css, e)))
}
