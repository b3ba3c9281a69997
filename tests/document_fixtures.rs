mod common;

use common::read_fixture;
use filingkit::parsing::text::flatten_html;
use filingkit::{ExtractOptions, MissingMarkerPolicy, extract_span};

const FILING_FIXTURE: &str = "documents/filing_10q.htm";

#[test]
fn flattened_filing_drops_markup_and_chrome() {
    let lines = flatten_html(&read_fixture(FILING_FIXTURE));

    assert!(lines.contains(&"FORM 10-Q".to_string()));
    assert!(lines.contains(&"Item 1. Financial Statements".to_string()));
    // Title and style content never reach the line stream.
    assert!(lines.iter().all(|l| !l.contains("exco-20230331")));
    assert!(lines.iter().all(|l| !l.contains("font-family")));
}

#[test]
fn mdna_section_extraction() {
    let lines = flatten_html(&read_fixture(FILING_FIXTURE));
    let options = ExtractOptions::new()
        .with_start_marker("Item 2.")
        .with_end_marker("Item 3.");

    let section = extract_span(&lines, &options).unwrap();
    assert!(section.lines[0].starts_with("Item 2."));
    assert!(section.lines.iter().any(|l| l.contains("Net sales for the quarter")));
    assert!(section.lines.iter().all(|l| !l.contains("market risk exposures")));
    assert!(
        section
            .end_marker
            .as_deref()
            .is_some_and(|l| l.starts_with("Item 3."))
    );
}

#[test]
fn markers_match_case_insensitively() {
    let lines = flatten_html(&read_fixture(FILING_FIXTURE));
    let options = ExtractOptions::new()
        .with_start_marker("ITEM 4. CONTROLS")
        .with_missing_marker(MissingMarkerPolicy::Error);

    let section = extract_span(&lines, &options).unwrap();
    assert!(section.lines[0].starts_with("Item 4."));
    assert!(section.lines.iter().any(|l| l.contains("disclosure controls")));
}

#[test]
fn unmatched_start_marker_is_an_error_when_requested() {
    let lines = flatten_html(&read_fixture(FILING_FIXTURE));
    let options = ExtractOptions::new()
        .with_start_marker("Item 9. Changes in Accountants")
        .with_missing_marker(MissingMarkerPolicy::Error);

    assert!(extract_span(&lines, &options).is_err());
}
