mod common;

use common::read_fixture;
use filingkit::parsing::index::IndexParser;
use std::io::BufReader;

const MASTER_INDEX_FIXTURE: &str = "indexes/master.idx";
const CRAWLER_INDEX_FIXTURE: &str = "indexes/crawler.idx";

#[test]
fn parse_master_index_fixture() {
    let content = read_fixture(MASTER_INDEX_FIXTURE);
    let parser = IndexParser::new("10-Q");

    let records = parser.parse(BufReader::new(content.as_bytes())).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.company_name, "NICHOLAS FINANCIAL INC");
    assert_eq!(first.form_type, "10-Q");
    assert_eq!(first.cik, "1000045");
    assert_eq!(first.filing_date.to_string(), "2023-02-14");
    assert!(
        first
            .document_url
            .starts_with("https://www.sec.gov/Archives/edgar/data/")
    );
    assert!(first.document_url.ends_with(".txt"));
}

#[test]
fn master_index_amended_forms_do_not_match() {
    let content = read_fixture(MASTER_INDEX_FIXTURE);
    let parser = IndexParser::new("10-Q");

    let records = parser.parse(BufReader::new(content.as_bytes())).unwrap();
    // The fixture carries a 10-Q/A row for IMPAC; it must not appear.
    assert!(records.iter().all(|r| r.form_type == "10-Q"));
    assert!(records.iter().all(|r| r.cik != "1000298"));
}

#[test]
fn parse_crawler_index_fixture() {
    let content = read_fixture(CRAWLER_INDEX_FIXTURE);
    let parser = IndexParser::new("10-Q");

    let records = parser.parse(BufReader::new(content.as_bytes())).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.company_name, "NICHOLAS FINANCIAL INC");
    assert_eq!(first.cik, "1000045");
    assert_eq!(first.filing_date.to_string(), "2023-02-14");
    assert!(first.document_url.ends_with("0000950170-23-002704-index.htm"));
}

#[test]
fn crawler_index_relative_paths_and_compact_dates() {
    let content = read_fixture(CRAWLER_INDEX_FIXTURE);
    let parser = IndexParser::new("D");

    let records = parser.parse(BufReader::new(content.as_bytes())).unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.company_name, "3J LLC");
    assert_eq!(record.cik, "1975393");
    assert_eq!(record.filing_date.to_string(), "2023-07-03");
    assert_eq!(
        record.document_url,
        "https://www.sec.gov/Archives/edgar/data/1975393/0001975393-23-000001-index.htm"
    );
}

#[test]
fn form_with_no_rows_yields_an_empty_list() {
    let content = read_fixture(MASTER_INDEX_FIXTURE);
    let parser = IndexParser::new("S-1");

    let records = parser.parse(BufReader::new(content.as_bytes())).unwrap();
    assert!(records.is_empty());
}
