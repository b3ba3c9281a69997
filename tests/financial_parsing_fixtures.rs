mod common;

use common::read_fixture;
use filingkit::parsing::tables::extract_statement_fields;
use filingkit::parsing::xbrl::extract_concept_values;
use scraper::Html;

const FILING_FIXTURE: &str = "documents/filing_10q.htm";
const INSTANCE_FIXTURE: &str = "documents/instance.xml";

#[test]
fn statement_tables_in_a_filing_document() {
    let document = Html::parse_document(&read_fixture(FILING_FIXTURE));
    let fields = extract_statement_fields(&document).unwrap();

    assert_eq!(fields["cash"], 1_250.0);
    assert_eq!(fields["current_assets"], 4_700.0);
    assert_eq!(fields["total_assets"], 10_000.0);
    assert_eq!(fields["current_liabilities"], 1_900.0);
    assert_eq!(fields["total_liabilities"], 4_000.0);
    assert_eq!(fields["stockholders_equity"], 6_000.0);

    assert_eq!(fields["revenue"], 5_200.0);
    assert_eq!(fields["operating_income"], 800.0);
    // Parenthesized values read as negative.
    assert_eq!(fields["net_income"], -150.0);
    assert_eq!(fields["eps_basic"], 0.42);
}

#[test]
fn xbrl_instance_document() {
    let values = extract_concept_values(&read_fixture(INSTANCE_FIXTURE)).unwrap();

    assert_eq!(values["current_assets"], 4_700_000.0);
    assert_eq!(values["total_assets"], 10_000_000.0);
    assert_eq!(values["total_liabilities"], 4_000_000.0);
    assert_eq!(values["stockholders_equity"], 6_000_000.0);
    assert_eq!(values["revenue"], 5_200_000.0);
    assert_eq!(values["eps_basic"], 0.42);

    // sign="-" on the current-period fact; the prior-period duplicate is
    // ignored because the first occurrence wins.
    assert_eq!(values["net_income"], -150_000.0);
}
