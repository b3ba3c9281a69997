mod common;

use common::read_fixture;
use filingkit::Submissions;

const COMPANY_FIXTURE: &str = "submissions/company.json";

#[test]
fn parse_company_submissions_fixture() {
    let submissions: Submissions =
        serde_json::from_str(&read_fixture(COMPANY_FIXTURE)).unwrap();

    assert_eq!(submissions.name, "Apple Inc.");

    let recent = &submissions.filings.recent;
    assert_eq!(recent.form.len(), 4);
    assert_eq!(recent.accession_number.len(), recent.form.len());
    assert_eq!(recent.filing_date.len(), recent.form.len());
    assert_eq!(recent.primary_document.len(), recent.form.len());

    assert_eq!(recent.form[0], "10-Q");
    assert_eq!(recent.filing_date[0], "2024-02-02");
    assert_eq!(recent.primary_document[0], "aapl-20231230.htm");

    // Unmodeled keys like entityType and tickers are ignored.
    assert_eq!(recent.form.iter().filter(|f| *f == "10-Q").count(), 2);
}
