use filingkit::{
    DocumentOperations, EdgarClient, ExtractOptions, FilingOperations, FilingOptions,
    FinancialOperations,
};

fn client() -> EdgarClient {
    EdgarClient::new("test_agent example@example.com").unwrap()
}

#[tokio::test]
#[ignore]
async fn company_filings_resolve_newest_first() {
    let client = client();

    let options = FilingOptions::new().with_limit(4);
    let records = client
        .company_filings("320193", "10-Q", Some(options))
        .await
        .unwrap();

    assert!(!records.is_empty());
    assert!(records.len() <= 4);
    assert!(records.windows(2).all(|w| w[0].filing_date >= w[1].filing_date));
    assert!(records.iter().all(|r| r.form_type.eq_ignore_ascii_case("10-Q")));
}

#[tokio::test]
#[ignore]
async fn padded_and_unpadded_ciks_resolve_identically() {
    let client = client();

    let a = client.company_filings("320193", "10-K", None).await.unwrap();
    let b = client
        .company_filings("0000320193", "10-K", None)
        .await
        .unwrap();
    assert_eq!(a.len(), b.len());
}

#[tokio::test]
#[ignore]
async fn extract_section_from_a_live_filing() {
    let client = client();

    let records = client
        .company_filings("320193", "10-Q", Some(FilingOptions::new().with_limit(1)))
        .await
        .unwrap();
    let options = ExtractOptions::new()
        .with_start_marker("Item 2.")
        .with_end_marker("Item 3.");

    let section = client
        .extract_section(&records[0].document_url, options)
        .await
        .unwrap();
    assert!(!section.lines.is_empty());
}

#[tokio::test]
#[ignore]
async fn financial_fields_from_a_live_filing() {
    let client = client();

    let records = client
        .company_filings("320193", "10-Q", Some(FilingOptions::new().with_limit(1)))
        .await
        .unwrap();
    let fields = client
        .financial_fields(&records[0].document_url)
        .await
        .unwrap();

    // A modern 10-Q should yield at least one recognized figure.
    assert!(!fields.is_empty());
}
