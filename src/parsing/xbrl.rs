//! XBRL fact extraction.
//!
//! Scans an XBRL instance (plain or inline) for a fixed set of recognized
//! financial concepts and produces canonical label -> value pairs. Facts
//! carry an optional power-of-ten `scale` and a `sign` attribute, both of
//! which are applied before the value is stored. The first occurrence of a
//! concept wins; prior-period duplicates are ignored.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::BTreeMap;

use super::numeric::parse_numeric;
use crate::error::{FilingError, Result};

/// Recognized XBRL concepts (local names) and their canonical labels.
pub const CONCEPTS: &[(&str, &str)] = &[
    ("AssetsCurrent", "current_assets"),
    ("LiabilitiesCurrent", "current_liabilities"),
    ("Assets", "total_assets"),
    ("Liabilities", "total_liabilities"),
    ("StockholdersEquity", "stockholders_equity"),
    (
        "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest",
        "stockholders_equity",
    ),
    ("Revenues", "revenue"),
    ("RevenueFromContractWithCustomerExcludingAssessedTax", "revenue"),
    ("RevenueFromContractWithCustomerIncludingAssessedTax", "revenue"),
    ("NetIncomeLoss", "net_income"),
    ("ProfitLoss", "net_income"),
    ("OperatingIncomeLoss", "operating_income"),
    ("CashAndCashEquivalentsAtCarryingValue", "cash"),
    ("EarningsPerShareBasic", "eps_basic"),
    ("EarningsPerShareDiluted", "eps_diluted"),
];

struct PendingFact {
    label: &'static str,
    scale: i32,
    negate: bool,
    /// Qualified name of the element that opened the fact; only its own
    /// end tag finalizes the fact, so nested markup cannot truncate it.
    element: Vec<u8>,
}

/// Extracts recognized concept values from XBRL markup.
///
/// Returns an empty map when the instance is well-formed but carries none
/// of the recognized concepts; malformed markup is a `Parse` error.
pub fn extract_concept_values(content: &str) -> Result<BTreeMap<String, f64>> {
    let mut reader = Reader::from_str(content);
    let mut values = BTreeMap::new();
    let mut pending: Option<PendingFact> = None;
    let mut text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8(e.name().as_ref().to_vec())?;

                let mut scale = 0i32;
                let mut negate = false;
                let mut name_attr = None;
                for attr in e.attributes() {
                    let attr = attr.map_err(|err| FilingError::Parse(err.to_string()))?;
                    match attr.key.as_ref() {
                        b"scale" => {
                            scale = String::from_utf8(attr.value.to_vec())?
                                .trim()
                                .parse()
                                .unwrap_or(0);
                        }
                        b"sign" => negate = attr.value.as_ref() == b"-",
                        b"name" => {
                            name_attr = Some(String::from_utf8(attr.value.to_vec())?);
                        }
                        _ => {}
                    }
                }

                // Inline XBRL wraps facts in <ix:nonFraction name="us-gaap:X">;
                // plain instances use the concept as the element name itself.
                let local = local_name(&name);
                let concept = if local.eq_ignore_ascii_case("nonFraction") {
                    name_attr.as_deref().map(local_name).and_then(concept_label)
                } else {
                    concept_label(local)
                };

                if let Some(label) = concept {
                    if !values.contains_key(label) {
                        pending = Some(PendingFact {
                            label,
                            scale,
                            negate,
                            element: e.name().as_ref().to_vec(),
                        });
                        text.clear();
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if pending.is_some() {
                    text.push_str(&e.unescape().map_err(|err| FilingError::Parse(err.to_string()))?);
                }
            }
            Ok(Event::End(e)) => {
                let closes_fact = pending
                    .as_ref()
                    .is_some_and(|fact| fact.element == e.name().as_ref());
                if closes_fact {
                    if let Some(fact) = pending.take() {
                        if let Some(value) = parse_numeric(&text) {
                            let scaled = value
                                * 10f64.powi(fact.scale)
                                * if fact.negate { -1.0 } else { 1.0 };
                            values.insert(fact.label.to_string(), scaled);
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FilingError::Parse(format!("XBRL parse error: {}", e))),
            _ => {}
        }
    }

    Ok(values)
}

fn local_name(qualified: &str) -> &str {
    qualified.rsplit(':').next().unwrap_or(qualified)
}

fn concept_label(local: &str) -> Option<&'static str> {
    CONCEPTS
        .iter()
        .find(|(concept, _)| *concept == local)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_facts_with_scale() {
        let xml = r#"
            <xbrli:xbrl>
                <us-gaap:NetIncomeLoss contextRef="FY2024" scale="3">5000</us-gaap:NetIncomeLoss>
                <us-gaap:Assets contextRef="FY2024">1200000</us-gaap:Assets>
            </xbrli:xbrl>
        "#;

        let values = extract_concept_values(xml).unwrap();
        assert_eq!(values["net_income"], 5_000_000.0);
        assert_eq!(values["total_assets"], 1_200_000.0);
    }

    #[test]
    fn sign_attribute_negates() {
        let xml = r#"
            <xbrl>
                <us-gaap:OperatingIncomeLoss sign="-" scale="0">750</us-gaap:OperatingIncomeLoss>
            </xbrl>
        "#;

        let values = extract_concept_values(xml).unwrap();
        assert_eq!(values["operating_income"], -750.0);
    }

    #[test]
    fn inline_facts_use_the_name_attribute() {
        let xml = r#"
            <html>
                <ix:nonFraction name="us-gaap:Revenues" contextRef="Q1" scale="6">42</ix:nonFraction>
            </html>
        "#;

        let values = extract_concept_values(xml).unwrap();
        assert_eq!(values["revenue"], 42_000_000.0);
    }

    #[test]
    fn first_occurrence_wins() {
        let xml = r#"
            <xbrl>
                <us-gaap:NetIncomeLoss contextRef="current">100</us-gaap:NetIncomeLoss>
                <us-gaap:NetIncomeLoss contextRef="prior">90</us-gaap:NetIncomeLoss>
            </xbrl>
        "#;

        let values = extract_concept_values(xml).unwrap();
        assert_eq!(values["net_income"], 100.0);
    }

    #[test]
    fn nested_markup_inside_a_fact_does_not_truncate_it() {
        // Inline facts frequently wrap digit groups in presentational spans;
        // only the fact's own end tag may finalize the value.
        let xml = r#"
            <xbrl>
                <us-gaap:Assets contextRef="c">1<span>,200,</span>000</us-gaap:Assets>
            </xbrl>
        "#;

        let values = extract_concept_values(xml).unwrap();
        assert_eq!(values["total_assets"], 1_200_000.0);
    }

    #[test]
    fn unrecognized_concepts_yield_an_empty_map() {
        let xml = "<xbrl><us-gaap:SomethingElse>5</us-gaap:SomethingElse></xbrl>";
        assert!(extract_concept_values(xml).unwrap().is_empty());
    }

    #[test]
    fn unparseable_values_are_omitted() {
        let xml = "<xbrl><us-gaap:Assets>N/A</us-gaap:Assets></xbrl>";
        assert!(extract_concept_values(xml).unwrap().is_empty());
    }
}
