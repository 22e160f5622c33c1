use crate::entities::medicine::{MedicineRecord, UNKNOWN_BRAND};
use crate::sources::rxnorm::{ConceptProperty, DrugGroupResponse};

/// Flattens the nested `drugs.json` shape into at most `limit` records,
/// preserving source order.
///
/// Every nesting level may be absent: a missing `drugGroup`, a missing
/// `conceptGroup` list, or a group without `conceptProperties` all contribute
/// zero records.
pub(crate) fn flatten(resp: DrugGroupResponse, limit: usize) -> Vec<MedicineRecord> {
    let Some(groups) = resp.drug_group.and_then(|g| g.concept_group) else {
        return Vec::new();
    };

    groups
        .into_iter()
        .flat_map(|group| group.concept_properties.unwrap_or_default())
        .filter_map(record_from_concept)
        .take(limit)
        .collect()
}

/// A concept missing its name or identifier is skipped rather than failing
/// the whole lookup.
fn record_from_concept(concept: ConceptProperty) -> Option<MedicineRecord> {
    let name = nonempty(concept.name)?;
    let code = nonempty(concept.rxcui)?;
    let brand = nonempty(concept.synonym).unwrap_or_else(|| UNKNOWN_BRAND.to_string());
    Some(MedicineRecord { name, code, brand })
}

fn nonempty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::rxnorm::{ConceptGroup, DrugGroup};

    fn concept(name: &str, rxcui: &str, synonym: Option<&str>) -> ConceptProperty {
        ConceptProperty {
            name: Some(name.to_string()),
            rxcui: Some(rxcui.to_string()),
            synonym: synonym.map(str::to_string),
        }
    }

    fn response(groups: Vec<ConceptGroup>) -> DrugGroupResponse {
        DrugGroupResponse {
            drug_group: Some(DrugGroup {
                concept_group: Some(groups),
            }),
        }
    }

    #[test]
    fn missing_drug_group_yields_no_records() {
        let resp = DrugGroupResponse { drug_group: None };
        assert!(flatten(resp, 5).is_empty());
    }

    #[test]
    fn missing_concept_group_yields_no_records() {
        let resp = DrugGroupResponse {
            drug_group: Some(DrugGroup {
                concept_group: None,
            }),
        };
        assert!(flatten(resp, 5).is_empty());
    }

    #[test]
    fn group_without_properties_contributes_nothing_but_siblings_do() {
        let resp = response(vec![
            ConceptGroup {
                concept_properties: None,
            },
            ConceptGroup {
                concept_properties: Some(vec![concept("Advil", "12345", Some("Advil"))]),
            },
        ]);
        let records = flatten(resp, 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "12345");
    }

    #[test]
    fn preserves_source_order_across_groups() {
        let resp = response(vec![
            ConceptGroup {
                concept_properties: Some(vec![
                    concept("first", "1", None),
                    concept("second", "2", None),
                ]),
            },
            ConceptGroup {
                concept_properties: Some(vec![concept("third", "3", None)]),
            },
        ]);
        let codes: Vec<String> = flatten(resp, 5).into_iter().map(|r| r.code).collect();
        assert_eq!(codes, vec!["1", "2", "3"]);
    }

    #[test]
    fn truncates_to_limit() {
        let resp = response(vec![ConceptGroup {
            concept_properties: Some(vec![
                concept("a", "1", None),
                concept("b", "2", None),
                concept("c", "3", None),
            ]),
        }]);
        assert_eq!(flatten(resp, 2).len(), 2);
    }

    #[test]
    fn limit_beyond_total_returns_all() {
        let resp = response(vec![ConceptGroup {
            concept_properties: Some(vec![concept("a", "1", None), concept("b", "2", None)]),
        }]);
        assert_eq!(flatten(resp, 20).len(), 2);
    }

    #[test]
    fn missing_synonym_falls_back_to_sentinel_brand() {
        let resp = response(vec![ConceptGroup {
            concept_properties: Some(vec![concept("Advil", "12345", None)]),
        }]);
        let records = flatten(resp, 5);
        assert_eq!(records[0].brand, UNKNOWN_BRAND);
    }

    #[test]
    fn concept_missing_name_or_code_is_skipped() {
        let resp = response(vec![ConceptGroup {
            concept_properties: Some(vec![
                ConceptProperty {
                    name: None,
                    rxcui: Some("1".to_string()),
                    synonym: None,
                },
                ConceptProperty {
                    name: Some("nameless code".to_string()),
                    rxcui: None,
                    synonym: None,
                },
                concept("valid", "3", None),
            ]),
        }]);
        let records = flatten(resp, 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "valid");
    }

    #[test]
    fn blank_fields_count_as_missing() {
        let resp = response(vec![ConceptGroup {
            concept_properties: Some(vec![concept("  ", "1", None), concept("ok", " 2 ", Some("  "))]),
        }]);
        let records = flatten(resp, 5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "2");
        assert_eq!(records[0].brand, UNKNOWN_BRAND);
    }
}
