//! Ingredient risk matching
//!
//! Case-insensitive substring containment of each reference term inside
//! the extracted text. No tokenization, stemming, or word-boundary checks:
//! a term that happens to be a substring of a longer word still matches.

use crate::reference::{risk_terms_for, ReferenceData};

/// One flagged term and the reason it was flagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskMatch {
    /// The matched ingredient or risk term, lower-cased.
    pub term: String,
    /// The table's effect text, or `"Avoid due to <condition>"`.
    pub reason: String,
}

/// Find every risky ingredient mentioned in `text`.
///
/// Global harmful-table matches come first in table order, then
/// condition-specific matches per selected condition in selection order,
/// terms in table order. Nothing is deduplicated: the same term surfaced
/// by several table entries is reported once per entry. Condition names
/// absent from the risk table are silently ignored.
pub fn match_risks(text: &str, conditions: &[String], reference: &ReferenceData) -> Vec<RiskMatch> {
    let haystack = text.to_lowercase();
    let mut matches = Vec::new();

    for entry in &reference.harmful {
        let name = entry.name.to_lowercase();
        if haystack.contains(&name) {
            matches.push(RiskMatch {
                term: name,
                reason: entry.effect.clone(),
            });
        }
    }

    for condition in conditions {
        let Some(terms) = risk_terms_for(condition) else {
            continue;
        };
        for term in terms {
            let needle = term.to_lowercase();
            if haystack.contains(&needle) {
                matches.push(RiskMatch {
                    term: needle,
                    reason: format!("Avoid due to {condition}"),
                });
            }
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::HarmfulIngredient;

    fn table(rows: &[(&str, &str)]) -> ReferenceData {
        ReferenceData {
            harmful: rows
                .iter()
                .map(|(name, effect)| HarmfulIngredient {
                    name: name.to_string(),
                    effect: effect.to_string(),
                })
                .collect(),
        }
    }

    fn conditions(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_global_matches_in_table_order() {
        let reference = table(&[
            ("salt", "retains water"),
            ("sugar", "raises blood glucose"),
        ]);
        let matches = match_risks("Contains sugar and salt.", &[], &reference);
        let terms: Vec<&str> = matches.iter().map(|m| m.term.as_str()).collect();
        assert_eq!(terms, vec!["salt", "sugar"]);
        assert_eq!(matches[1].reason, "raises blood glucose");
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let reference = table(&[("sugar", "raises blood glucose")]);
        let upper = match_risks("SUGAR content high", &[], &reference);
        let lower = match_risks("sugar content high", &[], &reference);
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn test_substring_match_inside_longer_word() {
        // No word-boundary checks: "soy" matches inside "soybean"
        let reference = table(&[]);
        let matches = match_risks(
            "contains soybean oil",
            &conditions(&["Thyroid Issues"]),
            &reference,
        );
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].term, "soy");
        assert_eq!(matches[0].reason, "Avoid due to Thyroid Issues");
    }

    #[test]
    fn test_empty_text_yields_no_matches() {
        let reference = table(&[("sugar", "raises blood glucose")]);
        let matches = match_risks("", &conditions(&["Diabetes", "Migraines"]), &reference);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_unknown_condition_is_silently_ignored() {
        let reference = table(&[("sodium", "raises blood pressure")]);
        let with_unknown = match_risks(
            "contains sodium",
            &conditions(&["Nonexistent Condition"]),
            &reference,
        );
        let without = match_risks("contains sodium", &[], &reference);
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_no_deduplication_across_sources() {
        // "sugar" is in the global table and is a Diabetes risk term
        let reference = table(&[("sugar", "raises blood glucose")]);
        let matches = match_risks(
            "lots of sugar here",
            &conditions(&["Diabetes"]),
            &reference,
        );
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].reason, "raises blood glucose");
        assert_eq!(matches[1].reason, "Avoid due to Diabetes");
    }

    #[test]
    fn test_term_reported_once_per_condition() {
        // "artificial sweeteners" appears under several conditions
        let reference = table(&[]);
        let matches = match_risks(
            "made with artificial sweeteners",
            &conditions(&["Migraines", "Kidney Disease"]),
            &reference,
        );
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].reason, "Avoid due to Migraines");
        assert_eq!(matches[1].reason, "Avoid due to Kidney Disease");
    }

    #[test]
    fn test_duplicate_table_rows_each_match() {
        let reference = table(&[
            ("sugar", "first effect"),
            ("sugar", "second effect"),
        ]);
        let matches = match_risks("sugar", &[], &reference);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].reason, "first effect");
        assert_eq!(matches[1].reason, "second effect");
    }

    #[test]
    fn test_global_matches_precede_condition_matches() {
        let reference = table(&[("trans fats", "raises heart disease risk")]);
        let matches = match_risks(
            "Ingredients: water, sugar, trans fats, salt",
            &conditions(&["Diabetes"]),
            &reference,
        );
        assert_eq!(
            matches,
            vec![
                RiskMatch {
                    term: "trans fats".to_string(),
                    reason: "raises heart disease risk".to_string(),
                },
                RiskMatch {
                    term: "sugar".to_string(),
                    reason: "Avoid due to Diabetes".to_string(),
                },
            ]
        );
    }
}
