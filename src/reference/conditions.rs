//! Condition-specific risk terms
//!
//! Fixed mapping from a health condition to the ingredient names and
//! classes to avoid under that condition. Order matters: matches are
//! reported in the order terms appear here.

/// Health condition names paired with their risk terms.
pub const CONDITION_RISKS: &[(&str, &[&str])] = &[
    (
        "Diabetes",
        &[
            "sugar",
            "high fructose corn syrup",
            "aspartame",
            "maltodextrin",
            "dextrose",
            "glucose",
            "sucrose",
            "honey",
            "agave syrup",
        ],
    ),
    (
        "High Blood Pressure",
        &[
            "sodium",
            "monosodium glutamate (MSG)",
            "caffeine",
            "salt",
            "preservatives like sodium benzoate",
            "processed meats",
            "hydrogenated oils",
        ],
    ),
    (
        "Thyroid Issues",
        &[
            "soy",
            "certain preservatives",
            "fluoride",
            "cruciferous vegetables (in excess)",
            "artificial food coloring",
            "nitrate preservatives",
        ],
    ),
    (
        "Kidney Disease",
        &[
            "high sodium",
            "phosphates",
            "potassium additives",
            "processed foods",
            "artificial sweeteners",
        ],
    ),
    (
        "Heart Disease",
        &[
            "trans fats",
            "saturated fats",
            "cholesterol",
            "hydrogenated oils",
            "processed meats",
            "high sodium",
            "refined carbs",
        ],
    ),
    (
        "Liver Disease",
        &[
            "alcohol",
            "high fructose corn syrup",
            "excessive processed fats",
            "artificial additives",
            "pesticide residues",
        ],
    ),
    (
        "Gastrointestinal Issues",
        &[
            "artificial sweeteners",
            "high fructose corn syrup",
            "sorbitol",
            "carrageenan",
            "processed dairy",
            "fried foods",
        ],
    ),
    (
        "Skin Conditions (Acne, Eczema, Psoriasis)",
        &[
            "dairy",
            "refined sugar",
            "artificial flavors",
            "processed oils",
            "gluten (for some individuals)",
        ],
    ),
    (
        "Migraines",
        &[
            "MSG",
            "caffeine",
            "artificial sweeteners",
            "processed meats",
            "aged cheese",
            "nitrates",
            "chocolate",
        ],
    ),
    (
        "Joint Pain/Arthritis",
        &[
            "processed sugars",
            "nightshade vegetables (for some)",
            "excess omega-6 fatty acids",
            "gluten",
            "alcohol",
        ],
    ),
    (
        "Allergies & Asthma",
        &[
            "sulfites",
            "food dyes",
            "preservatives like benzoates",
            "processed dairy",
            "gluten",
        ],
    ),
    (
        "Cancer Risks",
        &[
            "processed meats",
            "nitrates",
            "artificial sweeteners",
            "refined sugars",
            "highly processed foods",
            "pesticide residues",
        ],
    ),
];

/// All condition names, in table order. This is the option list the
/// multi-select control presents.
pub fn condition_names() -> impl Iterator<Item = &'static str> {
    CONDITION_RISKS.iter().map(|(name, _)| *name)
}

/// Risk terms for a condition, or `None` for a name not in the table.
pub fn risk_terms_for(condition: &str) -> Option<&'static [&'static str]> {
    CONDITION_RISKS
        .iter()
        .find(|(name, _)| *name == condition)
        .map(|(_, terms)| *terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_conditions() {
        assert_eq!(CONDITION_RISKS.len(), 12);
    }

    #[test]
    fn test_every_condition_has_terms() {
        for (name, terms) in CONDITION_RISKS {
            assert!(
                (4..=9).contains(&terms.len()),
                "{} has {} terms",
                name,
                terms.len()
            );
        }
    }

    #[test]
    fn test_lookup_known_condition() {
        let terms = risk_terms_for("Diabetes").unwrap();
        assert_eq!(terms[0], "sugar");
    }

    #[test]
    fn test_lookup_unknown_condition() {
        assert!(risk_terms_for("Nonexistent Condition").is_none());
    }
}
