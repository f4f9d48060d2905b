use super::common::*;
use crate::recommendation::rules::{
    CHEMICAL_STORAGE, CIRCULAR_CAPEX, CONSENT_TO_OPERATE, FOOD_HYGIENE, GOA_CONSENT,
    HAZARDOUS_WASTE, SAFETY_CLEARANCE,
};
use crate::recommendation::{recommend, Condition, Effect, RecommendationEngine, Rule, RuleSet};
use serde_json::json;

#[test]
fn valid_consent_suppresses_consent_item() {
    let recommendation = engine().recommend(&textile_small_business());

    assert_eq!(recommendation.mandatory, baseline_mandatory());
    assert_eq!(recommendation.schemes, small_enterprise_schemes());
    assert!(recommendation.optional.is_empty());
}

#[test]
fn goa_food_processor_collects_sector_and_region_items_in_order() {
    let recommendation = engine().recommend(&goa_food_processor());

    assert_eq!(
        recommendation.mandatory,
        vec![
            CONSENT_TO_OPERATE,
            HAZARDOUS_WASTE,
            SAFETY_CLEARANCE,
            FOOD_HYGIENE,
            GOA_CONSENT,
        ]
    );
    assert!(recommendation.schemes.is_empty());
    assert!(recommendation.optional.is_empty());
}

#[test]
fn micro_pharma_gets_chemical_items_and_capex_option() {
    let recommendation = engine().recommend(&micro_pharma());

    assert_eq!(
        recommendation.mandatory,
        vec![HAZARDOUS_WASTE, SAFETY_CLEARANCE, CHEMICAL_STORAGE]
    );
    assert_eq!(recommendation.optional, vec![CIRCULAR_CAPEX]);
    assert_eq!(recommendation.schemes, small_enterprise_schemes());
}

#[test]
fn empty_input_yields_consent_and_baseline_only() {
    let recommendation = recommend(&json!({}));

    assert_eq!(
        recommendation.mandatory,
        vec![CONSENT_TO_OPERATE, HAZARDOUS_WASTE, SAFETY_CLEARANCE]
    );
    assert!(recommendation.schemes.is_empty());
    assert!(recommendation.optional.is_empty());
}

#[test]
fn non_list_compliance_is_treated_as_empty() {
    let from_string = recommend(&json!({ "compliance": "consents:valid" }));
    let from_empty = recommend(&json!({}));

    assert_eq!(from_string, from_empty);
    assert_eq!(from_string.mandatory[0], CONSENT_TO_OPERATE);
}

#[test]
fn baseline_items_are_always_present_and_ordered() {
    let inputs = [
        json!(null),
        json!({}),
        textile_small_business(),
        goa_food_processor(),
        micro_pharma(),
        json!({ "sector": "Chemical beverages", "state": "GOA", "size": "Large" }),
    ];

    for input in inputs {
        let mandatory = engine().recommend(&input).mandatory;
        let hazardous = mandatory
            .iter()
            .position(|item| item == HAZARDOUS_WASTE)
            .expect("hazardous waste item present");
        assert_eq!(mandatory.get(hazardous + 1).map(String::as_str), Some(SAFETY_CLEARANCE));
        assert!(hazardous <= 1, "only the consent item may precede the baseline");
    }
}

#[test]
fn size_rule_matches_exact_case_labels_only() {
    for size in ["Micro", "Small"] {
        let recommendation = recommend(&json!({ "size": size }));
        assert_eq!(recommendation.schemes, small_enterprise_schemes(), "size {size}");
    }

    for size in ["MICRO", "small", "Medium", "Large", "", " Small"] {
        let recommendation = recommend(&json!({ "size": size }));
        assert!(recommendation.schemes.is_empty(), "size {size:?} should not qualify");
    }

    assert!(recommend(&json!({ "size": null })).schemes.is_empty());
}

#[test]
fn sector_and_state_matching_ignore_case() {
    let recommendation = recommend(&json!({
        "sector": "PETROCHEMICALS and BEVERAGE bottling",
        "state": "gOa",
        "compliance": ["consents:valid"],
    }));

    assert_eq!(
        recommendation.mandatory,
        vec![
            HAZARDOUS_WASTE,
            SAFETY_CLEARANCE,
            FOOD_HYGIENE,
            CHEMICAL_STORAGE,
            GOA_CONSENT,
        ]
    );
    assert_eq!(recommendation.optional, vec![CIRCULAR_CAPEX]);
}

#[test]
fn state_must_equal_goa_not_contain_it() {
    let recommendation = recommend(&json!({ "state": "North Goa", "compliance": ["consents:valid"] }));

    assert_eq!(recommendation.mandatory, baseline_mandatory());
}

#[test]
fn turnover_and_udyam_do_not_affect_standard_rules() {
    let with_extras = recommend(&json!({
        "sector": "Textiles",
        "size": "Small",
        "state": "Karnataka",
        "udyam": "UDYAM-KR-03-0001234",
        "turnoverCr": "not a number",
        "compliance": ["consents:valid"],
    }));

    assert_eq!(with_extras, recommend(&textile_small_business()));
}

#[test]
fn repeated_evaluation_is_byte_identical() {
    let engine = engine();
    let input = goa_food_processor();

    let first = serde_json::to_vec(&engine.recommend(&input)).expect("serializes");
    let second = serde_json::to_vec(&engine.recommend(&input)).expect("serializes");

    assert_eq!(first, second);
}

#[test]
fn duplicate_effects_are_kept() {
    let rules = RuleSet::new(vec![
        Rule::new("first", "", Condition::Always, vec![Effect::mandatory("File annual return")]),
        Rule::new("second", "", Condition::Always, vec![Effect::mandatory("File annual return")]),
        Rule::new("codes", "", Condition::Always, vec![Effect::schemes(&["ZED", "ZED"])]),
    ])
    .expect("valid rule set");

    let recommendation = RecommendationEngine::new(rules).recommend(&json!({}));

    assert_eq!(recommendation.mandatory, vec!["File annual return"; 2]);
    assert_eq!(recommendation.schemes, vec!["ZED", "ZED"]);
}

#[test]
fn reduced_rule_set_replaces_the_standard_table() {
    let rules = RuleSet::new(vec![Rule::new(
        "large-turnover",
        "Turnover-banded disclosure",
        Condition::TurnoverAtLeast { crores: 250.0 },
        vec![Effect::optional("Prepare a voluntary sustainability disclosure")],
    )])
    .expect("valid rule set");
    let engine = RecommendationEngine::new(rules);

    let large = engine.recommend(&json!({ "turnoverCr": "300" }));
    let small = engine.recommend(&json!({ "turnoverCr": 12 }));
    let unknown = engine.recommend(&json!({}));

    assert_eq!(large.optional, vec!["Prepare a voluntary sustainability disclosure"]);
    assert!(large.mandatory.is_empty());
    assert!(small.optional.is_empty());
    assert!(unknown.optional.is_empty());
}

#[test]
fn explain_reports_profile_and_fired_rules() {
    let outcome = engine().explain(&goa_food_processor());

    assert_eq!(outcome.profile.state.as_deref(), Some("Goa"));
    assert_eq!(
        outcome.fired_rules,
        vec![
            "consent-to-operate",
            "hazardous-waste-baseline",
            "safety-baseline",
            "food-beverage",
            "goa-consent",
        ]
    );
    assert_eq!(outcome.recommendation, engine().recommend(&goa_food_processor()));
}

#[test]
fn recommendations_only_use_known_texts() {
    let known = every_mandatory_text();
    let recommendation = recommend(&json!({
        "sector": "food chem pharma beverage",
        "state": "goa",
        "size": "Micro",
    }));

    assert_eq!(recommendation.mandatory.len(), known.len());
    for (item, expected) in recommendation.mandatory.iter().zip(known) {
        assert_eq!(item, expected);
    }
}
