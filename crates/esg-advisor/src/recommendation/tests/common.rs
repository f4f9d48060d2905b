use axum::response::Response;
use serde_json::{json, Value};

use crate::recommendation::rules::{
    CHEMICAL_STORAGE, CONSENT_TO_OPERATE, FOOD_HYGIENE, GOA_CONSENT, HAZARDOUS_WASTE,
    SAFETY_CLEARANCE,
};
use crate::recommendation::{RecommendationEngine, RuleSet};

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::new(RuleSet::standard())
}

pub(super) fn textile_small_business() -> Value {
    json!({
        "sector": "Textiles",
        "size": "Small",
        "state": "Karnataka",
        "compliance": ["consents:valid"],
    })
}

pub(super) fn goa_food_processor() -> Value {
    json!({
        "sector": "Food Processing",
        "size": "Medium",
        "state": "Goa",
        "compliance": [],
    })
}

pub(super) fn micro_pharma() -> Value {
    json!({
        "sector": "Pharmaceuticals",
        "size": "Micro",
        "state": "",
        "compliance": ["consents:valid"],
    })
}

pub(super) fn baseline_mandatory() -> Vec<String> {
    vec![HAZARDOUS_WASTE.to_string(), SAFETY_CLEARANCE.to_string()]
}

pub(super) fn every_mandatory_text() -> [&'static str; 6] {
    [
        CONSENT_TO_OPERATE,
        HAZARDOUS_WASTE,
        SAFETY_CLEARANCE,
        FOOD_HYGIENE,
        CHEMICAL_STORAGE,
        GOA_CONSENT,
    ]
}

pub(super) fn small_enterprise_schemes() -> Vec<String> {
    ["TEAM", "ZED", "GIFT", "SIDBI-4E"]
        .iter()
        .map(|code| code.to_string())
        .collect()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
