use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::de::IgnoredAny;
use serde_json::value::RawValue;
use serde_json::{json, Value};

use super::normalizer::split_compliance;
use super::profile::Recommendation;
use super::rules::RuleSet;
use super::{RecommendationEngine, RecommendationOutcome};

/// Router builder exposing the recommendation endpoints.
pub fn recommendation_router(engine: Arc<RecommendationEngine>) -> Router {
    Router::new()
        .route("/api/v1/recommend", post(recommend_handler))
        .route("/api/v1/recommend/explain", post(explain_handler))
        .route("/api/v1/rules", get(rules_handler))
        .with_state(engine)
}

pub(crate) async fn recommend_handler(
    State(engine): State<Arc<RecommendationEngine>>,
    body: Bytes,
) -> Response {
    match parse_body(&body) {
        Ok(body) => {
            let recommendation: Recommendation = engine.recommend(&request_input(body));
            (StatusCode::OK, Json(recommendation)).into_response()
        }
        Err(error) => malformed_body(error),
    }
}

pub(crate) async fn explain_handler(
    State(engine): State<Arc<RecommendationEngine>>,
    body: Bytes,
) -> Response {
    match parse_body(&body) {
        Ok(body) => {
            let outcome: RecommendationOutcome = engine.explain(&request_input(body));
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(error) => malformed_body(error),
    }
}

pub(crate) async fn rules_handler(
    State(engine): State<Arc<RecommendationEngine>>,
) -> Json<RuleSet> {
    Json(engine.rules().clone())
}

/// Parses any syntactically valid JSON body. Top-level fields whose values cannot be
/// represented (numbers outside the f64 range) become `null`; other unrepresentable
/// bodies become `null` as a whole, which normalizes like `{}`.
pub(crate) fn parse_body(raw: &[u8]) -> Result<Value, serde_json::Error> {
    let error = match serde_json::from_slice::<Value>(raw) {
        Ok(value) => return Ok(value),
        Err(error) => error,
    };

    if let Ok(fields) = serde_json::from_slice::<BTreeMap<String, Box<RawValue>>>(raw) {
        let fields = fields
            .into_iter()
            .map(|(key, value)| {
                let value = serde_json::from_str(value.get()).unwrap_or(Value::Null);
                (key, value)
            })
            .collect();
        return Ok(Value::Object(fields));
    }

    serde_json::from_slice::<IgnoredAny>(raw)
        .map(|_| Value::Null)
        .map_err(|_| error)
}

fn malformed_body(error: serde_json::Error) -> Response {
    let payload = json!({
        "error": format!("request body is not valid JSON: {error}"),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

/// Form submissions carry `compliance` as a comma-separated string; expand it to a list.
pub(crate) fn request_input(mut body: Value) -> Value {
    if let Some(fields) = body.as_object_mut() {
        let tokens = match fields.get("compliance") {
            Some(Value::String(raw)) => Some(split_compliance(raw)),
            _ => None,
        };
        if let Some(tokens) = tokens {
            let list = tokens.into_iter().map(Value::String).collect();
            fields.insert("compliance".to_string(), Value::Array(list));
        }
    }
    body
}
