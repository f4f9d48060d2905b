//! Rule-based compliance recommendations.
//!
//! A loosely typed company profile is normalized into a [`CompanyProfile`] and run through an
//! ordered [`RuleSet`]. Each rule that fires appends to the mandatory, optional, or scheme
//! buckets of the resulting [`Recommendation`], so output order always follows rule order.

mod batch;
mod evaluator;
mod normalizer;
mod profile;
pub mod router;
mod rules;

#[cfg(test)]
mod tests;

pub use batch::{BatchError, BatchScreening, ScreeningRow};
pub use normalizer::{normalize, split_compliance};
pub use profile::{CompanyProfile, CompanySize, Recommendation};
pub use router::recommendation_router;
pub use rules::{Condition, Effect, Rule, RuleSet, RuleSetError, CONSENT_FLAG};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Stateless evaluator holding the rule table it was configured with.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    rules: RuleSet,
}

impl RecommendationEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(RuleSet::standard())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn recommend(&self, input: &Value) -> Recommendation {
        self.explain(input).recommendation
    }

    /// Like [`recommend`](Self::recommend) but keeps the normalized profile and rule trail.
    pub fn explain(&self, input: &Value) -> RecommendationOutcome {
        let profile = normalize(input);
        let evaluation = evaluator::evaluate(&profile, &self.rules);

        debug!(
            fired = evaluation.fired.len(),
            mandatory = evaluation.recommendation.mandatory.len(),
            optional = evaluation.recommendation.optional.len(),
            schemes = evaluation.recommendation.schemes.len(),
            "evaluated company profile"
        );

        RecommendationOutcome {
            profile,
            recommendation: evaluation.recommendation,
            fired_rules: evaluation.fired,
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Evaluation output with the audit trail of fired rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationOutcome {
    pub profile: CompanyProfile,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub fired_rules: Vec<String>,
}

/// Evaluates `input` against the built-in rule table.
pub fn recommend(input: &Value) -> Recommendation {
    RecommendationEngine::standard().recommend(input)
}
