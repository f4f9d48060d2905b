use super::profile::{CompanyProfile, Recommendation};
use super::rules::{Effect, RuleSet};

/// Recommendation together with the ids of the rules that fired, in firing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Evaluation {
    pub recommendation: Recommendation,
    pub fired: Vec<String>,
}

/// Single pass over the rule table. Entries are appended as rules fire; nothing is de-duplicated.
pub(crate) fn evaluate(profile: &CompanyProfile, rules: &RuleSet) -> Evaluation {
    let mut evaluation = Evaluation::default();

    for rule in rules.iter() {
        if !rule.when.matches(profile) {
            continue;
        }

        for effect in &rule.effects {
            apply(&mut evaluation.recommendation, effect);
        }
        evaluation.fired.push(rule.id.clone());
    }

    evaluation
}

fn apply(recommendation: &mut Recommendation, effect: &Effect) {
    match effect {
        Effect::AddMandatory { text } => recommendation.mandatory.push(text.clone()),
        Effect::AddOptional { text } => recommendation.optional.push(text.clone()),
        Effect::AddSchemes { codes } => recommendation.schemes.extend(codes.iter().cloned()),
    }
}
