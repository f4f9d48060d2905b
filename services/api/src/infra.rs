use esg_advisor::config::RulesConfig;
use esg_advisor::error::AppError;
use esg_advisor::recommendation::{RecommendationEngine, RuleSet};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the engine from an explicit rule table, `ESG_RULES_PATH`, or the built-in table.
pub(crate) fn load_engine(
    override_path: Option<PathBuf>,
    configured: &RulesConfig,
) -> Result<RecommendationEngine, AppError> {
    let path = override_path.or_else(|| configured.table_path.clone());

    let rules = match path {
        Some(path) => {
            let rules = RuleSet::from_path(&path)?;
            info!(path = %path.display(), rules = rules.len(), "loaded rule table");
            rules
        }
        None => RuleSet::standard(),
    };

    Ok(RecommendationEngine::new(rules))
}
