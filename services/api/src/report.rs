use crate::infra::load_engine;
use clap::Args;
use esg_advisor::config::RulesConfig;
use esg_advisor::error::AppError;
use esg_advisor::recommendation::{
    split_compliance, BatchScreening, Recommendation, RecommendationOutcome, ScreeningRow,
};
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RecommendArgs {
    /// Industry sector, e.g. "Food Processing"
    #[arg(long)]
    pub(crate) sector: Option<String>,
    /// Enterprise size (Micro, Small, Medium, Large)
    #[arg(long)]
    pub(crate) size: Option<String>,
    /// State of registration, e.g. "Goa"
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Udyam registration number
    #[arg(long)]
    pub(crate) udyam: Option<String>,
    /// Annual turnover in crores
    #[arg(long)]
    pub(crate) turnover_cr: Option<String>,
    /// Comma-separated compliance flags already satisfied, e.g. "consents:valid"
    #[arg(long)]
    pub(crate) compliance: Option<String>,
    /// Include the normalized profile and fired rules
    #[arg(long)]
    pub(crate) explain: bool,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
    /// JSON rule table to load instead of ESG_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// JSON rule table to load instead of ESG_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV with name, sector, size, state, udyam, turnoverCr, compliance columns
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
    /// JSON rule table to load instead of ESG_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) fn run_recommend(mut args: RecommendArgs) -> Result<(), AppError> {
    let engine = load_engine(args.rules.take(), &RulesConfig::from_env()?)?;
    let input = profile_input(&args);
    let outcome = engine.explain(&input);

    let rendered = match (args.json, args.explain) {
        (true, true) => to_json(&outcome),
        (true, false) => to_json(&outcome.recommendation),
        (false, explain) => render_recommendation(&outcome, explain),
    };
    println!("{rendered}");

    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let engine = load_engine(args.rules, &RulesConfig::from_env()?)?;
    println!("{}", to_json(engine.rules()));
    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = load_engine(args.rules, &RulesConfig::from_env()?)?;
    let rows = BatchScreening::from_path(&args.csv, &engine)?;

    if args.json {
        println!("{}", to_json(&rows));
    } else {
        print!("{}", render_batch(&rows));
    }

    Ok(())
}

/// Mirrors the HTTP boundary: blank flags are omitted and compliance is comma-split.
pub(crate) fn profile_input(args: &RecommendArgs) -> Value {
    let mut fields = Map::new();
    let text_fields = [
        ("sector", &args.sector),
        ("size", &args.size),
        ("state", &args.state),
        ("udyam", &args.udyam),
        ("turnoverCr", &args.turnover_cr),
    ];

    for (key, value) in text_fields {
        if let Some(value) = value {
            fields.insert(key.to_string(), Value::String(value.clone()));
        }
    }

    let compliance = args
        .compliance
        .as_deref()
        .map(split_compliance)
        .unwrap_or_default();
    fields.insert(
        "compliance".to_string(),
        Value::Array(compliance.into_iter().map(Value::String).collect()),
    );

    Value::Object(fields)
}

pub(crate) fn render_recommendation(outcome: &RecommendationOutcome, explain: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ESG compliance recommendation");

    if explain {
        let profile = &outcome.profile;
        let _ = writeln!(out, "\nProfile");
        let _ = writeln!(out, "- sector: {}", profile.sector_or_empty());
        let size_class = profile
            .size_class()
            .map(|class| class.label())
            .unwrap_or("unrecognised");
        let _ = writeln!(out, "- size: {} ({size_class})", profile.size_or_empty());
        let _ = writeln!(out, "- state: {}", profile.state_or_empty());
        if let Some(turnover) = profile.turnover_cr {
            let _ = writeln!(out, "- turnover: {turnover} Cr");
        }
        if !profile.compliance.is_empty() {
            let _ = writeln!(out, "- compliance: {}", profile.compliance.join(", "));
        }
    }

    write_buckets(&mut out, &outcome.recommendation);

    if explain {
        let _ = writeln!(out, "\nRules fired: {}", outcome.fired_rules.join(", "));
    }

    out
}

pub(crate) fn render_batch(rows: &[ScreeningRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Screened {} company profile(s)", rows.len());

    for row in rows {
        let _ = writeln!(out, "\n== {}", row.name);
        write_buckets(&mut out, &row.recommendation);
    }

    out
}

fn write_buckets(out: &mut String, recommendation: &Recommendation) {
    let sections = [
        ("Mandatory actions", &recommendation.mandatory),
        ("Optional actions", &recommendation.optional),
        ("Suggested schemes", &recommendation.schemes),
    ];

    for (title, items) in sections {
        if items.is_empty() {
            let _ = writeln!(out, "\n{title}: none");
            continue;
        }
        let _ = writeln!(out, "\n{title}");
        for item in items {
            let _ = writeln!(out, "- {item}");
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
}
