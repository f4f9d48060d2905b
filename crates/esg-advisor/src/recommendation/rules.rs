use super::profile::CompanyProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

pub const CONSENT_FLAG: &str = "consents:valid";

pub const CONSENT_TO_OPERATE: &str =
    "Obtain/renew pollution-control Consent to Operate (Air/Water statutes)";
pub const HAZARDOUS_WASTE: &str = "Hazardous & Other Wastes rules compliance (if applicable)";
pub const SAFETY_CLEARANCE: &str = "Occupational Safety & Health and Fire clearance compliance";
pub const FOOD_HYGIENE: &str = "Effluent treatment and food-safety hygiene compliance";
pub const CHEMICAL_STORAGE: &str = "Hazardous chemicals storage, safety-data-sheet management, and extended producer responsibility (where applicable)";
pub const CIRCULAR_CAPEX: &str = "Apply for circular-economy CAPEX subsidy program";
pub const GOA_CONSENT: &str =
    "State pollution-control board Consent to Operate (Air/Water); verify sector-specific limits & validity";

pub const SMALL_ENTERPRISE_SCHEMES: [&str; 4] = ["TEAM", "ZED", "GIFT", "SIDBI-4E"];

/// Predicate evaluated against a normalized profile. Absent text fields compare as `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    Always,
    MissingComplianceFlag { flag: String },
    /// Exact, case-sensitive match against the raw size label.
    SizeIn { sizes: Vec<String> },
    /// Case-insensitive substring match on the sector.
    SectorContainsAny { keywords: Vec<String> },
    /// Case-insensitive equality on the state.
    StateEquals { state: String },
    TurnoverAtLeast { crores: f64 },
    TurnoverBelow { crores: f64 },
    All { conditions: Vec<Condition> },
    Any { conditions: Vec<Condition> },
    Not { condition: Box<Condition> },
}

impl Condition {
    pub fn matches(&self, profile: &CompanyProfile) -> bool {
        match self {
            Condition::Always => true,
            Condition::MissingComplianceFlag { flag } => !profile.has_compliance_flag(flag),
            Condition::SizeIn { sizes } => {
                let size = profile.size_or_empty();
                sizes.iter().any(|candidate| candidate == size)
            }
            Condition::SectorContainsAny { keywords } => {
                let sector = profile.sector_or_empty().to_lowercase();
                keywords
                    .iter()
                    .any(|keyword| sector.contains(&keyword.to_lowercase()))
            }
            Condition::StateEquals { state } => {
                profile.state_or_empty().to_lowercase() == state.to_lowercase()
            }
            Condition::TurnoverAtLeast { crores } => profile
                .turnover_cr
                .map(|turnover| turnover >= *crores)
                .unwrap_or(false),
            Condition::TurnoverBelow { crores } => profile
                .turnover_cr
                .map(|turnover| turnover < *crores)
                .unwrap_or(false),
            Condition::All { conditions } => conditions.iter().all(|inner| inner.matches(profile)),
            Condition::Any { conditions } => conditions.iter().any(|inner| inner.matches(profile)),
            Condition::Not { condition } => !condition.matches(profile),
        }
    }
}

/// Entry appended to a recommendation bucket when a rule fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    AddMandatory { text: String },
    AddOptional { text: String },
    AddSchemes { codes: Vec<String> },
}

impl Effect {
    pub fn mandatory(text: &str) -> Self {
        Effect::AddMandatory {
            text: text.to_string(),
        }
    }

    pub fn optional(text: &str) -> Self {
        Effect::AddOptional {
            text: text.to_string(),
        }
    }

    pub fn schemes(codes: &[&str]) -> Self {
        Effect::AddSchemes {
            codes: codes.iter().map(|code| code.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub when: Condition,
    pub effects: Vec<Effect>,
}

impl Rule {
    pub fn new(id: &str, description: &str, when: Condition, effects: Vec<Effect>) -> Self {
        Self {
            id: id.to_string(),
            description: description.to_string(),
            when,
            effects,
        }
    }
}

/// Ordered rule table. Evaluation order is list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

#[derive(Debug, thiserror::Error)]
pub enum RuleSetError {
    #[error("failed to read rule table: {0}")]
    Io(#[from] std::io::Error),
    #[error("rule table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("rule table contains no rules")]
    Empty,
    #[error("rule at position {0} has a blank id")]
    BlankId(usize),
    #[error("rule id '{0}' appears more than once")]
    DuplicateId(String),
    #[error("rule '{0}' has no effects")]
    NoEffects(String),
    #[error("rule '{0}' emits blank text")]
    BlankText(String),
    #[error("rule '{0}' suggests an empty scheme list")]
    NoSchemeCodes(String),
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleSetError> {
        let set = Self { rules };
        set.validate()?;
        Ok(set)
    }

    /// Built-in compliance table for small and medium enterprises.
    pub fn standard() -> Self {
        let rules = vec![
            Rule::new(
                "consent-to-operate",
                "Pollution-control consent is missing or expired",
                Condition::MissingComplianceFlag {
                    flag: CONSENT_FLAG.to_string(),
                },
                vec![Effect::mandatory(CONSENT_TO_OPERATE)],
            ),
            Rule::new(
                "hazardous-waste-baseline",
                "Applies to every enterprise",
                Condition::Always,
                vec![Effect::mandatory(HAZARDOUS_WASTE)],
            ),
            Rule::new(
                "safety-baseline",
                "Applies to every enterprise",
                Condition::Always,
                vec![Effect::mandatory(SAFETY_CLEARANCE)],
            ),
            Rule::new(
                "small-enterprise-schemes",
                "Micro and small enterprises qualify for the MSME scheme bundle",
                Condition::SizeIn {
                    sizes: vec!["Micro".to_string(), "Small".to_string()],
                },
                vec![Effect::schemes(&SMALL_ENTERPRISE_SCHEMES)],
            ),
            Rule::new(
                "food-beverage",
                "Food and beverage processing",
                Condition::SectorContainsAny {
                    keywords: vec!["food".to_string(), "beverage".to_string()],
                },
                vec![Effect::mandatory(FOOD_HYGIENE)],
            ),
            Rule::new(
                "chemicals-pharma",
                "Chemical and pharmaceutical manufacturing",
                Condition::SectorContainsAny {
                    keywords: vec!["chem".to_string(), "pharma".to_string()],
                },
                vec![
                    Effect::mandatory(CHEMICAL_STORAGE),
                    Effect::optional(CIRCULAR_CAPEX),
                ],
            ),
            Rule::new(
                "goa-consent",
                "Goa state pollution-control board",
                Condition::StateEquals {
                    state: "goa".to_string(),
                },
                vec![Effect::mandatory(GOA_CONSENT)],
            ),
        ];

        Self { rules }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleSetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RuleSetError> {
        let set: RuleSet = serde_json::from_reader(reader)?;
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.rules.is_empty() {
            return Err(RuleSetError::Empty);
        }

        let mut seen = HashSet::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(RuleSetError::BlankId(index));
            }
            if !seen.insert(rule.id.as_str()) {
                return Err(RuleSetError::DuplicateId(rule.id.clone()));
            }
            if rule.effects.is_empty() {
                return Err(RuleSetError::NoEffects(rule.id.clone()));
            }

            for effect in &rule.effects {
                match effect {
                    Effect::AddMandatory { text } | Effect::AddOptional { text } => {
                        if text.trim().is_empty() {
                            return Err(RuleSetError::BlankText(rule.id.clone()));
                        }
                    }
                    Effect::AddSchemes { codes } => {
                        if codes.is_empty() {
                            return Err(RuleSetError::NoSchemeCodes(rule.id.clone()));
                        }
                        if codes.iter().any(|code| code.trim().is_empty()) {
                            return Err(RuleSetError::BlankText(rule.id.clone()));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
