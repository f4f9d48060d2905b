use serde::{Deserialize, Serialize};

/// Canonical company profile produced by the normalizer for a single evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub udyam: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover_cr: Option<f64>,
    #[serde(default)]
    pub compliance: Vec<String>,
}

impl CompanyProfile {
    pub fn sector_or_empty(&self) -> &str {
        self.sector.as_deref().unwrap_or("")
    }

    pub fn size_or_empty(&self) -> &str {
        self.size.as_deref().unwrap_or("")
    }

    pub fn state_or_empty(&self) -> &str {
        self.state.as_deref().unwrap_or("")
    }

    /// Exact token membership; compliance flags are never trimmed or case-folded.
    pub fn has_compliance_flag(&self, flag: &str) -> bool {
        self.compliance.iter().any(|token| token == flag)
    }

    /// Enumerated size when the raw label is one of the exact-case values.
    pub fn size_class(&self) -> Option<CompanySize> {
        self.size.as_deref().and_then(CompanySize::from_label)
    }
}

/// Enterprise size classes recognised by the standard rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
    Large,
}

impl CompanySize {
    /// Matches the exact-case labels only; `"MICRO"` and `"small"` are not recognised.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Micro" => Some(Self::Micro),
            "Small" => Some(Self::Small),
            "Medium" => Some(Self::Medium),
            "Large" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompanySize::Micro => "Micro",
            CompanySize::Small => "Small",
            CompanySize::Medium => "Medium",
            CompanySize::Large => "Large",
        }
    }
}

/// Recommendation buckets returned to callers, in rule evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub mandatory: Vec<String>,
    pub optional: Vec<String>,
    pub schemes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_labels_are_case_sensitive() {
        assert_eq!(CompanySize::from_label("Micro"), Some(CompanySize::Micro));
        assert_eq!(CompanySize::from_label("MICRO"), None);
        assert_eq!(CompanySize::from_label("small"), None);
        assert_eq!(CompanySize::Large.label(), "Large");
    }

    #[test]
    fn compliance_flags_match_exact_tokens() {
        let profile = CompanyProfile {
            compliance: vec![" consents:valid".to_string(), "iso:14001".to_string()],
            ..CompanyProfile::default()
        };

        assert!(profile.has_compliance_flag("iso:14001"));
        assert!(!profile.has_compliance_flag("consents:valid"));
    }
}
