use super::normalizer::split_compliance;
use super::profile::Recommendation;
use super::RecommendationEngine;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// CSV header (matched case-insensitively) and the request field it feeds.
const PROFILE_COLUMNS: [(&str, &str); 5] = [
    ("sector", "sector"),
    ("size", "size"),
    ("state", "state"),
    ("udyam", "udyam"),
    ("turnoverCr", "turnoverCr"),
];

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read company profiles: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid company profile CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV header has none of the profile columns (name, sector, size, state, udyam, turnoverCr, compliance)")]
    UnrecognisedHeader,
}

/// Recommendation produced for one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreeningRow {
    pub name: String,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

/// Screens a CSV export of company profiles against a recommendation engine.
pub struct BatchScreening;

impl BatchScreening {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        engine: &RecommendationEngine,
    ) -> Result<Vec<ScreeningRow>, BatchError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, engine)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        engine: &RecommendationEngine,
    ) -> Result<Vec<ScreeningRow>, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnMap::from_headers(csv_reader.headers()?)?;
        let mut rows = Vec::new();

        for (index, record) in csv_reader.records().enumerate() {
            let record = record?;
            let name = columns
                .cell(&record, columns.name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("row {}", index + 1));
            let input = columns.profile_input(&record);

            rows.push(ScreeningRow {
                name,
                recommendation: engine.recommend(&input),
            });
        }

        Ok(rows)
    }
}

struct ColumnMap {
    name: Option<usize>,
    compliance: Option<usize>,
    profile: Vec<(&'static str, usize)>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, BatchError> {
        let position = |wanted: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(wanted))
        };

        let name = position("name");
        let compliance = position("compliance");
        let profile = PROFILE_COLUMNS
            .iter()
            .filter_map(|&(header, key)| position(header).map(|index| (key, index)))
            .collect::<Vec<_>>();

        if name.is_none() && compliance.is_none() && profile.is_empty() {
            return Err(BatchError::UnrecognisedHeader);
        }

        Ok(Self {
            name,
            compliance,
            profile,
        })
    }

    fn cell<'r>(&self, record: &'r csv::StringRecord, index: Option<usize>) -> Option<&'r str> {
        index
            .and_then(|index| record.get(index))
            .filter(|value| !value.is_empty())
    }

    fn profile_input(&self, record: &csv::StringRecord) -> Value {
        let mut fields = Map::new();

        for (key, index) in &self.profile {
            if let Some(value) = self.cell(record, Some(*index)) {
                fields.insert(key.to_string(), Value::String(value.to_string()));
            }
        }

        if let Some(raw) = self.cell(record, self.compliance) {
            let tokens = split_compliance(raw).into_iter().map(Value::String).collect();
            fields.insert("compliance".to_string(), Value::Array(tokens));
        }

        Value::Object(fields)
    }
}
