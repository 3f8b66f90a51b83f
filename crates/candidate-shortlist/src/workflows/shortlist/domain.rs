use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Raw candidate as submitted by the intake form.
///
/// Known fields are tolerated when missing or `null`; every other field is kept in
/// `extra` so it can be echoed back on the finalist record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Education,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_availability: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_experiences: Vec<WorkExperience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandidateRecord {
    pub fn normalized_skills(&self) -> HashSet<String> {
        self.skills.iter().map(|skill| skill.to_lowercase()).collect()
    }

    pub fn normalized_location(&self) -> String {
        self.location.to_lowercase()
    }

    pub fn normalized_education(&self) -> String {
        self.education.highest_level.to_lowercase()
    }

    pub fn has_github(&self) -> bool {
        self.github.as_deref().is_some_and(|url| !url.is_empty())
    }

    pub fn has_linkedin(&self) -> bool {
        self.linkedin.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Drops passthrough fields that would collide with computed finalist fields.
    pub fn without_computed_fields(mut self) -> Self {
        for key in COMPUTED_FIELDS {
            self.extra.remove(key);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "null_as_default")]
    pub highest_level: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a candidate's work history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(
        rename = "startDate",
        default,
        skip_serializing_if = "DateField::is_missing"
    )]
    pub start_date: DateField,
    #[serde(
        rename = "endDate",
        default,
        skip_serializing_if = "DateField::is_missing"
    )]
    pub end_date: DateField,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkExperience {
    pub fn new(start_date: DateField, end_date: DateField) -> Self {
        Self {
            start_date,
            end_date,
            extra: Map::new(),
        }
    }

    pub fn between(start: &str, end: &str) -> Self {
        Self::new(DateField::from(start), DateField::from(end))
    }
}

/// Date value exactly as it arrived on the wire.
///
/// Non-string JSON values are kept as `Unreadable` instead of failing the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DateField {
    #[default]
    Missing,
    Text(String),
    Unreadable(Value),
}

impl DateField {
    pub fn is_missing(&self) -> bool {
        matches!(self, DateField::Missing)
    }
}

impl From<&str> for DateField {
    fn from(value: &str) -> Self {
        DateField::Text(value.to_string())
    }
}

impl From<Option<&str>> for DateField {
    fn from(value: Option<&str>) -> Self {
        value.map(DateField::from).unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for DateField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => DateField::Missing,
            Value::String(text) => DateField::Text(text),
            other => DateField::Unreadable(other),
        })
    }
}

impl Serialize for DateField {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DateField::Missing => serializer.serialize_none(),
            DateField::Text(text) => serializer.serialize_str(text),
            DateField::Unreadable(value) => value.serialize(serializer),
        }
    }
}

/// Candidate with per-record scores; `exp_score` is relative to the whole batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub record: CandidateRecord,
    pub exp_years: u32,
    pub skill_score: f64,
    pub exp_score: f64,
}

/// Scored candidate carrying the weighted final score.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedCandidate {
    pub scored: ScoredCandidate,
    pub final_score: f64,
}

/// Keys written by [`RankedCandidate`] next to the submitted fields.
pub const COMPUTED_FIELDS: [&str; 6] = [
    "final_score",
    "skill_score",
    "exp_score",
    "exp_years",
    "explanation",
    "key_skills",
];

/// Finalist record handed to presentation and export.
///
/// Submitted fields named like a computed one are dropped so each key appears once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub record: CandidateRecord,
    pub final_score: f64,
    pub skill_score: f64,
    pub exp_score: f64,
    pub exp_years: u32,
    pub explanation: String,
    pub key_skills: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_tolerates_missing_and_null_fields() {
        let record: CandidateRecord = serde_json::from_value(json!({
            "name": "Ada",
            "skills": null,
            "education": null,
            "email": "ada@example.com"
        }))
        .expect("record decodes");

        assert!(record.skills.is_empty());
        assert_eq!(record.location, "");
        assert_eq!(record.education.highest_level, "");
        assert!(record.work_experiences.is_empty());
        assert_eq!(record.extra.get("email"), Some(&json!("ada@example.com")));
    }

    #[test]
    fn date_fields_keep_their_wire_shape() {
        let entry: WorkExperience = serde_json::from_value(json!({
            "startDate": 2019,
            "endDate": null,
            "company": "Initech"
        }))
        .expect("entry decodes");

        assert_eq!(entry.start_date, DateField::Unreadable(json!(2019)));
        assert_eq!(entry.end_date, DateField::Missing);
        assert_eq!(entry.extra.get("company"), Some(&json!("Initech")));

        let encoded = serde_json::to_value(&entry).expect("entry encodes");
        assert_eq!(encoded, json!({ "startDate": 2019, "company": "Initech" }));
    }

    #[test]
    fn profile_links_require_non_empty_values() {
        let record = CandidateRecord {
            github: Some(String::new()),
            linkedin: Some("https://linkedin.com/in/ada".to_string()),
            ..CandidateRecord::default()
        };

        assert!(!record.has_github());
        assert!(record.has_linkedin());
    }
}
