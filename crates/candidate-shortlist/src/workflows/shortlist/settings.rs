use serde::Deserialize;

use super::experience::DEFAULT_REFERENCE_YEAR;
use super::filter::FilterCriteria;
use super::scoring::default_skill_keywords;
use super::weights::RankingWeights;

/// Host supplied knobs for one ranking run.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortlistSettings {
    pub skill_weight: f64,
    pub experience_weight: f64,
    pub top_n: usize,
    pub skill_keywords: Vec<String>,
    pub reference_year: i32,
    pub filter_skills: Vec<String>,
    /// Comma separated list, matched case-insensitively.
    pub filter_locations: String,
    pub filter_work_types: Vec<String>,
}

impl Default for ShortlistSettings {
    fn default() -> Self {
        Self {
            skill_weight: 0.6,
            experience_weight: 0.4,
            top_n: 5,
            skill_keywords: default_skill_keywords(),
            reference_year: DEFAULT_REFERENCE_YEAR,
            filter_skills: Vec::new(),
            filter_locations: String::new(),
            filter_work_types: Vec::new(),
        }
    }
}

impl ShortlistSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_weight("skill_weight", self.skill_weight)?;
        check_weight("experience_weight", self.experience_weight)?;
        if self.top_n == 0 {
            return Err(SettingsError::EmptyShortlist);
        }
        Ok(())
    }

    pub fn weights(&self) -> RankingWeights {
        RankingWeights::normalized(self.skill_weight, self.experience_weight)
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            &self.filter_skills,
            &self.filter_locations,
            &self.filter_work_types,
        )
    }

    /// Layers caller overrides on top of these settings.
    pub fn merged(&self, overrides: SettingsOverrides) -> Self {
        let SettingsOverrides {
            skill_weight,
            experience_weight,
            top_n,
            skill_keywords,
            reference_year,
            filter_skills,
            filter_locations,
            filter_work_types,
        } = overrides;

        Self {
            skill_weight: skill_weight.unwrap_or(self.skill_weight),
            experience_weight: experience_weight.unwrap_or(self.experience_weight),
            top_n: top_n.unwrap_or(self.top_n),
            skill_keywords: skill_keywords.unwrap_or_else(|| self.skill_keywords.clone()),
            reference_year: reference_year.unwrap_or(self.reference_year),
            filter_skills: filter_skills.unwrap_or_else(|| self.filter_skills.clone()),
            filter_locations: filter_locations.unwrap_or_else(|| self.filter_locations.clone()),
            filter_work_types: filter_work_types
                .unwrap_or_else(|| self.filter_work_types.clone()),
        }
    }
}

/// Optional per-request replacements for [`ShortlistSettings`] fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsOverrides {
    pub skill_weight: Option<f64>,
    pub experience_weight: Option<f64>,
    pub top_n: Option<usize>,
    pub skill_keywords: Option<Vec<String>>,
    pub reference_year: Option<i32>,
    pub filter_skills: Option<Vec<String>>,
    pub filter_locations: Option<String>,
    pub filter_work_types: Option<Vec<String>>,
}

impl SettingsOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("{field} must be a finite number >= 0 (got {value})")]
    InvalidWeight { field: &'static str, value: f64 },
    #[error("top_n must be at least 1")]
    EmptyShortlist,
}

fn check_weight(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidWeight { field, value })
    }
}
