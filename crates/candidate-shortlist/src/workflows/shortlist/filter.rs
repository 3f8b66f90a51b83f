use std::collections::BTreeSet;

use super::domain::{CandidateRecord, ScoredCandidate};

/// Inclusion criteria applied after scoring. Empty sets impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    skills: BTreeSet<String>,
    locations: BTreeSet<String>,
    work_types: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new<S, W>(skills: S, locations: &str, work_types: W) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        Self {
            skills: skills
                .into_iter()
                .map(|skill| skill.as_ref().trim().to_lowercase())
                .filter(|skill| !skill.is_empty())
                .collect(),
            locations: parse_locations(locations),
            work_types: work_types
                .into_iter()
                .map(|work_type| work_type.as_ref().trim().to_string())
                .filter(|work_type| !work_type.is_empty())
                .collect(),
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.skills.is_empty() && self.locations.is_empty() && self.work_types.is_empty()
    }

    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    pub fn matches(&self, record: &CandidateRecord) -> bool {
        self.matches_skills(record) && self.matches_location(record) && self.matches_work_type(record)
    }

    /// Keeps matching candidates in their original order.
    pub fn apply(&self, candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
        if self.is_unconstrained() {
            return candidates;
        }

        candidates
            .into_iter()
            .filter(|candidate| self.matches(&candidate.record))
            .collect()
    }

    fn matches_skills(&self, record: &CandidateRecord) -> bool {
        if self.skills.is_empty() {
            return true;
        }
        let skills = record.normalized_skills();
        self.skills.iter().any(|skill| skills.contains(skill))
    }

    fn matches_location(&self, record: &CandidateRecord) -> bool {
        self.locations.is_empty() || self.locations.contains(&record.normalized_location())
    }

    fn matches_work_type(&self, record: &CandidateRecord) -> bool {
        self.work_types.is_empty()
            || record
                .work_availability
                .iter()
                .any(|availability| self.work_types.contains(availability))
    }
}

/// Splits a comma separated location list into lowercase entries.
pub fn parse_locations(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|part| part.trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}
