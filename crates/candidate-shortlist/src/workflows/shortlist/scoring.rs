use super::domain::{CandidateRecord, ScoredCandidate};
use super::experience::ExperienceEstimator;

/// Keywords used when no list is configured.
pub const DEFAULT_SKILL_KEYWORDS: [&str; 5] = ["python", "ml", "aws", "sql", "tensorflow"];

pub fn default_skill_keywords() -> Vec<String> {
    DEFAULT_SKILL_KEYWORDS
        .iter()
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Computes skill coverage and batch-relative experience scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCalculator {
    keywords: Vec<String>,
    estimator: ExperienceEstimator,
}

impl ScoreCalculator {
    pub fn new(keywords: Vec<String>, estimator: ExperienceEstimator) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.trim().to_lowercase())
            .collect();
        Self {
            keywords,
            estimator,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Fraction of the configured keywords found in the candidate's skills.
    pub fn skill_score(&self, record: &CandidateRecord) -> f64 {
        if self.keywords.is_empty() {
            return 0.0;
        }

        let skills = record.normalized_skills();
        let matched = self
            .keywords
            .iter()
            .filter(|keyword| skills.contains(keyword.as_str()))
            .count();

        matched as f64 / self.keywords.len() as f64
    }

    /// Scores every record of the batch.
    ///
    /// Experience is normalized against the longest history in `records`, which is the
    /// whole uploaded batch: candidates removed by later filters still set the scale.
    pub fn score_batch(&self, records: Vec<CandidateRecord>) -> Vec<ScoredCandidate> {
        let raw: Vec<(CandidateRecord, u32, f64)> = records
            .into_iter()
            .map(|record| {
                let exp_years = self.estimator.total_years(&record.work_experiences);
                let skill_score = self.skill_score(&record);
                (record, exp_years, skill_score)
            })
            .collect();

        let max_exp_years = raw.iter().map(|(_, years, _)| *years).max().unwrap_or(0);

        raw.into_iter()
            .map(|(record, exp_years, skill_score)| ScoredCandidate {
                record,
                exp_years,
                skill_score,
                exp_score: normalize_experience(exp_years, max_exp_years),
            })
            .collect()
    }
}

pub fn normalize_experience(exp_years: u32, max_exp_years: u32) -> f64 {
    if max_exp_years == 0 {
        0.0
    } else {
        f64::from(exp_years) / f64::from(max_exp_years)
    }
}
