//! Candidate scoring, filtering, weighting and diversity-aware top-N selection.

pub mod domain;
pub mod experience;
pub mod explanation;
pub mod filter;
pub mod router;
pub mod scoring;
pub mod selector;
mod settings;
pub mod weights;

#[cfg(test)]
mod tests;

pub use domain::{
    CandidateRecord, DateField, Education, RankedCandidate, ScoredCandidate, WeightedCandidate,
    WorkExperience,
};
pub use experience::ExperienceEstimator;
pub use filter::FilterCriteria;
pub use router::{shortlist_router, ShortlistRequest};
pub use scoring::ScoreCalculator;
pub use selector::{BoundedMinHeap, DiversitySelector, DiversityState};
pub use settings::{SettingsError, SettingsOverrides, ShortlistSettings};
pub use weights::RankingWeights;

use serde::Serialize;
use tracing::info;

/// Runs the full ranking pipeline for a batch of candidates.
///
/// The engine is immutable once built; each call to [`ShortlistEngine::rank`] owns
/// its batch and selection state.
#[derive(Debug, Clone)]
pub struct ShortlistEngine {
    settings: ShortlistSettings,
    calculator: ScoreCalculator,
    criteria: FilterCriteria,
    weights: RankingWeights,
    selector: DiversitySelector,
}

impl ShortlistEngine {
    pub fn new(settings: ShortlistSettings) -> Result<Self, SettingsError> {
        settings.validate()?;

        let estimator = ExperienceEstimator::new(settings.reference_year);
        let calculator = ScoreCalculator::new(settings.skill_keywords.clone(), estimator);
        let criteria = settings.criteria();
        let weights = settings.weights();
        let selector = DiversitySelector::new(settings.top_n);

        Ok(Self {
            settings,
            calculator,
            criteria,
            weights,
            selector,
        })
    }

    pub fn settings(&self) -> &ShortlistSettings {
        &self.settings
    }

    pub fn weights(&self) -> RankingWeights {
        self.weights
    }

    /// Builds a sibling engine with caller overrides applied.
    pub fn with_overrides(&self, overrides: SettingsOverrides) -> Result<Self, SettingsError> {
        Self::new(self.settings.merged(overrides))
    }

    pub fn rank(&self, records: Vec<CandidateRecord>) -> ShortlistOutcome {
        let total_candidates = records.len();

        let scored = self.calculator.score_batch(records);
        let filtered = self.criteria.apply(scored);
        let filtered_candidates = filtered.len();
        let weighted = self.weights.rank(filtered);
        let finalists = self.selector.select(weighted);

        info!(
            total_candidates,
            filtered_candidates,
            requested = self.selector.top_n(),
            shortlisted = finalists.len(),
            "ranked candidate batch"
        );

        ShortlistOutcome {
            total_candidates,
            filtered_candidates,
            requested: self.selector.top_n(),
            weights: self.weights,
            finalists,
        }
    }
}

/// Finalists plus the batch counters surfaced next to them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistOutcome {
    pub total_candidates: usize,
    pub filtered_candidates: usize,
    pub requested: usize,
    pub weights: RankingWeights,
    pub finalists: Vec<RankedCandidate>,
}
