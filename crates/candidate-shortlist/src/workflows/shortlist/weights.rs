use serde::Serialize;

use super::domain::{ScoredCandidate, WeightedCandidate};

/// Skill and experience weights normalized to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankingWeights {
    skill: f64,
    experience: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self::even()
    }
}

impl RankingWeights {
    pub fn even() -> Self {
        Self {
            skill: 0.5,
            experience: 0.5,
        }
    }

    /// Normalizes raw slider weights; two zero weights fall back to an even split.
    pub fn normalized(skill_weight: f64, experience_weight: f64) -> Self {
        let total = skill_weight + experience_weight;
        if total <= 0.0 {
            return Self::even();
        }

        let skill = skill_weight / total;
        Self {
            skill,
            experience: 1.0 - skill,
        }
    }

    pub fn skill(&self) -> f64 {
        self.skill
    }

    pub fn experience(&self) -> f64 {
        self.experience
    }

    pub fn final_score(&self, skill_score: f64, exp_score: f64) -> f64 {
        self.skill * skill_score + self.experience * exp_score
    }

    pub fn rank(&self, candidates: Vec<ScoredCandidate>) -> Vec<WeightedCandidate> {
        candidates
            .into_iter()
            .map(|scored| WeightedCandidate {
                final_score: self.final_score(scored.skill_score, scored.exp_score),
                scored,
            })
            .collect()
    }
}
