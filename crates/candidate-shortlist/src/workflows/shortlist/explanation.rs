use super::domain::{CandidateRecord, RankedCandidate, WeightedCandidate};

pub fn skill_tier(skill_score: f64) -> &'static str {
    if skill_score >= 0.5 {
        "Strong skills match"
    } else if skill_score > 0.2 {
        "Moderate skills match"
    } else {
        "Low skills match"
    }
}

pub fn experience_note(exp_years: u32) -> Option<String> {
    match exp_years {
        0 => None,
        1..=4 => Some(format!("{exp_years} years experience")),
        _ => Some(format!("{exp_years} years of experience")),
    }
}

/// Short justification shown next to a finalist.
pub fn explain(record: &CandidateRecord, skill_score: f64, exp_years: u32) -> String {
    let mut reasons = vec![skill_tier(skill_score).to_string()];

    if let Some(note) = experience_note(exp_years) {
        reasons.push(note);
    }
    if record.has_github() {
        reasons.push("GitHub portfolio available".to_string());
    }
    if record.has_linkedin() {
        reasons.push("LinkedIn profile available".to_string());
    }

    reasons.join("; ")
}

/// Skills as submitted, in their original casing and order.
pub fn key_skills(record: &CandidateRecord) -> String {
    record.skills.join(", ")
}

pub(crate) fn annotate(candidate: WeightedCandidate) -> RankedCandidate {
    let WeightedCandidate {
        scored,
        final_score,
    } = candidate;

    let explanation = explain(&scored.record, scored.skill_score, scored.exp_years);
    let key_skills = key_skills(&scored.record);

    RankedCandidate {
        record: scored.record.without_computed_fields(),
        final_score,
        skill_score: scored.skill_score,
        exp_score: scored.exp_score,
        exp_years: scored.exp_years,
        explanation,
        key_skills,
    }
}
