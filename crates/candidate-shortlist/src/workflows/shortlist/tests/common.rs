use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::shortlist::domain::{CandidateRecord, Education, WorkExperience};
use crate::workflows::shortlist::{ShortlistEngine, ShortlistSettings};

pub(super) fn settings() -> ShortlistSettings {
    ShortlistSettings::default()
}

pub(super) fn engine() -> ShortlistEngine {
    ShortlistEngine::new(settings()).expect("default settings are valid")
}

pub(super) fn engine_with(settings: ShortlistSettings) -> ShortlistEngine {
    ShortlistEngine::new(settings).expect("settings are valid")
}

pub(super) fn candidate(
    name: &str,
    skills: &[&str],
    location: &str,
    education: &str,
    history: &[(&str, &str)],
) -> CandidateRecord {
    CandidateRecord {
        name: name.to_string(),
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        location: location.to_string(),
        education: Education {
            highest_level: education.to_string(),
            ..Education::default()
        },
        work_availability: vec!["full-time".to_string()],
        work_experiences: history
            .iter()
            .map(|(start, end)| WorkExperience::between(start, end))
            .collect(),
        ..CandidateRecord::default()
    }
}

/// A mixed batch covering every explanation tier.
pub(super) fn batch() -> Vec<CandidateRecord> {
    let mut ada = candidate(
        "Ada",
        &["Python", "ML", "AWS", "SQL"],
        "NYC",
        "Master",
        &[("2012-01-01", "2016-01-01"), ("2016-02-01", "2022-01-01")],
    );
    ada.github = Some("https://github.com/ada".to_string());

    let mut grace = candidate(
        "Grace",
        &["sql", "tensorflow"],
        "Berlin",
        "PhD",
        &[("2018-05-01", "2022-05-01")],
    );
    grace.linkedin = Some("https://linkedin.com/in/grace".to_string());
    grace.work_availability = vec!["part-time".to_string()];

    let linus = candidate(
        "Linus",
        &["C", "Rust"],
        "SF",
        "Bachelor",
        &[("2015-01-01", "2020-01-01")],
    );

    let margaret = candidate(
        "Margaret",
        &["python"],
        "nyc",
        "master",
        &[("not-a-date", "2020-01-01")],
    );

    vec![ada, grace, linus, margaret]
}

pub(super) fn request_body(candidates: &[CandidateRecord], settings: Value) -> Value {
    json!({
        "candidates": candidates,
        "settings": settings,
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
