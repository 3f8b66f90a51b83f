//! Encodes finalists for download or terminal display.

use std::io::Write;
use std::str::FromStr;

use serde::Serialize;

use crate::workflows::shortlist::{RankedCandidate, ShortlistOutcome};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write finalists: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode finalists as CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to encode finalists as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "unknown export format '{other}' (expected table, json or csv)"
            )),
        }
    }
}

pub fn write_outcome<W: Write>(
    writer: W,
    outcome: &ShortlistOutcome,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Table => render_table(writer, outcome),
        ExportFormat::Json => write_json(writer, &outcome.finalists),
        ExportFormat::Csv => write_csv(writer, &outcome.finalists),
    }
}

#[derive(Debug, Serialize)]
struct FinalistRow<'a> {
    rank: usize,
    name: &'a str,
    location: &'a str,
    education: &'a str,
    final_score: f64,
    exp_years: u32,
    key_skills: &'a str,
    github: Option<&'a str>,
    linkedin: Option<&'a str>,
    explanation: &'a str,
}

impl<'a> FinalistRow<'a> {
    fn new(rank: usize, finalist: &'a RankedCandidate) -> Self {
        Self {
            rank,
            name: &finalist.record.name,
            location: &finalist.record.location,
            education: &finalist.record.education.highest_level,
            final_score: finalist.final_score,
            exp_years: finalist.exp_years,
            key_skills: &finalist.key_skills,
            github: finalist.record.github.as_deref(),
            linkedin: finalist.record.linkedin.as_deref(),
            explanation: &finalist.explanation,
        }
    }
}

/// One CSV row per finalist, best first.
pub fn write_csv<W: Write>(writer: W, finalists: &[RankedCandidate]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for (idx, finalist) in finalists.iter().enumerate() {
        csv_writer.serialize(FinalistRow::new(idx + 1, finalist))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Full finalist records, including every field carried over from the submission.
pub fn write_json<W: Write>(
    mut writer: W,
    finalists: &[RankedCandidate],
) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, finalists)?;
    writeln!(writer)?;
    Ok(())
}

pub fn render_table<W: Write>(mut writer: W, outcome: &ShortlistOutcome) -> Result<(), ExportError> {
    writeln!(
        writer,
        "Candidates after filters: {} of {}",
        outcome.filtered_candidates, outcome.total_candidates
    )?;
    writeln!(
        writer,
        "Weights: skills {:.2} | experience {:.2}",
        outcome.weights.skill(),
        outcome.weights.experience()
    )?;
    writeln!(writer, "\nTop {} finalists", outcome.requested)?;

    if outcome.finalists.is_empty() {
        writeln!(writer, "- none")?;
        return Ok(());
    }

    for (idx, finalist) in outcome.finalists.iter().enumerate() {
        let mut profiles = Vec::new();
        if finalist.record.has_github() {
            profiles.push("GitHub");
        }
        if finalist.record.has_linkedin() {
            profiles.push("LinkedIn");
        }
        let profiles = if profiles.is_empty() {
            "none".to_string()
        } else {
            profiles.join(" ")
        };

        writeln!(
            writer,
            "\n{}. {} (score {:.2})",
            idx + 1,
            finalist.record.name,
            finalist.final_score
        )?;
        writeln!(writer, "   Key skills: {}", finalist.key_skills)?;
        writeln!(writer, "   Experience (years): {}", finalist.exp_years)?;
        writeln!(writer, "   Profiles: {}", profiles)?;
        writeln!(writer, "   Why shortlisted: {}", finalist.explanation)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::shortlist::{
        CandidateRecord, Education, RankingWeights, ShortlistOutcome,
    };
    use serde_json::{json, Value};

    fn finalist() -> RankedCandidate {
        let mut record = CandidateRecord {
            name: "Ada".to_string(),
            skills: vec!["Python".to_string(), "SQL".to_string()],
            location: "NYC".to_string(),
            education: Education {
                highest_level: "Master".to_string(),
                ..Education::default()
            },
            github: Some("https://github.com/ada".to_string()),
            ..CandidateRecord::default()
        };
        record
            .extra
            .insert("email".to_string(), json!("ada@example.com"));

        RankedCandidate {
            record,
            final_score: 0.76,
            skill_score: 0.4,
            exp_score: 1.0,
            exp_years: 6,
            explanation: "Moderate skills match; 6 years of experience".to_string(),
            key_skills: "Python, SQL".to_string(),
        }
    }

    fn outcome(finalists: Vec<RankedCandidate>) -> ShortlistOutcome {
        ShortlistOutcome {
            total_candidates: 3,
            filtered_candidates: 2,
            requested: 5,
            weights: RankingWeights::normalized(0.6, 0.4),
            finalists,
        }
    }

    #[test]
    fn parses_export_formats() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!(" json ".parse::<ExportFormat>(), Ok(ExportFormat::Json));
        assert_eq!("table".parse::<ExportFormat>(), Ok(ExportFormat::Table));
        assert!("xml".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn csv_has_one_row_per_finalist() {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &[finalist()]).expect("csv written");
        let text = String::from_utf8(buffer).expect("utf8");
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("rank,name,location,education,final_score,exp_years,key_skills,github,linkedin,explanation")
        );
        assert_eq!(
            lines.next(),
            Some("1,Ada,NYC,Master,0.76,6,\"Python, SQL\",https://github.com/ada,,Moderate skills match; 6 years of experience")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn json_keeps_submission_fields() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &[finalist()]).expect("json written");
        let payload: Value = serde_json::from_slice(&buffer).expect("valid json");

        assert_eq!(payload[0]["name"], "Ada");
        assert_eq!(payload[0]["email"], "ada@example.com");
        assert_eq!(payload[0]["education"]["highest_level"], "Master");
        assert_eq!(payload[0]["final_score"], 0.76);
        assert_eq!(payload[0]["key_skills"], "Python, SQL");
    }

    #[test]
    fn table_lists_finalists_with_reasons() {
        let mut buffer = Vec::new();
        render_table(&mut buffer, &outcome(vec![finalist()])).expect("table written");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.contains("Candidates after filters: 2 of 3"));
        assert!(text.contains("1. Ada (score 0.76)"));
        assert!(text.contains("Profiles: GitHub"));
        assert!(text.contains("Why shortlisted: Moderate skills match; 6 years of experience"));
    }

    #[test]
    fn table_reports_empty_shortlists() {
        let mut buffer = Vec::new();
        write_outcome(&mut buffer, &outcome(Vec::new()), ExportFormat::Table)
            .expect("table written");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains("- none"));
    }
}
