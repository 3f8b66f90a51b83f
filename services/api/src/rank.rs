use candidate_shortlist::config::{split_list, AppConfig};
use candidate_shortlist::error::AppError;
use candidate_shortlist::telemetry;
use candidate_shortlist::workflows::export::{write_outcome, ExportFormat};
use candidate_shortlist::workflows::intake::CandidateBatch;
use candidate_shortlist::workflows::shortlist::{
    SettingsOverrides, ShortlistEngine, ShortlistSettings,
};
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON export of candidate submissions
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Number of finalists to keep
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Relative importance of the keyword match score
    #[arg(long)]
    pub(crate) skill_weight: Option<f64>,
    /// Relative importance of normalized experience
    #[arg(long)]
    pub(crate) experience_weight: Option<f64>,
    /// Only keep candidates listing at least one of these skills
    #[arg(long, value_delimiter = ',')]
    pub(crate) skills: Vec<String>,
    /// Comma separated locations, e.g. "nyc, sf"
    #[arg(long)]
    pub(crate) locations: Option<String>,
    /// Only keep candidates offering one of these work types
    #[arg(long, value_delimiter = ',')]
    pub(crate) work_types: Vec<String>,
    /// Replace the keywords used for skill scoring
    #[arg(long)]
    pub(crate) keywords: Option<String>,
    /// Output encoding: table, json or csv
    #[arg(long, default_value = "table")]
    pub(crate) format: ExportFormat,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

impl RankArgs {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            skill_weight: self.skill_weight,
            experience_weight: self.experience_weight,
            top_n: self.top_n,
            skill_keywords: self.keywords.as_deref().map(split_list),
            reference_year: None,
            filter_skills: non_empty(&self.skills),
            filter_locations: self.locations.clone(),
            filter_work_types: non_empty(&self.work_types),
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    let values: Vec<String> = values
        .iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();
    (!values.is_empty()).then_some(values)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let settings = config.shortlist.merged(args.overrides());
    let written = rank_to(&args, settings)?;
    if let Some(path) = &args.output {
        info!(path = %path.display(), finalists = written, "shortlist written");
    }
    Ok(())
}

fn rank_to(args: &RankArgs, settings: ShortlistSettings) -> Result<usize, AppError> {
    let engine = ShortlistEngine::new(settings)?;
    let records = CandidateBatch::from_json_path(&args.input)?;
    let outcome = engine.rank(records);

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_outcome(&mut writer, &outcome, args.format)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            write_outcome(stdout.lock(), &outcome, args.format)?;
        }
    }

    Ok(outcome.finalists.len())
}
