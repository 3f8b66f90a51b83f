mod cli;
mod infra;
mod rank;
mod routes;
mod server;

use candidate_shortlist::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
