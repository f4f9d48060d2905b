mod cli;
mod infra;
mod report;
mod routes;
mod server;

use esg_advisor::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
