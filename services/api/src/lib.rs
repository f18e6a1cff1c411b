mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use crew_rating::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
