mod cli;
mod infra;
mod routes;
mod scorecard;
mod server;

use sales_kpi::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
