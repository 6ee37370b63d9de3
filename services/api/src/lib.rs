mod cli;
mod evaluate;
mod infra;
mod routes;
mod server;

use call_review::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
