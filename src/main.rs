mod api;
mod cli;
mod services;

use cli::cli;
use services::{
    config::AppConfig,
    shared::{env::check_for_env_variables, logger::init_logger},
};

async fn run_pension_calculator() -> anyhow::Result<()> {
    init_logger();
    check_for_env_variables();
    let config = AppConfig::from_env()?;
    cli(config).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    run_pension_calculator().await?;
    Ok(())
}
