pub mod schedule;

use clap::{Parser, Subcommand};
use schedule::{schedule, ScheduleArgs};

use crate::{api::api, services::config::AppConfig};

#[derive(Parser, Debug)]
#[command(about = "Pension interest schedules from a wage CSV and calculator workbook")]
struct Args {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand, PartialEq)]
enum Command {
    /// Start the web calculator
    Serve {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print both schedules for the given uploads
    Schedule {
        #[arg(long)]
        csv: String,
        #[arg(long)]
        workbook: String,
        #[arg(long)]
        json: bool,
    },
}

pub async fn cli(config: AppConfig) -> anyhow::Result<()> {
    let args = Args::parse();

    match args.cmd {
        Command::Serve { port } => {
            let config = AppConfig {
                port: port.unwrap_or(config.port),
                ..config
            };
            println!("Starting web server...");
            api(config).await?;
        }
        Command::Schedule {
            csv,
            workbook,
            json,
        } => {
            schedule(
                ScheduleArgs {
                    csv_path: csv,
                    workbook_path: workbook,
                    json,
                },
                &config,
            )?;
        }
    }
    Ok(())
}
