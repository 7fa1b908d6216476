mod render;

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use newsdash_core::CompanyId;
use newsdash_dashboard::api::DEFAULT_TIMEOUT_SECS;
use newsdash_dashboard::{ControllerError, HttpDashboardApi, ReportController, ViewState};

#[derive(Debug, Parser)]
#[command(name = "newsdash")]
#[command(about = "Terminal client for the newsdash sentiment dashboard")]
struct Cli {
    /// Base URL of the newsdash server
    #[arg(long, env = "NEWSDASH_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Session token sent as a bearer credential
    #[arg(long, env = "NEWSDASH_SESSION_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Company the session belongs to
    #[arg(long, env = "NEWSDASH_COMPANY_ID")]
    company: String,

    #[arg(long, env = "NEWSDASH_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Retries for reads on transient failures
    #[arg(long, env = "NEWSDASH_MAX_RETRIES", default_value_t = 2)]
    max_retries: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the live snapshot
    Live,
    /// Show a captured report by its timestamp
    Report { timestamp: String },
    /// Run a new analysis and show the refreshed snapshot
    Analyze {
        /// today, week, month or year
        #[arg(long, default_value = "today")]
        period: String,
    },
    /// List past reports
    Reports,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let api = HttpDashboardApi::new(&cli.api_url, cli.token.clone(), cli.timeout_secs)
        .context("failed to build dashboard API client")?
        .with_retry(cli.max_retries, 500);
    let controller = ReportController::new(Arc::new(api), CompanyId::new(cli.company.clone()));
    tracing::debug!(api_url = %cli.api_url, company = %cli.company, "dashboard client ready");

    let view = match &cli.command {
        Commands::Live => controller.load_live().await,
        Commands::Report { timestamp } => controller.load_historical(timestamp).await,
        Commands::Analyze { period } => {
            let period = controller.select_period(period)?.period;
            println!("Analyzing {} ({})...", period.label(), period.description());
            controller.trigger_analysis(period).await
        }
        Commands::Reports => controller.load_live().await,
    };
    let view = into_result(view)?;

    match cli.command {
        Commands::Reports => print!("{}", render::render_past_reports(&view)),
        _ => print!("{}", render::render_view(&view)),
    }
    Ok(())
}

fn into_result(result: Result<ViewState, ControllerError>) -> anyhow::Result<ViewState> {
    match result {
        Ok(view) => Ok(view),
        Err(ControllerError::LoginRequired) => {
            anyhow::bail!("session rejected; log in again and set NEWSDASH_SESSION_TOKEN")
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests;
