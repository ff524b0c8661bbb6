use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jalmitra_application::AppContext;
use jalmitra_core::clock::SystemClock;
use jalmitra_core::config::AppConfig;
use jalmitra_infrastructure::{
    ConfigService, FileKeyValueStore, MockAuthenticator, MockSensorDataSource,
};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "jalmitra")]
#[command(about = "Jalmitra - well water monitoring for farmers", long_about = None)]
struct Cli {
    /// Config file (defaults to $JALMITRA_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    json_logs: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with phone and password
    Login {
        /// Phone number in "+91 XXXXXXXXXX" form
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out (keeps the stored profile)
    Logout,
    /// Show session, profile and well summary
    Status,
    /// Show or change the farmer profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Fetch the latest reading, usage and alerts for the assigned well
    Refresh,
    /// List alerts
    Alerts {
        #[arg(long, value_enum, default_value_t = commands::data::FilterArg::All)]
        filter: commands::data::FilterArg,
    },
    /// Mark an alert resolved for this run
    Resolve { alert_id: String },
    /// Submit a manual reading for the assigned well
    Submit(commands::data::SubmitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).await?;
    logging::init(&config.log_level, cli.json_logs)?;

    let context = build_context(&config).await?;
    let output = commands::Output { json: cli.json };

    match cli.command {
        Commands::Login { phone, password } => {
            commands::session::login(&context, &output, phone, password).await?
        }
        Commands::Logout => commands::session::logout(&context, &output).await?,
        Commands::Status => commands::session::status(&context, &output)?,
        Commands::Profile { action } => commands::profile::run(&context, &output, action).await?,
        Commands::Refresh => commands::data::refresh(&context, &output).await?,
        Commands::Alerts { filter } => commands::data::alerts(&context, &output, filter)?,
        Commands::Resolve { alert_id } => commands::data::resolve(&context, &output, &alert_id)?,
        Commands::Submit(args) => commands::data::submit(&context, &output, args).await?,
    }

    Ok(())
}

async fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => ConfigService::load_from(path).await,
        None => ConfigService::load().await,
    };
    config.context("Failed to load configuration")
}

async fn build_context(config: &AppConfig) -> Result<AppContext> {
    let storage_path =
        ConfigService::storage_path(config).context("Failed to resolve storage path")?;
    tracing::debug!(path = %storage_path.display(), "using durable store");

    let store = Arc::new(FileKeyValueStore::new(storage_path));
    let source = Arc::new(MockSensorDataSource::new(
        config.data_source.clone(),
        Arc::new(SystemClock),
    ));
    let authenticator = Arc::new(MockAuthenticator::new());

    Ok(AppContext::bootstrap(config, store, source, authenticator).await)
}
