//! TextFlow - text analytics client
//!
#![doc = "Main entry point for the TextFlow command-line client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use textflow::cli::{Cli, Commands};
use textflow::commands;
use textflow::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    match cli.command {
        Commands::Login {
            email,
            password,
            dashboard,
        } => {
            tracing::info!("Starting login");
            commands::auth::run_login(config, email, password, dashboard).await
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            tracing::info!("Starting signup");
            commands::auth::run_signup(config, name, email, password).await
        }
        Commands::Logout => commands::auth::run_logout(&config),
        Commands::Whoami => commands::auth::run_whoami(&config),
        Commands::Operations { json } => commands::operations::list_operations(json),
        Commands::Analyze {
            files,
            folder,
            operations,
            json,
            export,
        } => {
            tracing::info!("Starting analysis");
            let args = commands::analyze::AnalyzeArgs {
                files,
                folder,
                operations,
                json,
                export,
            };
            commands::analyze::run_analyze(&config, args).await
        }
        Commands::Search { query, json } => {
            tracing::info!("Starting search");
            commands::search::run_search(&config, &query, json).await
        }
        Commands::Dashboard => commands::dashboard::run_dashboard(config).await,
    }
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "textflow=debug"
    } else {
        "textflow=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
