/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint:

- `auth`       : login, signup, logout, whoami
- `operations` : list the operation catalog
- `analyze`    : one-shot merge-and-run
- `search`     : one-shot record search
- `dashboard`  : interactive dashboard session

Handlers print user-facing output; errors propagate to `main`, which
reports them and exits non-zero.
*/

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionStore;

// Dashboard session command parser
pub mod dashboard_commands;

fn session_store(config: &Config) -> Result<SessionStore> {
    SessionStore::from_override(config.session.path.as_deref())
}

fn api_client(config: &Config) -> Result<ApiClient> {
    ApiClient::new(&config.server)
}

pub mod auth {
    //! Login view and account helpers.

    use super::*;
    use crate::login;
    use colored::Colorize;

    /// Ask for a password on the terminal without echoing it
    ///
    /// Set `TEXTFLOW_PASSWORD` or pass `--password` in scripts.
    fn prompt_password() -> Result<String> {
        Ok(rpassword::prompt_password("Password: ")?)
    }

    /// Log in, remember the email, and optionally open the dashboard
    pub async fn run_login(
        config: Config,
        email: String,
        password: Option<String>,
        open_dashboard: bool,
    ) -> Result<()> {
        let password = match password {
            Some(p) => p,
            None => prompt_password()?,
        };

        let client = api_client(&config)?;
        let store = session_store(&config)?;
        let session = login::login(&client, &store, &email, &password).await?;

        println!("{}", format!("Logged in as {}", session.email).green());

        if open_dashboard {
            super::dashboard::run_dashboard(config).await
        } else {
            println!("Run {} to open the dashboard.", "textflow dashboard".cyan());
            Ok(())
        }
    }

    /// Create an account
    pub async fn run_signup(
        config: Config,
        name: String,
        email: String,
        password: Option<String>,
    ) -> Result<()> {
        let password = match password {
            Some(p) => p,
            None => prompt_password()?,
        };

        let client = api_client(&config)?;
        let message = login::signup(&client, &name, &email, &password).await?;
        println!("{}", message.green());
        println!(
            "Run {} to sign in.",
            format!("textflow login --email {}", email.trim()).cyan()
        );
        Ok(())
    }

    /// Forget the remembered email
    pub fn run_logout(config: &Config) -> Result<()> {
        let store = session_store(config)?;
        if store.clear()? {
            println!("{}", "Logged out.".green());
        } else {
            println!("{}", "Not logged in.".yellow());
        }
        Ok(())
    }

    /// Print the remembered email, or Guest
    pub fn run_whoami(config: &Config) -> Result<()> {
        let store = session_store(config)?;
        match store.load()? {
            Some(session) => println!(
                "{} (since {})",
                session.email.bold(),
                session.logged_in_at.format("%Y-%m-%d %H:%M")
            ),
            None => println!("{}", crate::session::GUEST_EMAIL.dimmed()),
        }
        Ok(())
    }
}

pub mod operations {
    //! Operation catalog listing.

    use super::*;
    use crate::operations::Operation;
    use crate::render;
    use serde_json::json;

    pub fn list_operations(json: bool) -> Result<()> {
        if json {
            let catalog: Vec<_> = Operation::ALL
                .iter()
                .map(|op| json!({"id": op.id(), "label": op.label(), "icon": op.icon()}))
                .collect();
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        } else {
            render::print_operations(None);
        }
        Ok(())
    }
}

pub mod analyze {
    //! One-shot analysis: queue files, select operations, run, render.

    use super::*;
    use crate::api::AnalysisResponse;
    use crate::dashboard::Dashboard;
    use crate::error::TextflowError;
    use crate::operations::OperationSelection;
    use crate::render;
    use std::path::PathBuf;

    /// Arguments for [`run_analyze`]
    #[derive(Debug, Clone, Default)]
    pub struct AnalyzeArgs {
        pub files: Vec<PathBuf>,
        pub folder: Option<PathBuf>,
        pub operations: Vec<String>,
        pub json: bool,
        pub export: Option<PathBuf>,
    }

    pub async fn run_analyze(config: &Config, args: AnalyzeArgs) -> Result<()> {
        let selection = OperationSelection::from_names(&args.operations)?;
        let client = api_client(config)?;
        let store = session_store(config)?;

        let mut dashboard = Dashboard::new(store.current_email());
        for op in selection.iter() {
            dashboard.toggle_operation(*op);
        }

        let loaded = match &args.folder {
            Some(dir) => dashboard.select_folder(dir).await?,
            None => dashboard.select_files(args.files.clone()).await?,
        };
        if !loaded {
            return Err(TextflowError::NothingToRun("No CSV files selected.".into()).into());
        }

        if !args.json {
            render::print_file_queue(dashboard.files().len(), dashboard.total_rows());
        }

        dashboard.run_all(&client).await?;

        if args.json {
            let response = AnalysisResponse {
                results: dashboard.results().to_vec(),
                stats: dashboard.stats().cloned(),
                error: None,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        } else {
            if let Some(stats) = dashboard.stats() {
                render::print_stats(stats);
            }
            render::print_results(dashboard.results());
        }

        if let Some(path) = &args.export {
            dashboard.export(&client, path).await?;
            if !args.json {
                println!("Report saved to {}", path.display());
            }
        }

        Ok(())
    }
}

pub mod search {
    //! One-shot record search.

    use super::*;
    use crate::dashboard::Dashboard;
    use crate::render;

    pub async fn run_search(config: &Config, query: &str, json: bool) -> Result<()> {
        let client = api_client(config)?;
        let mut dashboard = Dashboard::new(crate::session::GUEST_EMAIL);
        dashboard.search(&client, query).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(dashboard.search_hits())?);
        } else {
            render::print_search_hits(dashboard.search_hits(), config.dashboard.preview_chars);
        }
        Ok(())
    }
}

pub mod dashboard {
    //! Interactive dashboard handler.
    //!
    //! Runs a readline loop over a [`Dashboard`]. Errors from a command are
    //! printed and the loop continues.

    use super::dashboard_commands::{parse_dashboard_command, print_help, DashboardCommand};
    use super::*;
    use crate::api::AnalysisBackend;
    use crate::dashboard::Dashboard;
    use crate::render;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    pub async fn run_dashboard(config: Config) -> Result<()> {
        tracing::info!("Starting interactive dashboard");

        let client = api_client(&config)?;
        let store = session_store(&config)?;
        let mut dashboard = Dashboard::new(store.current_email());

        let mut rl = DefaultEditor::new()?;
        print_welcome_banner(dashboard.email(), client.base_url());

        loop {
            match rl.readline("textflow> ") {
                Ok(line) => {
                    let _ = rl.add_history_entry(line.as_str());
                    let command = match parse_dashboard_command(&line) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}", e.to_string().red());
                            continue;
                        }
                    };
                    if command == DashboardCommand::Exit {
                        break;
                    }
                    if let Err(e) = execute(&mut dashboard, &client, &config, command).await {
                        eprintln!("{}", format!("Error: {:#}", e).red());
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn execute(
        dashboard: &mut Dashboard,
        backend: &dyn AnalysisBackend,
        config: &Config,
        command: DashboardCommand,
    ) -> Result<()> {
        match command {
            DashboardCommand::Files(paths) => {
                if dashboard.select_files(paths).await? {
                    render::print_file_queue(dashboard.files().len(), dashboard.total_rows());
                } else {
                    println!("{}", "No CSV files in selection.".yellow());
                }
            }
            DashboardCommand::Folder(dir) => {
                if dashboard.select_folder(&dir).await? {
                    render::print_file_queue(dashboard.files().len(), dashboard.total_rows());
                } else {
                    println!("{}", format!("No CSV files under {}", dir.display()).yellow());
                }
            }
            DashboardCommand::Clear => {
                dashboard.clear_files();
                println!("Queue cleared.");
            }
            DashboardCommand::ToggleOperation(op) => {
                let state = if dashboard.toggle_operation(op) {
                    "selected".green()
                } else {
                    "deselected".yellow()
                };
                println!("{} {} {}", op.icon(), op.label(), state);
            }
            DashboardCommand::ListOperations => {
                render::print_operations(Some(dashboard.selection()));
            }
            DashboardCommand::Run => {
                if !dashboard.can_run() {
                    println!("{}", "Queue some CSV files first (/files or /folder).".yellow());
                    return Ok(());
                }
                println!("{}", "Merging & Processing Pipeline...".cyan());
                dashboard.run_all(backend).await?;
                if let Some(stats) = dashboard.stats() {
                    render::print_stats(stats);
                }
                render::print_results(dashboard.results());
                println!("{}", "Analysis complete!".green());
            }
            DashboardCommand::Search(query) => {
                dashboard.search(backend, &query).await?;
                render::print_search_hits(
                    dashboard.search_hits(),
                    config.dashboard.preview_chars,
                );
            }
            DashboardCommand::ShowStats => match dashboard.stats() {
                Some(stats) => {
                    render::print_stats(stats);
                    render::print_results(dashboard.results());
                }
                None if !dashboard.results().is_empty() => {
                    render::print_results(dashboard.results());
                }
                None => println!("{}", "No analysis has been run yet.".yellow()),
            },
            DashboardCommand::Export(path) => {
                dashboard.export(backend, &path).await?;
                println!("Report saved to {}", path.display());
            }
            DashboardCommand::Status => print_status(dashboard),
            DashboardCommand::Help => print_help(),
            DashboardCommand::Exit | DashboardCommand::None => {}
        }
        Ok(())
    }

    fn print_welcome_banner(email: &str, server: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              TextFlow Dashboard - Welcome!                   ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("User:   {}", email.bold());
        println!("Server: {}\n", server.cyan());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }

    fn print_status(dashboard: &Dashboard) {
        println!("User: {}", dashboard.email().bold());
        render::print_file_queue(dashboard.files().len(), dashboard.total_rows());
        for path in dashboard.files().paths() {
            println!("  {}", path.display());
        }
        let ops = dashboard.selection().ids();
        if ops.is_empty() {
            println!("Operations: {}", "none selected".dimmed());
        } else {
            println!("Operations: {}", ops.join(", ").cyan());
        }
        let run_state = if dashboard.can_run() {
            "ready".green()
        } else {
            "disabled (no files)".yellow()
        };
        println!("Run: {}", run_state);
    }

}
