//! Rollbook CLI - command-line front end for the student roster

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use rollbook::config::{self, Backend, Overrides, Settings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "rollbook")]
#[command(version)]
#[command(about = "Student roster manager - add, update, search and summarize student records")]
#[command(long_about = r#"
Rollbook keeps a roster of students keyed by roll number:
  • Add, find, update and remove students
  • Case-insensitive search over name, roll and branch
  • Roster statistics (count, average, top marks, branches)
  • Local JSON/SQLite storage, or another rollbook server over HTTP

Example usage:
  rollbook add --roll A1 --name "Meera Rao" --age 20 --branch CS --marks 80
  rollbook search cs
  rollbook serve --port 5000
  rollbook --backend remote --api-url http://127.0.0.1:5000 stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend
    #[arg(short, long, global = true, value_enum)]
    backend: Option<Backend>,

    /// Data file for the json and sqlite backends
    #[arg(short, long, global = true)]
    path: Option<PathBuf>,

    /// Base URL of the roster API (remote backend)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a student
    Add {
        /// Roll number (must be unique)
        #[arg(short, long)]
        roll: String,

        #[arg(short, long, default_value = "")]
        name: String,

        #[arg(short, long, default_value = "")]
        age: String,

        #[arg(long, default_value = "")]
        branch: String,

        /// Marks out of 100
        #[arg(short, long, default_value = "")]
        marks: String,
    },

    /// List every student
    List,

    /// Look up one student by roll number
    Find {
        roll: String,
    },

    /// Change a student's details (roll numbers never change)
    Update {
        roll: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        age: Option<String>,

        #[arg(long)]
        branch: Option<String>,

        #[arg(short, long)]
        marks: Option<String>,
    },

    /// Remove a student by roll number
    #[command(alias = "delete")]
    Remove {
        roll: String,
    },

    /// Search name, roll and branch (case-insensitive)
    Search {
        query: String,
    },

    /// Show roster statistics
    Stats,

    /// Serve the roster as a JSON API
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Write a config file with the current settings
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let output_mode = if cli.json {
        commands::OutputMode::Json
    } else {
        commands::OutputMode::Human
    };

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let file_config = config::load_config(Some(config_path.as_path()))?;
    let port = match &cli.command {
        Commands::Serve { port } => *port,
        _ => None,
    };
    let settings = Settings::resolve(
        file_config,
        Overrides {
            backend: cli.backend,
            path: cli.path.clone(),
            api_url: cli.api_url.clone(),
            port,
        },
    );
    tracing::debug!("Using {} backend ({:?})", settings.backend, settings);

    let open_roster = || rollbook::roster::open_roster(&settings);

    match cli.command {
        Commands::Init { force } => commands::run_init(output_mode, &config_path, &settings, force),
        Commands::Serve { .. } => commands::run_serve(&settings).await,
        Commands::Add { roll, name, age, branch, marks } => {
            let student = rollbook::StudentRecord::new(
                roll.trim(),
                name.trim(),
                age.trim(),
                branch.trim(),
                marks.trim(),
            );
            commands::run_add(output_mode, open_roster()?.as_ref(), student).await
        }
        Commands::List => commands::run_list(output_mode, open_roster()?.as_ref()).await,
        Commands::Find { roll } => {
            commands::run_find(output_mode, open_roster()?.as_ref(), roll.trim()).await
        }
        Commands::Update { roll, name, age, branch, marks } => {
            let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
            let patch = rollbook::StudentPatch {
                name: trim(name),
                age: trim(age),
                branch: trim(branch),
                marks: trim(marks),
            };
            commands::run_update(output_mode, open_roster()?.as_ref(), roll.trim(), patch).await
        }
        Commands::Remove { roll } => {
            commands::run_remove(output_mode, open_roster()?.as_ref(), roll.trim()).await
        }
        Commands::Search { query } => {
            commands::run_search(output_mode, open_roster()?.as_ref(), &query).await
        }
        Commands::Stats => commands::run_stats(output_mode, open_roster()?.as_ref()).await,
    }
}
