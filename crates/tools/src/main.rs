use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tools::{Step, list_countries, normalize_ids, run_selection, snippet, validate};
use tracing_subscriber::EnvFilter;
use viewer_web::{App, AppConfig};

#[derive(Parser)]
#[command(name = "worldmap")]
#[command(about = "Inspect the country tables and drive the selection store")]
struct Cli {
    /// Country table JSON (default: bundled table)
    #[arg(long, global = true, env = "WORLDMAP_COUNTRIES", value_name = "PATH")]
    countries: Option<PathBuf>,

    /// Feature id mapping JSON (default: bundled mapping)
    #[arg(long, global = true, env = "WORLDMAP_FEATURE_IDS", value_name = "PATH")]
    feature_ids: Option<PathBuf>,

    /// Start with unselected countries hidden
    #[arg(long, global = true)]
    hide_unselected: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the country table in order
    Countries {
        #[arg(long)]
        json: bool,
    },

    /// Resolve raw feature ids to country codes
    Normalize {
        #[arg(value_name = "ID", required = true)]
        ids: Vec<String>,
    },

    /// Select a country, step through the table, print each resulting state
    Select {
        /// Code (any case) or raw feature id
        country: Option<String>,

        #[arg(long = "step", value_enum)]
        steps: Vec<Step>,
    },

    /// Print the embed snippet for a widget configuration
    Snippet {
        country: Option<String>,

        /// Bind the widget to the shared store instead of private state
        #[arg(long)]
        bound: bool,
    },

    /// Check that every country has geometry and report inert ids
    Validate,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig {
        countries_path: cli.countries,
        feature_ids_path: cli.feature_ids,
        default_show_unselected: !cli.hide_unselected,
    };
    let app = App::new(&config).context("load country tables")?;

    match cli.command {
        Commands::Countries { json } => {
            print!("{}", list_countries(app.table(), json)?);
        }
        Commands::Normalize { ids } => {
            print!("{}", normalize_ids(app.normalizer(), &ids)?);
        }
        Commands::Select { country, steps } => {
            for state in run_selection(&app, country.as_deref(), &steps)? {
                println!("{}", serde_json::to_string(&state)?);
            }
        }
        Commands::Snippet { country, bound } => {
            let snippet = snippet(&app, country.as_deref(), !cli.hide_unselected, !bound)?;
            println!("{snippet}");
        }
        Commands::Validate => {
            let report = validate(app.table(), app.normalizer().feature_ids());
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.is_clean() {
                anyhow::bail!(
                    "{} countries have no feature id",
                    report.without_geometry.len()
                );
            }
        }
    }
    Ok(())
}
