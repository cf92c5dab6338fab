use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dv_core::SourceKind;
use tracing::info;

use crate::identify::{self, IdentifyArgs};
use crate::import::{self, ImportArgs};

#[derive(Parser, Debug)]
#[command(name = "datavis", about = "Import tabular files and pick visualizations for query results")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a file through the import wizard and print the inferred tables
    Import {
        /// CSV, JSON or SQLite file to import
        file: PathBuf,

        /// Dataset display name
        name: String,

        /// Source kind (csv, json or sqlite). Defaults to the file extension.
        #[arg(long)]
        kind: Option<SourceKind>,

        /// The CSV file has no header line
        #[arg(long)]
        no_header: bool,

        /// Comma-separated column names for a headerless CSV file
        #[arg(long)]
        columns: Option<String>,

        /// Path to a JSON import configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the visualization chosen for a saved query result
    Identify {
        /// JSON file holding `{ "columns": [...], "rows": [...] }`
        file: PathBuf,

        /// Column to use for the category axis
        #[arg(long)]
        category: Option<String>,

        /// Column to use for the value axis
        #[arg(long)]
        value: Option<String>,

        /// Column to use for the line chart x axis
        #[arg(long)]
        line_x: Option<String>,
    },
}

pub async fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Import {
            file,
            name,
            kind,
            no_header,
            columns,
            config,
        } => {
            info!("Importing {}", file.display());
            import::run(ImportArgs {
                file,
                name,
                kind,
                header_present: !no_header,
                columns,
                config,
            })
            .await
        }
        Commands::Identify {
            file,
            category,
            value,
            line_x,
        } => {
            identify::run(IdentifyArgs {
                file,
                category,
                value,
                line_x,
            })
            .await
        }
    }
}
