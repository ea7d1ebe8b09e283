use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::ui::OutputFormat;

/// Defines the top-level interface for the Dam CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "dam")]
#[command(version, about = "Dam CLI: compose and apply asset filters in the terminal.")]
pub struct DamCli {
    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, env = "DAM_FORMAT", default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: DamCliCommand,
}

/// Defines the available subcommands of the Dam CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum DamCliCommand {
    /// List the filterable fields of a catalog.
    Fields {
        /// Catalog file ({"fields": [...], "operators": [...]})
        catalog: PathBuf,
    },
    /// Compose a filter query. Without --row, rows are prompted for interactively.
    Query {
        /// Catalog file
        catalog: PathBuf,
        /// Filter row (can be repeated). Format: --row <AND|OR> <field id or name> <operator> <value>
        #[arg(long = "row", num_args = 4, value_names = ["CONNECTIVE", "FIELD", "OPERATOR", "VALUE"])]
        rows: Vec<String>,
        /// Stored predicates to start from
        #[arg(long)]
        initial: Option<PathBuf>,
    },
    /// Apply a query to a local asset table and print the matches.
    Apply {
        /// Catalog file
        catalog: PathBuf,
        /// Asset file ([{"id": 1, "values": {"<field id>": "<value>"}}])
        assets: PathBuf,
        /// Query file ({"filters": [...]})
        #[arg(long)]
        query: PathBuf,
    },
    /// Show the form for a catalog, or validate form values against it.
    Form {
        /// Catalog file
        catalog: PathBuf,
        /// Form values ({"field_<id>": "<value>"})
        #[arg(long)]
        values: Option<PathBuf>,
    },
    /// Print a folder tree.
    Folders {
        /// Folder file as returned by the server
        folders: PathBuf,
    },
}
