use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use dam_cli::cli::{DamCli, DamCliCommand};
use dam_cli::commands;

fn main() -> ExitCode {
    let cli = DamCli::parse();
    initialize_logging(cli.verbose);

    let result = match cli.command {
        DamCliCommand::Fields { catalog } => commands::list_fields(&catalog, cli.format),
        DamCliCommand::Query {
            catalog,
            rows,
            initial,
        } => commands::compose_query(&catalog, rows, initial.as_deref(), cli.format),
        DamCliCommand::Apply {
            catalog,
            assets,
            query,
        } => commands::apply_query(&catalog, &assets, &query, cli.format),
        DamCliCommand::Form {
            catalog,
            values: Some(values),
        } => commands::validate_form(&catalog, &values, cli.format),
        DamCliCommand::Form {
            catalog,
            values: None,
        } => commands::show_form(&catalog, cli.format),
        DamCliCommand::Folders { folders } => commands::list_folders(&folders, cli.format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn initialize_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}
