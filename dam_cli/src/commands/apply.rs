use std::path::Path;
use std::sync::Arc;

use dam_core::eval::{Asset, InMemoryTable};
use dam_core::session::FilterSession;
use dam_core::{BuilderConfig, Catalog, FilterBuilder, InitialPredicate, Settlement};

use crate::errors::CliError;
use crate::files::{load_assets, load_catalog, load_query};
use crate::ui::{self, OutputFormat};

/// Assets left visible after a query was applied.
#[derive(Debug)]
pub struct Matches {
    pub catalog: Catalog,
    /// Size of the table before filtering
    pub total: usize,
    pub assets: Vec<Asset>,
}

impl Matches {
    pub fn ids(&self) -> Vec<i64> {
        self.assets.iter().map(|asset| asset.id).collect()
    }
}

/// Applies a stored query to a local asset table and prints the matches.
pub fn apply_query(
    catalog_path: &Path,
    assets_path: &Path,
    query_path: &Path,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Applying filter query");
    let matches = matching_assets(catalog_path, assets_path, query_path)?;

    ui::success(&format!(
        "{} of {} assets match",
        matches.assets.len(),
        matches.total
    ));

    match output_format {
        OutputFormat::Pretty => {
            let assets: Vec<&Asset> = matches.assets.iter().collect();
            ui::pretty_output_assets(&assets, &matches.catalog);
        }
        OutputFormat::Json => ui::json_output(&matches.assets),
    }
    Ok(())
}

/// Seeds an automatic builder with the stored query and lets its session
/// narrow the table.
pub fn matching_assets(
    catalog_path: &Path,
    assets_path: &Path,
    query_path: &Path,
) -> Result<Matches, CliError> {
    let (catalog, operators) = load_catalog(catalog_path)?;
    let assets = load_assets(assets_path)?;
    let stored = load_query(query_path)?;

    let initial: Vec<InitialPredicate> = stored.filters.into_iter().map(InitialPredicate::from).collect();
    let builder = FilterBuilder::new(catalog.clone(), operators, BuilderConfig::default()).with_initial(initial);
    let table = Arc::new(InMemoryTable::new(catalog.clone(), assets));

    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        ui::error_with_details("Failed to create async runtime", &e.to_string());
        CliError::RuntimeError
    })?;

    let visible = rt.block_on(async {
        let mut session = FilterSession::new(builder, Arc::clone(&table));
        let active = session.builder().active_filter_count();
        if active == 0 {
            ui::info("Query has no filters, every asset matches");
            return Ok(table.visible_ids().await);
        }
        ui::debug(&format!("Applying {} filters", active));

        match session.next_settlement().await {
            Some(Settlement::Applied) => Ok(table.visible_ids().await),
            Some(Settlement::Failed(message)) => {
                ui::error_with_details("Query was rejected", &message);
                Err(CliError::QueryError)
            }
            Some(Settlement::Superseded) | None => {
                ui::error("Query was not applied");
                Err(CliError::QueryError)
            }
        }
    })?;

    let total = table.assets().len();
    let assets = table
        .assets()
        .iter()
        .filter(|asset| visible.contains(&asset.id))
        .cloned()
        .collect();
    Ok(Matches {
        catalog,
        total,
        assets,
    })
}
