//! A filter consumer over a local asset table

use std::future::Future;

use log::{debug, warn};
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::filter::{DispatchError, FilterConsumer, FilterQuery};

use super::{Asset, EvalError, evaluate};

/// Assets held in memory, narrowed by every query applied to it.
pub struct InMemoryTable {
    catalog: Catalog,
    assets: Vec<Asset>,
    visible: Mutex<Vec<i64>>,
}

impl InMemoryTable {
    /// Creates a table with every asset visible.
    pub fn new(catalog: Catalog, assets: Vec<Asset>) -> Self {
        let visible = assets.iter().map(|asset| asset.id).collect();
        Self {
            catalog,
            assets,
            visible: Mutex::new(visible),
        }
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Assets matching a query, in table order.
    pub fn filter(&self, query: &FilterQuery) -> Result<Vec<&Asset>, EvalError> {
        let mut matched = Vec::new();
        for asset in &self.assets {
            if evaluate(&self.catalog, asset, query)? {
                matched.push(asset);
            }
        }
        debug!("{} of {} assets match", matched.len(), self.assets.len());
        Ok(matched)
    }

    /// Ids of the assets matching the last applied query.
    pub async fn visible_ids(&self) -> Vec<i64> {
        self.visible.lock().await.clone()
    }
}

impl FilterConsumer for InMemoryTable {
    fn apply(&self, query: &FilterQuery) -> impl Future<Output = Result<(), DispatchError>> + Send {
        let matched = self
            .filter(query)
            .map(|assets| assets.iter().map(|asset| asset.id).collect::<Vec<_>>());

        async move {
            match matched {
                Ok(ids) => {
                    *self.visible.lock().await = ids;
                    Ok(())
                }
                Err(e) => {
                    warn!("Cannot apply filters to table: {}", e);
                    Err(e.into())
                }
            }
        }
    }
}
