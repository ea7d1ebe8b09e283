//! The filter query builder: owns the row list and hands out dispatches
//!
//! The builder is a synchronous state machine. Mutations that should reach
//! the consumer return a [`Dispatch`] ticket; the caller runs the consumer
//! and reports the outcome through [`FilterBuilder::complete`].

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

use crate::catalog::{Catalog, FieldId};

use super::consumer::DispatchError;
use super::query::{FilterQuery, InitialPredicate, serialize};
use super::row::{FilterRow, RowEditor, RowId, RowIdGenerator, RowPatch};
use super::types::{Connective, OperatorVocabulary};

/// When queries are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApplyMode {
    /// Every change to the row list dispatches a query.
    #[default]
    Auto,
    /// Only an explicit [`FilterBuilder::apply`] dispatches.
    Manual,
}

/// How settlements of older dispatches are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Only the most recent dispatch may change the builder's status.
    #[default]
    IgnoreSuperseded,
    /// Whichever dispatch settles last wins.
    LastWriteWins,
}

/// Builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuilderConfig {
    pub apply_mode: ApplyMode,
    /// Quiet period before an automatic dispatch is sent. Honoured by the
    /// dispatch worker.
    pub debounce: Option<Duration>,
    pub stale_responses: StaleResponsePolicy,
}

impl BuilderConfig {
    pub fn manual() -> Self {
        Self {
            apply_mode: ApplyMode::Manual,
            ..Self::default()
        }
    }
}

/// Identifies one dispatch. Later dispatches have larger tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchToken(u64);

impl fmt::Display for DispatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A query waiting to be handed to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a dispatch does nothing until it is sent to a consumer"]
pub struct Dispatch {
    pub token: DispatchToken,
    pub query: FilterQuery,
}

/// What a consumer outcome did to the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Failed(String),
    /// A newer dispatch exists; the outcome was ignored.
    Superseded,
}

/// Observable builder status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    Idle,
    Dispatching,
    ErrorShown,
}

/// Owns the ordered row list for one filter-editing session.
#[derive(Debug)]
pub struct FilterBuilder {
    catalog: Catalog,
    operators: OperatorVocabulary,
    config: BuilderConfig,
    rows: Vec<FilterRow>,
    ids: RowIdGenerator,
    last_token: u64,
    latest: Option<DispatchToken>,
    applying: bool,
    error: Option<String>,
    /// Seeded rows not yet dispatched
    seeded: bool,
}

impl FilterBuilder {
    /// Creates a builder holding one default row.
    pub fn new(catalog: Catalog, operators: OperatorVocabulary, config: BuilderConfig) -> Self {
        let mut builder = Self {
            catalog,
            operators,
            config,
            rows: Vec::new(),
            ids: RowIdGenerator::default(),
            last_token: 0,
            latest: None,
            applying: false,
            error: None,
            seeded: false,
        };
        let row = builder.default_row();
        builder.rows.push(row);
        builder
    }

    /// Seeds the rows from stored predicates, replacing the default row.
    ///
    /// Predicates are ordered by `sort_order` where given. Rows pointing at
    /// fields missing from the catalog are repaired as on a catalog change.
    /// In automatic mode the seeded rows still have to be sent; see
    /// [`FilterBuilder::initial_dispatch`].
    pub fn with_initial(mut self, mut initial: Vec<InitialPredicate>) -> Self {
        if initial.is_empty() {
            return self;
        }

        initial.sort_by_key(|p| p.sort_order.unwrap_or(usize::MAX));
        self.rows = initial
            .into_iter()
            .map(|p| FilterRow {
                row_id: self.ids.next_id(),
                field_id: Some(p.field_id),
                operator: p.operator,
                value: p.value,
                connective: p.logical_group,
            })
            .collect();
        debug!("Seeded filter builder with {} rows", self.rows.len());

        self.reconcile();
        self.seeded = true;
        self
    }

    /// The dispatch of seeded rows in automatic mode. Returns it once;
    /// unseeded and manual builders have nothing to send.
    pub fn initial_dispatch(&mut self) -> Option<Dispatch> {
        if !std::mem::take(&mut self.seeded) {
            return None;
        }
        if self.config.apply_mode == ApplyMode::Manual {
            debug!("Seeded rows wait for a manual apply");
            return None;
        }
        let query = self.query();
        Some(self.begin_dispatch(query))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn operators(&self) -> &OperatorVocabulary {
        &self.operators
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn rows(&self) -> &[FilterRow] {
        &self.rows
    }

    pub fn row(&self, row_id: RowId) -> Option<&FilterRow> {
        self.rows.iter().find(|r| r.row_id == row_id)
    }

    /// Editor views for every row, in order.
    pub fn editors(&self) -> Vec<RowEditor<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| RowEditor::new(row, index, &self.rows, &self.catalog))
            .collect()
    }

    pub fn editor(&self, row_id: RowId) -> Option<RowEditor<'_>> {
        self.rows
            .iter()
            .position(|r| r.row_id == row_id)
            .map(|index| RowEditor::new(&self.rows[index], index, &self.rows, &self.catalog))
    }

    /// The query the current rows project to.
    pub fn query(&self) -> FilterQuery {
        serialize(&self.rows)
    }

    /// Number of rows that would survive serialization.
    pub fn active_filter_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_complete()).count()
    }

    /// Appends a default row. Does nothing without a catalog.
    pub fn add_row(&mut self) -> Option<Dispatch> {
        if self.catalog.is_empty() {
            warn!("Cannot add filter row: the catalog is empty");
            return None;
        }

        let row = self.default_row();
        debug!("Adding filter row {}", row.row_id);
        self.rows.push(row);
        self.rows_changed()
    }

    /// Removes a row. The list never becomes empty: removing the last row
    /// leaves a single default row.
    pub fn remove_row(&mut self, row_id: RowId) -> Option<Dispatch> {
        let before = self.rows.len();
        self.rows.retain(|r| r.row_id != row_id);
        if self.rows.len() == before {
            warn!("Cannot remove filter row {}: no such row", row_id);
            return None;
        }

        debug!("Removed filter row {}", row_id);
        if self.rows.is_empty() {
            let row = self.default_row();
            self.rows.push(row);
        }
        self.rows_changed()
    }

    /// Merges a patch into a row. No validation happens here.
    pub fn update_row(&mut self, row_id: RowId, patch: RowPatch) -> Option<Dispatch> {
        let Some(row) = self.rows.iter_mut().find(|r| r.row_id == row_id) else {
            warn!("Cannot update filter row {}: no such row", row_id);
            return None;
        };

        debug!("Updating filter row {} with {:?}", row_id, patch);
        patch.apply_to(row);
        self.rows_changed()
    }

    /// Points a row at another field, clearing its operator and value.
    pub fn change_field(&mut self, row_id: RowId, field_id: FieldId) -> Option<Dispatch> {
        if !self.catalog.contains(field_id) {
            warn!("Cannot change filter row {} to unknown field {}", row_id, field_id);
            return None;
        }
        let Some(row) = self.rows.iter_mut().find(|r| r.row_id == row_id) else {
            warn!("Cannot change field of filter row {}: no such row", row_id);
            return None;
        };

        debug!("Changing filter row {} to field {}", row_id, field_id);
        row.field_id = Some(field_id);
        row.operator.clear();
        row.value.clear();
        self.rows_changed()
    }

    /// Replaces the catalog. When its content differs, rows pointing at
    /// fields that no longer exist are reset to the first field.
    pub fn set_catalog(&mut self, catalog: Catalog) -> Option<Dispatch> {
        if catalog == self.catalog {
            return None;
        }

        debug!("Catalog changed, {} fields", catalog.len());
        self.catalog = catalog;
        if self.reconcile() {
            self.rows_changed()
        } else {
            None
        }
    }

    pub fn set_operators(&mut self, operators: OperatorVocabulary) {
        self.operators = operators;
    }

    /// Resets to a single default row and dispatches an empty query,
    /// whatever the apply mode.
    pub fn clear_all(&mut self) -> Dispatch {
        debug!("Clearing all filter rows");
        let row = self.default_row();
        self.rows = vec![row];
        self.begin_dispatch(FilterQuery::empty())
    }

    /// Explicit apply trigger. Only dispatches in manual mode; in automatic
    /// mode the rows have already been dispatched.
    pub fn apply(&mut self) -> Option<Dispatch> {
        if self.config.apply_mode == ApplyMode::Auto {
            debug!("Ignoring manual apply in automatic mode");
            return None;
        }
        let query = self.query();
        Some(self.begin_dispatch(query))
    }

    /// Records the consumer's outcome for a dispatch.
    ///
    /// Failures are kept as a message; nothing is propagated and the rows
    /// are left as they are.
    pub fn complete(
        &mut self,
        token: DispatchToken,
        result: Result<(), DispatchError>,
    ) -> Settlement {
        if self.config.stale_responses == StaleResponsePolicy::IgnoreSuperseded
            && self.latest != Some(token)
        {
            debug!("Ignoring outcome of superseded dispatch {}", token);
            return Settlement::Superseded;
        }

        self.applying = false;
        match result {
            Ok(()) => {
                debug!("Dispatch {} applied", token);
                self.error = None;
                Settlement::Applied
            }
            Err(e) => {
                let message = e.to_string();
                warn!("Dispatch {} failed: {}", token, message);
                self.error = Some(message.clone());
                Settlement::Failed(message)
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    pub fn state(&self) -> BuilderState {
        if self.applying {
            BuilderState::Dispatching
        } else if self.error.is_some() {
            BuilderState::ErrorShown
        } else {
            BuilderState::Idle
        }
    }

    /// First field, first operator, empty value.
    fn default_row(&mut self) -> FilterRow {
        FilterRow {
            row_id: self.ids.next_id(),
            field_id: self.catalog.first().map(|f| f.id),
            operator: self
                .operators
                .first()
                .map(|o| o.value.clone())
                .unwrap_or_default(),
            value: String::new(),
            connective: Connective::And,
        }
    }

    /// Resets rows whose field is missing from a non-empty catalog.
    /// Returns whether any row changed.
    fn reconcile(&mut self) -> bool {
        let Some(first) = self.catalog.first().map(|f| f.id) else {
            return false;
        };

        let mut repaired = 0;
        for row in &mut self.rows {
            let valid = row.field_id.is_some_and(|id| self.catalog.contains(id));
            if !valid {
                debug!("Resetting filter row {} to field {}", row.row_id, first);
                row.field_id = Some(first);
                row.operator.clear();
                row.value.clear();
                repaired += 1;
            }
        }
        repaired > 0
    }

    fn rows_changed(&mut self) -> Option<Dispatch> {
        if self.config.apply_mode == ApplyMode::Manual || self.rows.is_empty() {
            return None;
        }
        let query = self.query();
        Some(self.begin_dispatch(query))
    }

    fn begin_dispatch(&mut self, query: FilterQuery) -> Dispatch {
        self.last_token += 1;
        let token = DispatchToken(self.last_token);
        self.latest = Some(token);
        self.applying = true;
        debug!("Dispatch {} with {} predicates", token, query.len());
        Dispatch { token, query }
    }
}
