//! Filter rows, the query builder and the query wire format

pub mod builder;
pub mod consumer;
pub mod query;
pub mod row;
pub mod types;

pub use builder::{
    ApplyMode, BuilderConfig, BuilderState, Dispatch, DispatchToken, FilterBuilder, Settlement,
    StaleResponsePolicy,
};
pub use consumer::{DEFAULT_DISPATCH_ERROR, DispatchError, FilterConsumer};
pub use query::{FilterQuery, InitialPredicate, Predicate, serialize};
pub use row::{FilterRow, RowEditor, RowId, RowPatch};
pub use types::{Connective, DEFAULT_OPERATORS, FilterOperator, OperatorOption, OperatorVocabulary};
