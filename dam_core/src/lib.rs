//! Core data structures for Dam.
//!
//! This crate holds everything the dashboard needs that is not view code:
//! - The field catalog and its data-type taxonomy
//! - The filter row model, query builder and wire serialization
//! - Local evaluation of filter queries against in-memory assets
//! - Dynamic form schemas derived from the field catalog
//! - Folder trees and smart-folder filters

pub mod catalog;
pub mod eval;
pub mod filter;
pub mod folder;
pub mod form;
pub mod session;

pub use catalog::{
    ApiDataType, ApiField, Catalog, CatalogError, CatalogOptions, Field, FieldDataType, FieldId,
    ValueEditor, ValueError, ValueOption, parse_datasource,
};
pub use filter::{
    ApplyMode, BuilderConfig, Connective, Dispatch, DispatchError, FilterBuilder, FilterConsumer,
    FilterQuery, FilterRow, InitialPredicate, OperatorVocabulary, Predicate, RowId, RowPatch,
    Settlement,
};
