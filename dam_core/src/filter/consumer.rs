//! The seam between the builder and whatever executes a query

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use super::query::FilterQuery;

/// Message shown when a consumer fails without saying why.
pub const DEFAULT_DISPATCH_ERROR: &str = "Failed to apply filters";

/// A consumer rejected a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchError {
    message: String,
}

impl DispatchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.trim().is_empty() {
            write!(f, "{}", DEFAULT_DISPATCH_ERROR)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for DispatchError {}

/// Executes a filter query, either by calling a search endpoint or by
/// filtering a local table. The transport is up to the implementor.
pub trait FilterConsumer {
    fn apply(
        &self,
        query: &FilterQuery,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send;
}

impl<C: FilterConsumer + Send + Sync> FilterConsumer for Arc<C> {
    fn apply(
        &self,
        query: &FilterQuery,
    ) -> impl Future<Output = Result<(), DispatchError>> + Send {
        (**self).apply(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_falls_back() {
        assert_eq!(DispatchError::new("").to_string(), DEFAULT_DISPATCH_ERROR);
        assert_eq!(DispatchError::new("  ").to_string(), DEFAULT_DISPATCH_ERROR);
    }

    #[test]
    fn test_message_kept() {
        let error = DispatchError::new("Search service unavailable");
        assert_eq!(error.to_string(), "Search service unavailable");
        assert_eq!(error.message(), "Search service unavailable");
    }
}
