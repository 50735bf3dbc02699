//! Catalog-wide summary types

use serde::Serialize;
use utoipa::ToSchema;

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

/// Outcome of a delete-with-guard.
///
/// `Blocked` carries the same view the delete confirmation shows, listing
/// the dependent rows that prevented the delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome<V> {
    Deleted,
    Blocked(V),
}

impl<V> DeleteOutcome<V> {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}
