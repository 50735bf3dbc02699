//! Entity-kind descriptors shared by the generic catalog operations.
//!
//! Each kind knows its table, the column it is listed by, its canonical URL
//! and which rows (if any) must be absent before one of its rows may be
//! deleted. Everything kind-specific that the generic list/get/delete
//! operations need lives here as data.

use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Author,
    Genre,
    Book,
    BookInstance,
}

/// Rows in another table whose foreign key references the row being deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependents {
    pub table: &'static str,
    pub column: &'static str,
    pub kind: EntityKind,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Author,
        EntityKind::Genre,
        EntityKind::Book,
        EntityKind::BookInstance,
    ];

    pub const fn table(self) -> &'static str {
        match self {
            EntityKind::Author => "authors",
            EntityKind::Genre => "genres",
            EntityKind::Book => "books",
            EntityKind::BookInstance => "book_instances",
        }
    }

    /// Column that list operations sort ascending by
    pub const fn order_column(self) -> &'static str {
        match self {
            EntityKind::Author => "family_name",
            EntityKind::Genre => "name",
            EntityKind::Book => "title",
            EntityKind::BookInstance => "imprint",
        }
    }

    /// Path segment used in canonical URLs
    pub const fn segment(self) -> &'static str {
        match self {
            EntityKind::Author => "author",
            EntityKind::Genre => "genre",
            EntityKind::Book => "book",
            EntityKind::BookInstance => "bookinstance",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Genre => "Genre",
            EntityKind::Book => "Book",
            EntityKind::BookInstance => "Book copy",
        }
    }

    /// Canonical URL path of the row with the given identifier
    pub fn url(self, id: i32) -> String {
        format!("/catalog/{}/{}", self.segment(), id)
    }

    /// Path of the kind's list view, the redirect target after a delete
    pub fn list_path(self) -> String {
        format!("/catalog/{}s", self.segment())
    }

    /// Dependent rows that block deletion. Book copies are leaves.
    pub const fn dependents(self) -> Option<Dependents> {
        match self {
            EntityKind::Author => Some(Dependents {
                table: "books",
                column: "author_id",
                kind: EntityKind::Book,
            }),
            EntityKind::Genre => Some(Dependents {
                table: "book_genres",
                column: "genre_id",
                kind: EntityKind::Book,
            }),
            EntityKind::Book => Some(Dependents {
                table: "book_instances",
                column: "book_id",
                kind: EntityKind::BookInstance,
            }),
            EntityKind::BookInstance => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A row type the generic list/get operations can load.
///
/// `SELECT` is a complete select statement over the kind's table (joins
/// allowed) without `WHERE` or `ORDER BY`; columns of the kind's own table
/// must be reachable qualified by the table name.
pub trait CatalogRecord: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    const KIND: EntityKind;
    const SELECT: &'static str;

    fn id(&self) -> i32;

    fn url(&self) -> String {
        Self::KIND.url(self.id())
    }
}
