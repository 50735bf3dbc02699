//! Data models for the library catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod catalog;
pub mod genre;
pub mod kind;
pub mod validation;

// Re-export commonly used types
pub use author::{Author, AuthorDetail, AuthorEntry, AuthorForm};
pub use book::{Book, BookDetail, BookEntry, BookForm, BookListEntry, BookSummary};
pub use book_instance::{
    BookInstance, BookInstanceDetail, BookInstanceEntry, BookInstanceForm, BookInstanceListEntry,
    BookInstanceStatus, BookInstanceSummary,
};
pub use catalog::{CatalogCounts, DeleteOutcome};
pub use genre::{Genre, GenreDetail, GenreEntry, GenreForm};
pub use kind::{CatalogRecord, EntityKind};
pub use validation::{FieldError, FieldErrors};
