//! Book model and related types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    author::AuthorEntry,
    book_instance::BookInstanceEntry,
    genre::{Genre, GenreEntry},
    kind::{CatalogRecord, EntityKind},
    validation::{self, CatalogForm, FieldErrors},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord for Book {
    const KIND: EntityKind = EntityKind::Book;
    const SELECT: &'static str = "SELECT books.id, books.title, books.summary, books.isbn, \
         books.author_id, books.created_at, books.updated_at FROM books";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookEntry {
    #[serde(flatten)]
    pub book: Book,
    pub url: String,
}

impl From<Book> for BookEntry {
    fn from(book: Book) -> Self {
        Self {
            url: book.url(),
            book,
        }
    }
}

/// Book row eager-loaded with its author's name, as listed
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookSummary {
    #[sqlx(flatten)]
    pub book: Book,
    pub author_first_name: String,
    pub author_family_name: String,
}

impl CatalogRecord for BookSummary {
    const KIND: EntityKind = EntityKind::Book;
    const SELECT: &'static str = "SELECT books.id, books.title, books.summary, books.isbn, \
         books.author_id, books.created_at, books.updated_at, \
         authors.first_name AS author_first_name, authors.family_name AS author_family_name \
         FROM books JOIN authors ON authors.id = books.author_id";

    fn id(&self) -> i32 {
        self.book.id
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookListEntry {
    #[serde(flatten)]
    pub book: BookEntry,
    /// Author display name
    pub author: String,
    pub author_url: String,
}

impl From<BookSummary> for BookListEntry {
    fn from(row: BookSummary) -> Self {
        let author = format!("{}, {}", row.author_family_name, row.author_first_name);
        Self {
            author_url: EntityKind::Author.url(row.book.author_id),
            author,
            book: row.book.into(),
        }
    }
}

/// Book detail and delete-confirmation view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub book: BookEntry,
    pub author: AuthorEntry,
    pub genres: Vec<GenreEntry>,
    pub instances: Vec<BookInstanceEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(required(message = "Author must not be empty."))]
    pub author_id: Option<i32>,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    /// Genre identifiers
    pub genre: Vec<i32>,
}

/// Validated book fields. `genres` is a set: duplicates collapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInput {
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub genres: BTreeSet<i32>,
}

impl BookForm {
    pub fn from_book(book: &Book, genres: &[Genre]) -> Self {
        Self {
            title: book.title.clone(),
            author_id: Some(book.author_id),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre: genres.iter().map(|g| g.id).collect(),
        }
    }
}

impl CatalogForm for BookForm {
    type Input = BookInput;

    const FIELDS: &'static [&'static str] = &["title", "author_id", "summary", "isbn", "genre"];

    fn sanitize(self) -> Self {
        Self {
            title: validation::trim(self.title),
            author_id: self.author_id,
            summary: validation::trim(self.summary),
            isbn: validation::trim(self.isbn),
            genre: self.genre,
        }
    }

    fn parse(&self, _errors: &mut FieldErrors) -> Option<BookInput> {
        Some(BookInput {
            title: self.title.clone(),
            author_id: self.author_id?,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genres: self.genre.iter().copied().collect(),
        })
    }
}

/// A genre offered on the book form, `checked` when associated with the book
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreOption {
    #[serde(flatten)]
    pub genre: GenreEntry,
    pub checked: bool,
}

/// Data for the book create/update forms
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookFormData {
    /// Current values, absent on create
    pub book: Option<BookForm>,
    pub authors: Vec<AuthorEntry>,
    pub genres: Vec<GenreOption>,
}

impl BookFormData {
    pub fn new(
        book: Option<BookForm>,
        authors: Vec<AuthorEntry>,
        genres: Vec<Genre>,
        selected: &BTreeSet<i32>,
    ) -> Self {
        let genres = genres
            .into_iter()
            .map(|g| GenreOption {
                checked: selected.contains(&g.id),
                genre: g.into(),
            })
            .collect();
        Self {
            book,
            authors,
            genres,
        }
    }
}
