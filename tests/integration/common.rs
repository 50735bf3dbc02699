//! Shared fixtures

use library_catalog::{
    models::{AuthorForm, BookForm, BookInstanceForm, GenreForm},
    repository::Repository,
    services::Services,
    AppConfig, AppState,
};
use sqlx::PgPool;

pub fn services(pool: PgPool) -> Services {
    Services::new(Repository::new(pool))
}

pub fn state(pool: PgPool) -> AppState {
    AppState::new(AppConfig::default(), Repository::new(pool))
}

pub fn author_form(first: &str, family: &str) -> AuthorForm {
    AuthorForm {
        first_name: first.to_string(),
        family_name: family.to_string(),
        ..Default::default()
    }
}

pub fn genre_form(name: &str) -> GenreForm {
    GenreForm {
        name: name.to_string(),
    }
}

pub fn book_form(title: &str, author_id: i32, genres: &[i32]) -> BookForm {
    BookForm {
        title: title.to_string(),
        author_id: Some(author_id),
        summary: format!("Summary of {}", title),
        isbn: "9780000000000".to_string(),
        genre: genres.to_vec(),
    }
}

pub fn copy_form(book_id: i32, imprint: &str) -> BookInstanceForm {
    BookInstanceForm {
        book_id: Some(book_id),
        imprint: imprint.to_string(),
        ..Default::default()
    }
}
