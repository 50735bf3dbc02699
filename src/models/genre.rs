//! Genre model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    book::BookEntry,
    kind::{CatalogRecord, EntityKind},
    validation::{self, CatalogForm, FieldErrors},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord for Genre {
    const KIND: EntityKind = EntityKind::Genre;
    const SELECT: &'static str =
        "SELECT genres.id, genres.name, genres.created_at, genres.updated_at FROM genres";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreEntry {
    #[serde(flatten)]
    pub genre: Genre,
    pub url: String,
}

impl From<Genre> for GenreEntry {
    fn from(genre: Genre) -> Self {
        Self {
            url: genre.url(),
            genre,
        }
    }
}

/// Genre detail and delete-confirmation view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreDetail {
    pub genre: GenreEntry,
    pub books: Vec<BookEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct GenreForm {
    #[validate(length(min = 3, message = "Genre name must contain at least 3 characters"))]
    pub name: String,
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

impl CatalogForm for GenreForm {
    type Input = String;

    const FIELDS: &'static [&'static str] = &["name"];

    fn sanitize(self) -> Self {
        Self {
            name: validation::trim(self.name),
        }
    }

    fn parse(&self, errors: &mut FieldErrors) -> Option<String> {
        if self.name.chars().count() > 100 {
            errors.push("name", "Genre name must contain at most 100 characters");
        }
        Some(self.name.clone())
    }
}
