//! Author model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{
    book::BookEntry,
    kind::{CatalogRecord, EntityKind},
    validation::{self, CatalogForm, FieldErrors, ALPHANUMERIC},
};

const NAME_MAX: usize = 100;

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Author {
    /// "family_name, first_name", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        self.date_of_birth.map(validation::format_medium).unwrap_or_default()
    }

    pub fn date_of_death_formatted(&self) -> String {
        self.date_of_death.map(validation::format_medium).unwrap_or_default()
    }

    pub fn date_of_birth_yyyy_mm_dd(&self) -> String {
        self.date_of_birth.map(validation::format_iso).unwrap_or_default()
    }

    pub fn date_of_death_yyyy_mm_dd(&self) -> String {
        self.date_of_death.map(validation::format_iso).unwrap_or_default()
    }
}

impl CatalogRecord for Author {
    const KIND: EntityKind = EntityKind::Author;
    const SELECT: &'static str = "SELECT authors.id, authors.first_name, authors.family_name, \
         authors.date_of_birth, authors.date_of_death, authors.created_at, authors.updated_at \
         FROM authors";

    fn id(&self) -> i32 {
        self.id
    }
}

/// Author as presented, with its derived fields
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorEntry {
    #[serde(flatten)]
    pub author: Author,
    pub name: String,
    pub url: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

impl From<Author> for AuthorEntry {
    fn from(author: Author) -> Self {
        Self {
            name: author.name(),
            url: author.url(),
            date_of_birth_formatted: author.date_of_birth_formatted(),
            date_of_death_formatted: author.date_of_death_formatted(),
            date_of_birth_yyyy_mm_dd: author.date_of_birth_yyyy_mm_dd(),
            date_of_death_yyyy_mm_dd: author.date_of_death_yyyy_mm_dd(),
            author,
        }
    }
}

/// Author detail and delete-confirmation view: the author and their books
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorDetail {
    pub author: AuthorEntry,
    pub books: Vec<BookEntry>,
}

/// Create/update author form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(
        length(min = 1, message = "First name must be specified."),
        regex(path = *ALPHANUMERIC, message = "First name has non-alphanumeric characters.")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, message = "Family name must be specified."),
        regex(path = *ALPHANUMERIC, message = "Family name has non-alphanumeric characters.")
    )]
    pub family_name: String,
    /// ISO-8601 date, blank for unknown
    pub date_of_birth: Option<String>,
    /// ISO-8601 date, blank for unknown
    pub date_of_death: Option<String>,
}

/// Validated author fields, written in full on create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(validation::format_iso),
            date_of_death: author.date_of_death.map(validation::format_iso),
        }
    }
}

impl CatalogForm for AuthorForm {
    type Input = AuthorInput;

    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn sanitize(self) -> Self {
        Self {
            first_name: validation::trim(self.first_name),
            family_name: validation::trim(self.family_name),
            date_of_birth: validation::trim_opt(self.date_of_birth),
            date_of_death: validation::trim_opt(self.date_of_death),
        }
    }

    fn parse(&self, errors: &mut FieldErrors) -> Option<AuthorInput> {
        if self.first_name.chars().count() > NAME_MAX {
            errors.push("first_name", "First name must be at most 100 characters.");
        }
        if self.family_name.chars().count() > NAME_MAX {
            errors.push("family_name", "Family name must be at most 100 characters.");
        }
        let date_of_birth = parse_optional_date(
            self.date_of_birth.as_deref(),
            "date_of_birth",
            "Invalid date of birth",
            errors,
        );
        let date_of_death = parse_optional_date(
            self.date_of_death.as_deref(),
            "date_of_death",
            "Invalid date of death",
            errors,
        );

        Some(AuthorInput {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: date_of_birth?,
            date_of_death: date_of_death?,
        })
    }
}

/// `Some(None)` for a blank value, `None` after recording an error
fn parse_optional_date(
    value: Option<&str>,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) -> Option<Option<NaiveDate>> {
    match value {
        None => Some(None),
        Some(raw) => match validation::parse_iso_date(raw) {
            Some(date) => Some(Some(date)),
            None => {
                errors.push(field, message);
                None
            }
        },
    }
}
