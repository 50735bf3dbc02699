//! Book instance (physical copy) model and related types

use std::str::FromStr;

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

/// Copy availability, stored as the `book_instance_status` Postgres enum
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type,
)]
#[sqlx(type_name = "book_instance_status")]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Available,
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookInstanceStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|st| st.as_str() == s).ok_or(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookInstance {
    /// e.g. `Oct 15, 2026`
    pub fn due_back_formatted(&self) -> String {
        validation::format_medium(self.due_back.date_naive())
    }

    pub fn due_back_yyyy_mm_dd(&self) -> String {
        validation::format_iso(self.due_back.date_naive())
    }
}

impl CatalogRecord for BookInstance {
    const KIND: EntityKind = EntityKind::BookInstance;
    const SELECT: &'static str = "SELECT book_instances.id, book_instances.book_id, \
         book_instances.imprint, book_instances.status, book_instances.due_back, \
         book_instances.created_at, book_instances.updated_at FROM book_instances";

    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceEntry {
    #[serde(flatten)]
    pub instance: BookInstance,
    pub url: String,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
}

impl From<BookInstance> for BookInstanceEntry {
    fn from(instance: BookInstance) -> Self {
        Self {
            url: instance.url(),
            due_back_formatted: instance.due_back_formatted(),
            due_back_yyyy_mm_dd: instance.due_back_yyyy_mm_dd(),
            instance,
        }
    }
}

/// Copy row eager-loaded with its book's title, as listed
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct BookInstanceSummary {
    #[sqlx(flatten)]
    pub instance: BookInstance,
    pub book_title: String,
}

impl CatalogRecord for BookInstanceSummary {
    const KIND: EntityKind = EntityKind::BookInstance;
    const SELECT: &'static str = "SELECT book_instances.id, book_instances.book_id, \
         book_instances.imprint, book_instances.status, book_instances.due_back, \
         book_instances.created_at, book_instances.updated_at, books.title AS book_title \
         FROM book_instances JOIN books ON books.id = book_instances.book_id";

    fn id(&self) -> i32 {
        self.instance.id
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceListEntry {
    #[serde(flatten)]
    pub instance: BookInstanceEntry,
    pub book_title: String,
    pub book_url: String,
}

impl From<BookInstanceSummary> for BookInstanceListEntry {
    fn from(row: BookInstanceSummary) -> Self {
        Self {
            book_url: EntityKind::Book.url(row.instance.book_id),
            book_title: row.book_title,
            instance: row.instance.into(),
        }
    }
}

/// Copy detail and delete-confirmation view
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceDetail {
    pub instance: BookInstanceEntry,
    pub book: BookEntry,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct BookInstanceForm {
    #[validate(required(message = "Book must be specified"))]
    pub book_id: Option<i32>,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    /// One of Available, Maintenance, Loaned, Reserved; blank for Maintenance
    pub status: Option<String>,
    /// ISO-8601 date, blank for now
    pub due_back: Option<String>,
}

/// Validated copy fields. A missing `due_back` is stamped with the write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceInput {
    pub book_id: i32,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<DateTime<Utc>>,
}

impl From<&BookInstance> for BookInstanceForm {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book_id: Some(instance.book_id),
            imprint: instance.imprint.clone(),
            status: Some(instance.status.to_string()),
            due_back: Some(instance.due_back_yyyy_mm_dd()),
        }
    }
}

impl CatalogForm for BookInstanceForm {
    type Input = BookInstanceInput;

    const FIELDS: &'static [&'static str] = &["book_id", "imprint", "status", "due_back"];

    fn sanitize(self) -> Self {
        Self {
            book_id: self.book_id,
            imprint: validation::trim(self.imprint),
            status: validation::trim_opt(self.status),
            due_back: validation::trim_opt(self.due_back),
        }
    }

    fn parse(&self, errors: &mut FieldErrors) -> Option<BookInstanceInput> {
        let status = match self.status.as_deref() {
            None => Some(BookInstanceStatus::default()),
            Some(raw) => {
                let parsed = raw.parse::<BookInstanceStatus>().ok();
                if parsed.is_none() {
                    errors.push("status", "Invalid status");
                }
                parsed
            }
        };

        let due_back = match self.due_back.as_deref() {
            None => Some(None),
            Some(raw) => {
                let parsed = validation::parse_iso_datetime(raw);
                if parsed.is_none() {
                    errors.push("due_back", "Invalid date");
                }
                parsed.map(Some)
            }
        };

        Some(BookInstanceInput {
            book_id: self.book_id?,
            imprint: self.imprint.clone(),
            status: status?,
            due_back: due_back?,
        })
    }
}

/// Data for the copy create/update forms
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceFormData {
    /// Current values, absent on create
    pub instance: Option<BookInstanceForm>,
    pub selected_book_id: Option<i32>,
    pub books: Vec<BookEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validation::check;
    use chrono::TimeZone;

    fn form(imprint: &str) -> BookInstanceForm {
        BookInstanceForm {
            book_id: Some(1),
            imprint: imprint.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Loaned".parse::<BookInstanceStatus>(), Ok(BookInstanceStatus::Loaned));
        assert_eq!("loaned".parse::<BookInstanceStatus>(), Err(()));
        assert_eq!(BookInstanceStatus::default(), BookInstanceStatus::Maintenance);
        assert_eq!(BookInstanceStatus::Reserved.to_string(), "Reserved");
    }

    #[test]
    fn test_defaults_when_absent() {
        let input = check(&form("Gollancz, 2011.").sanitize()).unwrap();
        assert_eq!(input.status, BookInstanceStatus::Maintenance);
        assert_eq!(input.due_back, None);
    }

    #[test]
    fn test_blank_status_defaults() {
        let mut f = form("Ace, 1969.");
        f.status = Some("  ".to_string());
        let input = check(&f.sanitize()).unwrap();
        assert_eq!(input.status, BookInstanceStatus::Maintenance);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut f = form("Ace, 1969.");
        f.status = Some("Lost".to_string());
        let errors = check(&f).unwrap_err();
        assert_eq!(
            errors.messages_for("status").collect::<Vec<_>>(),
            vec!["Invalid status"]
        );
    }

    #[test]
    fn test_due_back_parsing() {
        let mut f = form("Ace, 1969.");
        f.due_back = Some("2026-11-01".to_string());
        let input = check(&f).unwrap();
        assert_eq!(
            input.due_back,
            Some(Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap())
        );

        f.due_back = Some("31/12/2026".to_string());
        let errors = check(&f).unwrap_err();
        assert_eq!(
            errors.messages_for("due_back").collect::<Vec<_>>(),
            vec!["Invalid date"]
        );
    }

    #[test]
    fn test_missing_book_and_imprint() {
        let errors = check(&BookInstanceForm::default()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["book_id", "imprint"]);
    }

    #[test]
    fn test_derived_due_dates() {
        let instance = BookInstance {
            id: 4,
            book_id: 1,
            imprint: "Ace, 1969.".to_string(),
            status: BookInstanceStatus::Available,
            due_back: Utc.with_ymd_and_hms(2026, 10, 15, 18, 30, 0).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(instance.due_back_formatted(), "Oct 15, 2026");
        assert_eq!(instance.due_back_yyyy_mm_dd(), "2026-10-15");

        let entry = BookInstanceEntry::from(instance);
        assert_eq!(entry.url, "/catalog/bookinstance/4");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["status"], "Available");
    }
}
