//! Form validation: per-field error collection and input parsing helpers

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// ASCII letters and digits only, at least one
pub static ALPHANUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid alphanumeric regex"));

/// One violated rule on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every rule violation found on a submitted form, not just the first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn messages_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Stable sort into the order the form declares its fields in
    fn order_by(&mut self, fields: &[&str]) {
        self.0.sort_by_key(|e| {
            fields
                .iter()
                .position(|f| *f == e.field)
                .unwrap_or(fields.len())
        });
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, list) in fields {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.push(&field.to_string(), message);
            }
        }
        out
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// A submitted create/update form for one entity kind.
///
/// The derived `Validate` rules cover what the `validator` attributes can
/// express; `parse` adds the remaining checks (dates, enumerations) and
/// converts the form into the typed input the repository persists.
pub trait CatalogForm: Validate + Serialize + Sized {
    type Input;

    /// Field names in display order
    const FIELDS: &'static [&'static str];

    /// Trim surrounding whitespace from every text field
    fn sanitize(self) -> Self;

    /// Returns `None` when any check pushed an error
    fn parse(&self, errors: &mut FieldErrors) -> Option<Self::Input>;
}

/// Run every rule of a form, collecting all violations
pub fn check<F: CatalogForm>(form: &F) -> Result<F::Input, FieldErrors> {
    let mut errors = match form.validate() {
        Ok(()) => FieldErrors::default(),
        Err(e) => FieldErrors::from(e),
    };
    let input = form.parse(&mut errors);
    errors.order_by(F::FIELDS);

    match input {
        Some(input) if errors.is_empty() => Ok(input),
        _ => Err(errors),
    }
}

pub fn trim(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

/// Trim, mapping blank values to `None`
pub fn trim_opt(value: Option<String>) -> Option<String> {
    value.map(trim).filter(|v| !v.is_empty())
}

/// Calendar date from an ISO-8601 date or date-time string
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    parse_iso_datetime(value).map(|dt| dt.date_naive())
}

/// Instant from an ISO-8601 string. Bare dates are taken as midnight UTC,
/// date-times without an offset as UTC.
pub fn parse_iso_datetime(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Medium date as shown to readers, e.g. `Oct 15, 2026`
pub fn format_medium(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
