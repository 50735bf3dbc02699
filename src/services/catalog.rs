//! Catalog-wide operations and the form submission step shared by every kind

use crate::{
    error::{AppError, AppResult},
    models::{
        validation::{self, CatalogForm},
        BookInstanceStatus, CatalogCounts, EntityKind,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Record counts for the catalog home page, queried concurrently
    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let repo = &self.repository;
        let (books, instances, available, authors, genres) = tokio::try_join!(
            repo.count(EntityKind::Book),
            repo.count(EntityKind::BookInstance),
            repo.book_instances_count_with_status(BookInstanceStatus::Available),
            repo.count(EntityKind::Author),
            repo.count(EntityKind::Genre),
        )?;

        Ok(CatalogCounts {
            book_count: books,
            book_instance_count: instances,
            book_instance_available_count: available,
            author_count: authors,
            genre_count: genres,
        })
    }

    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}

/// Sanitize and check a submitted form.
///
/// On failure nothing is persisted and the error carries every violated
/// rule together with the sanitized input for re-presentation.
pub fn submit<F: CatalogForm>(form: F) -> AppResult<F::Input> {
    let form = form.sanitize();
    match validation::check(&form) {
        Ok(input) => Ok(input),
        Err(errors) => {
            tracing::debug!("Rejected form submission: {}", errors);
            Err(AppError::Validation {
                errors,
                input: serde_json::to_value(&form)?,
            })
        }
    }
}
