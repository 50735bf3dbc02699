//! Book instance (copy) catalog operations

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::BookInstanceFormData, Book, BookInstance, BookInstanceDetail,
        BookInstanceForm, BookInstanceListEntry, BookInstanceSummary, EntityKind,
    },
    repository::{GuardedDelete, Repository},
};

use super::catalog::submit;

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies by imprint, each with its book's title
    pub async fn list(&self) -> AppResult<Vec<BookInstanceListEntry>> {
        let rows = self.repository.list::<BookInstanceSummary>().await?;
        Ok(rows.into_iter().map(BookInstanceListEntry::from).collect())
    }

    pub async fn detail(&self, id: i32) -> AppResult<BookInstanceDetail> {
        let instance = self.repository.get::<BookInstance>(id).await?;
        let book = self.repository.get::<Book>(instance.book_id).await?;
        Ok(BookInstanceDetail {
            instance: instance.into(),
            book: book.into(),
        })
    }

    /// Books to choose from
    pub async fn create_form(&self) -> AppResult<BookInstanceFormData> {
        let books = self.repository.list::<Book>().await?;
        Ok(BookInstanceFormData {
            instance: None,
            selected_book_id: None,
            books: books.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create(&self, form: BookInstanceForm) -> AppResult<BookInstance> {
        let input = submit(form)?;
        let instance = self.repository.book_instances_create(&input).await?;
        tracing::info!(
            "Created copy id={} of book id={} ({})",
            instance.id,
            instance.book_id,
            instance.status
        );
        Ok(instance)
    }

    pub async fn update_form(&self, id: i32) -> AppResult<BookInstanceFormData> {
        let (instance, books) = tokio::try_join!(
            self.repository.find::<BookInstance>(id),
            self.repository.list::<Book>(),
        )?;
        let instance =
            instance.ok_or_else(|| AppError::not_found(EntityKind::BookInstance, id))?;

        Ok(BookInstanceFormData {
            selected_book_id: Some(instance.book_id),
            instance: Some(BookInstanceForm::from(&instance)),
            books: books.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn update(&self, id: i32, form: BookInstanceForm) -> AppResult<BookInstance> {
        let input = submit(form)?;
        let instance = self.repository.book_instances_update(id, &input).await?;
        tracing::info!("Updated copy id={}", instance.id);
        Ok(instance)
    }

    pub async fn delete_view(&self, id: i32) -> AppResult<BookInstanceDetail> {
        self.detail(id).await
    }

    /// Copies are leaves: the delete always proceeds for an existing id
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        match self
            .repository
            .delete_guarded(EntityKind::BookInstance, id)
            .await?
        {
            GuardedDelete::Deleted => {
                tracing::info!("Deleted copy id={}", id);
                Ok(())
            }
            GuardedDelete::Blocked(_) => Err(AppError::Internal(format!(
                "copy id={} reported dependents",
                id
            ))),
        }
    }
}
