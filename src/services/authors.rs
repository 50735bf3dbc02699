//! Author catalog operations

use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorDetail, AuthorEntry, AuthorForm, DeleteOutcome, EntityKind},
    repository::{GuardedDelete, Repository},
};

use super::catalog::submit;

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All authors by family name
    pub async fn list(&self) -> AppResult<Vec<AuthorEntry>> {
        let authors = self.repository.list::<Author>().await?;
        Ok(authors.into_iter().map(AuthorEntry::from).collect())
    }

    /// An author with all of their books
    pub async fn detail(&self, id: i32) -> AppResult<AuthorDetail> {
        let (author, books) = tokio::try_join!(
            self.repository.find::<Author>(id),
            self.repository.authors_get_books(id),
        )?;
        let author = author.ok_or_else(|| AppError::not_found(EntityKind::Author, id))?;

        Ok(AuthorDetail {
            author: author.into(),
            books: books.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Author> {
        let input = submit(form)?;
        let author = self.repository.authors_create(&input).await?;
        tracing::info!("Created author id={} ({})", author.id, author.name());
        Ok(author)
    }

    /// Current values for the update form
    pub async fn update_form(&self, id: i32) -> AppResult<AuthorForm> {
        let author = self.repository.get::<Author>(id).await?;
        Ok(AuthorForm::from(&author))
    }

    pub async fn update(&self, id: i32, form: AuthorForm) -> AppResult<Author> {
        let input = submit(form)?;
        let author = self.repository.authors_update(id, &input).await?;
        tracing::info!("Updated author id={}", author.id);
        Ok(author)
    }

    /// What the delete confirmation shows: the author and the books that
    /// would block the delete
    pub async fn delete_view(&self, id: i32) -> AppResult<AuthorDetail> {
        self.detail(id).await
    }

    /// Delete an author that has no books
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<AuthorDetail>> {
        match self.repository.delete_guarded(EntityKind::Author, id).await? {
            GuardedDelete::Deleted => {
                tracing::info!("Deleted author id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
            GuardedDelete::Blocked(books) => {
                tracing::debug!("Author id={} not deleted: {} book(s) reference it", id, books);
                Ok(DeleteOutcome::Blocked(self.delete_view(id).await?))
            }
        }
    }
}
