//! Genre catalog operations

use crate::{
    error::{AppError, AppResult},
    models::{DeleteOutcome, EntityKind, Genre, GenreDetail, GenreEntry, GenreForm},
    repository::{GuardedDelete, Repository},
};

use super::catalog::submit;

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<GenreEntry>> {
        let genres = self.repository.list::<Genre>().await?;
        Ok(genres.into_iter().map(GenreEntry::from).collect())
    }

    /// A genre with every book associated with it
    pub async fn detail(&self, id: i32) -> AppResult<GenreDetail> {
        let (genre, books) = tokio::try_join!(
            self.repository.find::<Genre>(id),
            self.repository.genres_get_books(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::not_found(EntityKind::Genre, id))?;

        Ok(GenreDetail {
            genre: genre.into(),
            books: books.into_iter().map(Into::into).collect(),
        })
    }

    /// Create a genre, or return the existing one with the same name
    pub async fn create(&self, form: GenreForm) -> AppResult<Genre> {
        let name = submit(form)?;
        let (genre, created) = self.repository.genres_find_or_create(&name).await?;
        if created {
            tracing::info!("Created genre id={} ({})", genre.id, genre.name);
        } else {
            tracing::debug!("Genre '{}' already exists as id={}", genre.name, genre.id);
        }
        Ok(genre)
    }

    pub async fn update_form(&self, id: i32) -> AppResult<GenreForm> {
        let genre = self.repository.get::<Genre>(id).await?;
        Ok(GenreForm::from(&genre))
    }

    pub async fn update(&self, id: i32, form: GenreForm) -> AppResult<Genre> {
        let name = submit(form)?;
        let genre = self.repository.genres_update(id, &name).await?;
        tracing::info!("Updated genre id={}", genre.id);
        Ok(genre)
    }

    pub async fn delete_view(&self, id: i32) -> AppResult<GenreDetail> {
        self.detail(id).await
    }

    /// Delete a genre no book is associated with
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<GenreDetail>> {
        match self.repository.delete_guarded(EntityKind::Genre, id).await? {
            GuardedDelete::Deleted => {
                tracing::info!("Deleted genre id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
            GuardedDelete::Blocked(books) => {
                tracing::debug!("Genre id={} not deleted: {} book(s) reference it", id, books);
                Ok(DeleteOutcome::Blocked(self.delete_view(id).await?))
            }
        }
    }
}
