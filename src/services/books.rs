//! Book catalog operations

use std::collections::BTreeSet;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookFormData, Author, Book, BookDetail, BookForm, BookListEntry, BookSummary,
        DeleteOutcome, EntityKind, Genre,
    },
    repository::{GuardedDelete, Repository},
};

use super::catalog::submit;

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books by title, each with its author's name
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let books = self.repository.list::<BookSummary>().await?;
        Ok(books.into_iter().map(BookListEntry::from).collect())
    }

    /// A book with its author, genres and copies
    pub async fn detail(&self, id: i32) -> AppResult<BookDetail> {
        let (book, instances) = tokio::try_join!(
            self.repository.find::<Book>(id),
            self.repository.books_get_instances(id),
        )?;
        let book = book.ok_or_else(|| AppError::not_found(EntityKind::Book, id))?;

        let (author, genres) = tokio::try_join!(
            self.repository.get::<Author>(book.author_id),
            self.repository.genres_for_book(id),
        )?;

        Ok(BookDetail {
            book: book.into(),
            author: author.into(),
            genres: genres.into_iter().map(Into::into).collect(),
            instances: instances.into_iter().map(Into::into).collect(),
        })
    }

    /// Authors and genres to choose from
    pub async fn create_form(&self) -> AppResult<BookFormData> {
        let (authors, genres) = tokio::try_join!(
            self.repository.list::<Author>(),
            self.repository.list::<Genre>(),
        )?;
        Ok(BookFormData::new(
            None,
            authors.into_iter().map(Into::into).collect(),
            genres,
            &BTreeSet::new(),
        ))
    }

    /// Create a book and associate the submitted genres
    pub async fn create(&self, form: BookForm) -> AppResult<Book> {
        let input = submit(form)?;
        let book = self.repository.books_create(&input).await?;
        tracing::info!(
            "Created book id={} with {} genre(s)",
            book.id,
            input.genres.len()
        );
        Ok(book)
    }

    /// Current values plus every author and genre, with the book's genres checked
    pub async fn update_form(&self, id: i32) -> AppResult<BookFormData> {
        let (book, authors, genres, selected) = tokio::try_join!(
            self.repository.find::<Book>(id),
            self.repository.list::<Author>(),
            self.repository.list::<Genre>(),
            self.repository.genres_for_book(id),
        )?;
        let book = book.ok_or_else(|| AppError::not_found(EntityKind::Book, id))?;

        let form = BookForm::from_book(&book, &selected);
        let checked = form.genre.iter().copied().collect();
        Ok(BookFormData::new(
            Some(form),
            authors.into_iter().map(Into::into).collect(),
            genres,
            &checked,
        ))
    }

    /// Overwrite a book. Genres are replaced only when some are submitted.
    pub async fn update(&self, id: i32, form: BookForm) -> AppResult<Book> {
        let input = submit(form)?;
        let book = self.repository.books_update(id, &input).await?;
        if input.genres.is_empty() {
            tracing::info!("Updated book id={}, genres unchanged", book.id);
        } else {
            tracing::info!(
                "Updated book id={}, genres replaced with {} genre(s)",
                book.id,
                input.genres.len()
            );
        }
        Ok(book)
    }

    pub async fn delete_view(&self, id: i32) -> AppResult<BookDetail> {
        self.detail(id).await
    }

    /// Delete a book that has no copies
    pub async fn delete(&self, id: i32) -> AppResult<DeleteOutcome<BookDetail>> {
        match self.repository.delete_guarded(EntityKind::Book, id).await? {
            GuardedDelete::Deleted => {
                tracing::info!("Deleted book id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
            GuardedDelete::Blocked(copies) => {
                tracing::debug!("Book id={} not deleted: {} copy(ies) reference it", id, copies);
                Ok(DeleteOutcome::Blocked(self.delete_view(id).await?))
            }
        }
    }
}
