//! Book domain methods on Repository

use std::collections::BTreeSet;

use sqlx::{Postgres, Transaction};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{book::BookInput, Book, BookInstance, CatalogRecord, EntityKind},
};

const BOOK_COLUMNS: &str = "id, title, summary, isbn, author_id, created_at, updated_at";

impl Repository {
    /// Create a book together with its genre associations
    pub async fn books_create(&self, data: &BookInput) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, summary, isbn, author_id) VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOK_COLUMNS
        ))
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.author_id)
        .fetch_one(&mut *tx)
        .await?;

        insert_genres(&mut tx, book.id, &data.genres).await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Overwrite every mutable field of a book.
    ///
    /// A non-empty genre set replaces the book's associations; an empty one
    /// leaves them untouched.
    pub async fn books_update(&self, id: i32, data: &BookInput) -> AppResult<Book> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $2, summary = $3, isbn = $4, author_id = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&data.summary)
        .bind(&data.isbn)
        .bind(data.author_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(EntityKind::Book, id))?;

        if !data.genres.is_empty() {
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_genres(&mut tx, id, &data.genres).await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// Copies of a book, by imprint
    pub async fn books_get_instances(&self, book_id: i32) -> AppResult<Vec<BookInstance>> {
        let query = format!(
            "{} WHERE book_instances.book_id = $1 ORDER BY book_instances.imprint, book_instances.id",
            BookInstance::SELECT
        );
        let rows = sqlx::query_as::<_, BookInstance>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

async fn insert_genres(
    tx: &mut Transaction<'_, Postgres>,
    book_id: i32,
    genres: &BTreeSet<i32>,
) -> AppResult<()> {
    if genres.is_empty() {
        return Ok(());
    }
    let ids: Vec<i32> = genres.iter().copied().collect();
    sqlx::query(
        r#"
        INSERT INTO book_genres (book_id, genre_id)
        SELECT $1, genre_id FROM UNNEST($2::int4[]) AS genre_id
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(book_id)
    .bind(ids)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
