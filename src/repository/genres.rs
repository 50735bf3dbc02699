//! Genre domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{Book, CatalogRecord, EntityKind, Genre},
};

impl Repository {
    /// Return the genre with exactly this name, creating it when none exists.
    /// The flag is true when a row was inserted.
    pub async fn genres_find_or_create(&self, name: &str) -> AppResult<(Genre, bool)> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent find-or-create calls for the same name
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        let query = format!("{} WHERE genres.name = $1 ORDER BY genres.id LIMIT 1", Genre::SELECT);
        let existing = sqlx::query_as::<_, Genre>(&query)
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;

        let result = match existing {
            Some(genre) => (genre, false),
            None => {
                let genre = sqlx::query_as::<_, Genre>(
                    "INSERT INTO genres (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
                )
                .bind(name)
                .fetch_one(&mut *tx)
                .await?;
                (genre, true)
            }
        };

        tx.commit().await?;
        Ok(result)
    }

    pub async fn genres_update(&self, id: i32, name: &str) -> AppResult<Genre> {
        sqlx::query_as::<_, Genre>(
            r#"
            UPDATE genres SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(EntityKind::Genre, id))
    }

    /// Books associated with a genre, by title
    pub async fn genres_get_books(&self, genre_id: i32) -> AppResult<Vec<Book>> {
        let query = format!(
            "{} JOIN book_genres bg ON bg.book_id = books.id \
             WHERE bg.genre_id = $1 ORDER BY books.title, books.id",
            Book::SELECT
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(genre_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Genres associated with a book, by name
    pub async fn genres_for_book(&self, book_id: i32) -> AppResult<Vec<Genre>> {
        let query = format!(
            "{} JOIN book_genres bg ON bg.genre_id = genres.id \
             WHERE bg.book_id = $1 ORDER BY genres.name, genres.id",
            Genre::SELECT
        );
        let rows = sqlx::query_as::<_, Genre>(&query)
            .bind(book_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
