//! Author domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{author::AuthorInput, Author, Book, CatalogRecord, EntityKind},
};

impl Repository {
    /// Create an author
    pub async fn authors_create(&self, data: &AuthorInput) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, family_name, date_of_birth, date_of_death, created_at, updated_at
            "#,
        )
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite every mutable field of an author
    pub async fn authors_update(&self, id: i32, data: &AuthorInput) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, family_name, date_of_birth, date_of_death, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.first_name)
        .bind(&data.family_name)
        .bind(data.date_of_birth)
        .bind(data.date_of_death)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(EntityKind::Author, id))
    }

    /// Books written by an author, by title
    pub async fn authors_get_books(&self, author_id: i32) -> AppResult<Vec<Book>> {
        let query = format!(
            "{} WHERE books.author_id = $1 ORDER BY books.title, books.id",
            Book::SELECT
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
