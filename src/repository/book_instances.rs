//! Book instance (copy) domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{book_instance::BookInstanceInput, BookInstance, BookInstanceStatus, EntityKind},
};

const INSTANCE_COLUMNS: &str = "id, book_id, imprint, status, due_back, created_at, updated_at";

impl Repository {
    /// Create a copy. A missing due date is stamped with the insert time.
    pub async fn book_instances_create(&self, data: &BookInstanceInput) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, BookInstance>(&format!(
            r#"
            INSERT INTO book_instances (book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, COALESCE($4, NOW()))
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status)
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Overwrite every mutable field of a copy
    pub async fn book_instances_update(
        &self,
        id: i32,
        data: &BookInstanceInput,
    ) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>(&format!(
            r#"
            UPDATE book_instances
            SET book_id = $2, imprint = $3, status = $4, due_back = COALESCE($5, NOW()),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            INSTANCE_COLUMNS
        ))
        .bind(id)
        .bind(data.book_id)
        .bind(&data.imprint)
        .bind(data.status)
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(EntityKind::BookInstance, id))
    }

    pub async fn book_instances_count_with_status(
        &self,
        status: BookInstanceStatus,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
