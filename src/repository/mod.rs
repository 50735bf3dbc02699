//! Repository layer for database operations
//!
//! `Repository` is the persistence context: it owns the connection pool,
//! is built once at startup and handed to every service. Operations that
//! are the same for every entity kind (list, get, count, guarded delete)
//! live here and are driven by the kind descriptors; writes with
//! kind-specific columns live in the per-kind modules.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogRecord, EntityKind},
};

/// What a guarded delete did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedDelete {
    Deleted,
    /// Nothing was deleted; this many dependent rows reference the target
    Blocked(i64),
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Round trip to the database, for readiness probes
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Every row of a kind, ascending by the kind's display column
    pub async fn list<R: CatalogRecord>(&self) -> AppResult<Vec<R>> {
        let kind = R::KIND;
        let query = format!(
            "{} ORDER BY {table}.{column} ASC, {table}.id ASC",
            R::SELECT,
            table = kind.table(),
            column = kind.order_column(),
        );
        let rows = sqlx::query_as::<_, R>(&query).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn find<R: CatalogRecord>(&self, id: i32) -> AppResult<Option<R>> {
        let query = format!("{} WHERE {}.id = $1", R::SELECT, R::KIND.table());
        let row = sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Like `find`, failing with `NotFound` when the id does not resolve
    pub async fn get<R: CatalogRecord>(&self, id: i32) -> AppResult<R> {
        self.find::<R>(id)
            .await?
            .ok_or_else(|| AppError::not_found(R::KIND, id))
    }

    pub async fn count(&self, kind: EntityKind) -> AppResult<i64> {
        let query = format!("SELECT COUNT(*) FROM {}", kind.table());
        let count: i64 = sqlx::query_scalar(&query).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Delete a row unless dependent rows reference it.
    ///
    /// The target row is locked `FOR UPDATE` before dependents are counted,
    /// so a dependent inserted concurrently either commits before the count
    /// or waits until the delete has committed (and then fails its foreign
    /// key check).
    pub async fn delete_guarded(&self, kind: EntityKind, id: i32) -> AppResult<GuardedDelete> {
        let mut tx = self.pool.begin().await?;

        let lock = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", kind.table());
        let locked: Option<i32> = sqlx::query_scalar(&lock)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(AppError::not_found(kind, id));
        }

        if let Some(dependents) = kind.dependents() {
            let count_query = format!(
                "SELECT COUNT(*) FROM {} WHERE {} = $1",
                dependents.table, dependents.column
            );
            let count: i64 = sqlx::query_scalar(&count_query)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
            if count > 0 {
                tx.rollback().await?;
                return Ok(GuardedDelete::Blocked(count));
            }
        }

        let delete = format!("DELETE FROM {} WHERE id = $1", kind.table());
        sqlx::query(&delete).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(GuardedDelete::Deleted)
    }
}
