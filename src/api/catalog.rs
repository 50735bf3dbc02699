//! Catalog index

use axum::{extract::State, response::Redirect, Json};

use crate::{error::AppResult, models::CatalogCounts, AppState};

/// Site root, forwards to the catalog index
pub async fn home() -> Redirect {
    Redirect::to("/catalog")
}

/// Catalog index with record counts
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "Record counts", body = CatalogCounts)
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<CatalogCounts>> {
    let counts = state.services.catalog.counts().await?;
    Ok(Json(counts))
}
