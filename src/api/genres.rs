//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::{
    error::AppResult,
    models::{CatalogRecord, EntityKind, GenreDetail, GenreEntry, GenreForm},
    AppState,
};

use super::{confirm_response, delete_response, see_other};

/// List all genres, by name
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "Genre list", body = Vec<GenreEntry>)
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<GenreEntry>>> {
    let genres = state.services.genres.list().await?;
    Ok(Json(genres))
}

/// Genre details with its books
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre details", body = GenreDetail),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GenreDetail>> {
    let detail = state.services.genres.detail(id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses(
        (status = 200, description = "Genre form", body = GenreForm)
    )
)]
pub async fn create_genre_form() -> Json<GenreForm> {
    Json(GenreForm::default())
}

/// Create a genre, or redirect to the existing genre of the same name
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body = GenreForm,
    responses(
        (status = 303, description = "Redirect to the genre"),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(form): Json<GenreForm>,
) -> AppResult<Response> {
    let genre = state.services.genres.create(form).await?;
    Ok(see_other(&genre.url()))
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Genre form", body = GenreForm),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<GenreForm>> {
    let form = state.services.genres.update_form(id).await?;
    Ok(Json(form))
}

#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    request_body = GenreForm,
    responses(
        (status = 303, description = "Updated, redirect to the genre"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<GenreForm>,
) -> AppResult<Response> {
    let genre = state.services.genres.update(id, form).await?;
    Ok(see_other(&genre.url()))
}

#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = GenreDetail),
        (status = 303, description = "Genre not found, redirect to the list")
    )
)]
pub async fn delete_genre_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    confirm_response(EntityKind::Genre, state.services.genres.delete_view(id).await)
}

/// Delete a genre no book belongs to
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = i32, Path, description = "Genre ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the genre list"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Genre still has books", body = GenreDetail)
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let outcome = state.services.genres.delete(id).await?;
    Ok(delete_response(EntityKind::Genre, outcome))
}
