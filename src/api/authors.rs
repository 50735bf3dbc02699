//! Author endpoints

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::{
    error::AppResult,
    models::{AuthorDetail, AuthorEntry, AuthorForm, CatalogRecord, EntityKind},
    AppState,
};

use super::{confirm_response, delete_response, see_other};

/// List all authors, by family name
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "Author list", body = Vec<AuthorEntry>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Json<Vec<AuthorEntry>>> {
    let authors = state.services.authors.list().await?;
    Ok(Json(authors))
}

/// Author details with their books
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorDetail),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorDetail>> {
    let detail = state.services.authors.detail(id).await?;
    Ok(Json(detail))
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses(
        (status = 200, description = "Author form", body = AuthorForm)
    )
)]
pub async fn create_author_form() -> Json<AuthorForm> {
    Json(AuthorForm::default())
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Created, redirect to the author"),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Response> {
    let author = state.services.authors.create(form).await?;
    Ok(see_other(&author.url()))
}

/// Current author values for editing
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author form", body = AuthorForm),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AuthorForm>> {
    let form = state.services.authors.update_form(id).await?;
    Ok(Json(form))
}

/// Update an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    request_body = AuthorForm,
    responses(
        (status = 303, description = "Updated, redirect to the author"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<AuthorForm>,
) -> AppResult<Response> {
    let author = state.services.authors.update(id, form).await?;
    Ok(see_other(&author.url()))
}

/// Delete confirmation: the author and the books that block deletion
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = AuthorDetail),
        (status = 303, description = "Author not found, redirect to the list")
    )
)]
pub async fn delete_author_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    confirm_response(EntityKind::Author, state.services.authors.delete_view(id).await)
}

/// Delete an author without books
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the author list"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Author still has books", body = AuthorDetail)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let outcome = state.services.authors.delete(id).await?;
    Ok(delete_response(EntityKind::Author, outcome))
}
