//! Book copy endpoints

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book_instance::BookInstanceFormData, BookInstanceDetail, BookInstanceForm,
        BookInstanceListEntry, CatalogRecord, EntityKind,
    },
    AppState,
};

use super::{confirm_response, see_other};

/// List all copies, by imprint
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy list", body = Vec<BookInstanceListEntry>)
    )
)]
pub async fn list_book_instances(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BookInstanceListEntry>>> {
    let instances = state.services.book_instances.list().await?;
    Ok(Json(instances))
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy details", body = BookInstanceDetail),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookInstanceDetail>> {
    let detail = state.services.book_instances.detail(id).await?;
    Ok(Json(detail))
}

/// Books a new copy can belong to
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "Copy form data", body = BookInstanceFormData)
    )
)]
pub async fn create_book_instance_form(
    State(state): State<AppState>,
) -> AppResult<Json<BookInstanceFormData>> {
    let data = state.services.book_instances.create_form().await?;
    Ok(Json(data))
}

/// Create a copy. Status defaults to Maintenance and due date to now.
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body = BookInstanceForm,
    responses(
        (status = 303, description = "Created, redirect to the copy"),
        (status = 409, description = "Unknown book", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    Json(form): Json<BookInstanceForm>,
) -> AppResult<Response> {
    let instance = state.services.book_instances.create(form).await?;
    Ok(see_other(&instance.url()))
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Copy form data", body = BookInstanceFormData),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookInstanceFormData>> {
    let data = state.services.book_instances.update_form(id).await?;
    Ok(Json(data))
}

#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    request_body = BookInstanceForm,
    responses(
        (status = 303, description = "Updated, redirect to the copy"),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Unknown book", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<BookInstanceForm>,
) -> AppResult<Response> {
    let instance = state.services.book_instances.update(id, form).await?;
    Ok(see_other(&instance.url()))
}

#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = BookInstanceDetail),
        (status = 303, description = "Copy not found, redirect to the list")
    )
)]
pub async fn delete_book_instance_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    confirm_response(
        EntityKind::BookInstance,
        state.services.book_instances.delete_view(id).await,
    )
}

/// Delete a copy. Nothing references copies, so this never blocks.
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = i32, Path, description = "Copy ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the copy list"),
        (status = 404, description = "Copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    state.services.book_instances.delete(id).await?;
    Ok(see_other(&EntityKind::BookInstance.list_path()))
}
