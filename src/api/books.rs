//! Book endpoints

use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::{
    error::AppResult,
    models::{book::BookFormData, BookDetail, BookForm, BookListEntry, CatalogRecord, EntityKind},
    AppState,
};

use super::{confirm_response, delete_response, see_other};

/// List all books, by title
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "Book list", body = Vec<BookListEntry>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookListEntry>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Book details with author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDetail),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let detail = state.services.books.detail(id).await?;
    Ok(Json(detail))
}

/// Authors and genres for a new book
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses(
        (status = 200, description = "Book form data", body = BookFormData)
    )
)]
pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Json<BookFormData>> {
    let data = state.services.books.create_form().await?;
    Ok(Json(data))
}

/// Create a book with its genres
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body = BookForm,
    responses(
        (status = 303, description = "Created, redirect to the book"),
        (status = 409, description = "Unknown author or genre", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    let book = state.services.books.create(form).await?;
    Ok(see_other(&book.url()))
}

/// Current book values with every author and genre
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book form data", body = BookFormData),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookFormData>> {
    let data = state.services.books.update_form(id).await?;
    Ok(Json(data))
}

/// Update a book. An empty genre list keeps the current genres.
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookForm,
    responses(
        (status = 303, description = "Updated, redirect to the book"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Unknown author or genre", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(form): Json<BookForm>,
) -> AppResult<Response> {
    let book = state.services.books.update(id, form).await?;
    Ok(see_other(&book.url()))
}

#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Delete confirmation", body = BookDetail),
        (status = 303, description = "Book not found, redirect to the list")
    )
)]
pub async fn delete_book_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    confirm_response(EntityKind::Book, state.services.books.delete_view(id).await)
}

/// Delete a book without copies
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 303, description = "Deleted, redirect to the book list"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book still has copies", body = BookDetail)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Response> {
    let outcome = state.services.books.delete(id).await?;
    Ok(delete_response(EntityKind::Book, outcome))
}
