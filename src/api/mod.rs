//! HTTP handlers for the catalog
//!
//! Views are JSON documents. Successful form submissions answer
//! `303 See Other` pointing at the entity (or, after a delete, the list);
//! a delete withheld because of dependents answers `409` with the same
//! document the delete confirmation shows.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppResult,
    models::{DeleteOutcome, EntityKind},
    AppState,
};

/// Build the application router with all routes
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/", get(catalog::home))
        .route("/catalog", get(catalog::index))
        // Authors
        .route("/catalog/authors", get(authors::list_authors))
        .route(
            "/catalog/author/create",
            get(authors::create_author_form).post(authors::create_author),
        )
        .route("/catalog/author/:id", get(authors::get_author))
        .route(
            "/catalog/author/:id/update",
            get(authors::update_author_form).post(authors::update_author),
        )
        .route(
            "/catalog/author/:id/delete",
            get(authors::delete_author_confirm).post(authors::delete_author),
        )
        // Genres
        .route("/catalog/genres", get(genres::list_genres))
        .route(
            "/catalog/genre/create",
            get(genres::create_genre_form).post(genres::create_genre),
        )
        .route("/catalog/genre/:id", get(genres::get_genre))
        .route(
            "/catalog/genre/:id/update",
            get(genres::update_genre_form).post(genres::update_genre),
        )
        .route(
            "/catalog/genre/:id/delete",
            get(genres::delete_genre_confirm).post(genres::delete_genre),
        )
        // Books
        .route("/catalog/books", get(books::list_books))
        .route(
            "/catalog/book/create",
            get(books::create_book_form).post(books::create_book),
        )
        .route("/catalog/book/:id", get(books::get_book))
        .route(
            "/catalog/book/:id/update",
            get(books::update_book_form).post(books::update_book),
        )
        .route(
            "/catalog/book/:id/delete",
            get(books::delete_book_confirm).post(books::delete_book),
        )
        // Book copies
        .route("/catalog/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/catalog/bookinstance/create",
            get(book_instances::create_book_instance_form)
                .post(book_instances::create_book_instance),
        )
        .route("/catalog/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instances::update_book_instance_form)
                .post(book_instances::update_book_instance),
        )
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instances::delete_book_instance_confirm)
                .post(book_instances::delete_book_instance),
        )
        // Health check
        .route("/api/v1/health", get(health::health_check))
        .route("/api/v1/ready", get(health::readiness_check))
        .with_state(state);

    Router::new()
        .merge(catalog)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}

/// Post/redirect/get: send the requester to `location`
fn see_other(location: &str) -> Response {
    Redirect::to(location).into_response()
}

/// Delete confirmation: the view, or back to the list when the row is gone
fn confirm_response<V: Serialize>(kind: EntityKind, view: AppResult<V>) -> AppResult<Response> {
    match view {
        Ok(view) => Ok(Json(view).into_response()),
        Err(e) if e.is_not_found() => Ok(see_other(&kind.list_path())),
        Err(e) => Err(e),
    }
}

fn delete_response<V: Serialize>(kind: EntityKind, outcome: DeleteOutcome<V>) -> Response {
    match outcome {
        DeleteOutcome::Deleted => see_other(&kind.list_path()),
        DeleteOutcome::Blocked(view) => (StatusCode::CONFLICT, Json(view)).into_response(),
    }
}
