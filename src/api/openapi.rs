//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, catalog, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "0.1.0",
        description = "Local library catalog: authors, genres, books and book copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        catalog::index,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::update_author_form,
        authors::update_author,
        authors::delete_author_confirm,
        authors::delete_author,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre_form,
        genres::create_genre,
        genres::update_genre_form,
        genres::update_genre,
        genres::delete_genre_confirm,
        genres::delete_genre,
        // Books
        books::list_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::update_book_form,
        books::update_book,
        books::delete_book_confirm,
        books::delete_book,
        // Book copies
        book_instances::list_book_instances,
        book_instances::get_book_instance,
        book_instances::create_book_instance_form,
        book_instances::create_book_instance,
        book_instances::update_book_instance_form,
        book_instances::update_book_instance,
        book_instances::delete_book_instance_confirm,
        book_instances::delete_book_instance,
    ),
    components(
        schemas(
            crate::models::EntityKind,
            crate::models::CatalogCounts,
            crate::models::FieldError,
            crate::models::FieldErrors,
            // Authors
            crate::models::Author,
            crate::models::AuthorEntry,
            crate::models::AuthorDetail,
            crate::models::AuthorForm,
            // Genres
            crate::models::Genre,
            crate::models::GenreEntry,
            crate::models::GenreDetail,
            crate::models::GenreForm,
            // Books
            crate::models::Book,
            crate::models::BookEntry,
            crate::models::BookListEntry,
            crate::models::BookDetail,
            crate::models::BookForm,
            crate::models::book::GenreOption,
            crate::models::book::BookFormData,
            // Book copies
            crate::models::BookInstanceStatus,
            crate::models::BookInstance,
            crate::models::BookInstanceEntry,
            crate::models::BookInstanceListEntry,
            crate::models::BookInstanceDetail,
            crate::models::BookInstanceForm,
            crate::models::book_instance::BookInstanceFormData,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "catalog", description = "Catalog index"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management"),
        (name = "books", description = "Book management"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
