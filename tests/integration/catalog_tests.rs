//! Catalog operations against a real database

use std::collections::BTreeSet;

use axum::{http::StatusCode, response::IntoResponse};
use library_catalog::{
    models::{BookInstanceStatus, CatalogRecord, DeleteOutcome},
    AppError,
};
use sqlx::PgPool;

use crate::common::{author_form, book_form, copy_form, genre_form, services};

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_invalid_author_persists_nothing(pool: PgPool) {
    let services = services(pool);

    let mut form = author_form("J0hn!", "  ");
    form.date_of_birth = Some("not a date".to_string());
    let err = services.authors.create(form).await.unwrap_err();

    match err {
        AppError::Validation { errors, input } => {
            assert!(errors.has_field("first_name"));
            assert!(errors.has_field("family_name"));
            assert_eq!(
                errors.messages_for("date_of_birth").collect::<Vec<_>>(),
                vec!["Invalid date of birth"]
            );
            // sanitized input is echoed back
            assert_eq!(input["family_name"], "");
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(services.authors.list().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_short_genre_name_persists_nothing(pool: PgPool) {
    let services = services(pool);

    let err = services.genres.create(genre_form("  ab ")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert!(services.genres.list().await.unwrap().is_empty());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_genre_create_reuses_existing_name(pool: PgPool) {
    let services = services(pool);

    let first = services.genres.create(genre_form("Fantasy")).await.unwrap();
    let second = services.genres.create(genre_form(" Fantasy ")).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(services.genres.list().await.unwrap().len(), 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_author_delete_guarded_by_books(pool: PgPool) {
    let services = services(pool);

    let author = services.authors.create(author_form("Ursula", "LeGuin")).await.unwrap();
    let book = services
        .books
        .create(book_form("The Dispossessed", author.id, &[]))
        .await
        .unwrap();

    let view = services.authors.delete_view(author.id).await.unwrap();
    match services.authors.delete(author.id).await.unwrap() {
        DeleteOutcome::Blocked(blocked) => {
            let ids: Vec<_> = blocked.books.iter().map(|b| b.book.id).collect();
            assert_eq!(ids, vec![book.id]);
            assert_eq!(
                ids,
                view.books.iter().map(|b| b.book.id).collect::<Vec<_>>()
            );
        }
        DeleteOutcome::Deleted => panic!("author with books was deleted"),
    }
    assert!(services.authors.detail(author.id).await.is_ok());

    assert!(services.books.delete(book.id).await.unwrap().is_deleted());
    assert!(services.authors.delete(author.id).await.unwrap().is_deleted());
    assert!(services
        .authors
        .detail(author.id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_genre_and_book_delete_guards(pool: PgPool) {
    let services = services(pool);

    let author = services.authors.create(author_form("Iain", "Banks")).await.unwrap();
    let genre = services.genres.create(genre_form("Science Fiction")).await.unwrap();
    let book = services
        .books
        .create(book_form("Excession", author.id, &[genre.id]))
        .await
        .unwrap();
    let copy = services
        .book_instances
        .create(copy_form(book.id, "Orbit, 1996."))
        .await
        .unwrap();

    assert!(!services.genres.delete(genre.id).await.unwrap().is_deleted());
    match services.books.delete(book.id).await.unwrap() {
        DeleteOutcome::Blocked(view) => {
            assert_eq!(view.instances.len(), 1);
            assert_eq!(view.instances[0].instance.id, copy.id);
        }
        DeleteOutcome::Deleted => panic!("book with copies was deleted"),
    }

    services.book_instances.delete(copy.id).await.unwrap();
    assert!(services.books.delete(book.id).await.unwrap().is_deleted());
    // the book's genre links went with it
    assert!(services.genres.delete(genre.id).await.unwrap().is_deleted());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_genres_are_a_set(pool: PgPool) {
    let services = services(pool);

    let author = services.authors.create(author_form("Jorge", "Borges")).await.unwrap();
    let a = services.genres.create(genre_form("Fantasy")).await.unwrap();
    let b = services.genres.create(genre_form("Short Stories")).await.unwrap();
    let c = services.genres.create(genre_form("Poetry")).await.unwrap();

    let book = services
        .books
        .create(book_form("Ficciones", author.id, &[a.id, b.id, a.id]))
        .await
        .unwrap();

    let genre_ids = |detail: library_catalog::models::BookDetail| -> BTreeSet<i32> {
        detail.genres.iter().map(|g| g.genre.id).collect()
    };

    let detail = services.books.detail(book.id).await.unwrap();
    assert_eq!(detail.genres.len(), 2);
    assert_eq!(genre_ids(detail), BTreeSet::from([a.id, b.id]));

    // no genres submitted: associations untouched
    services
        .books
        .update(book.id, book_form("Ficciones", author.id, &[]))
        .await
        .unwrap();
    let detail = services.books.detail(book.id).await.unwrap();
    assert_eq!(genre_ids(detail), BTreeSet::from([a.id, b.id]));

    services
        .books
        .update(book.id, book_form("Ficciones", author.id, &[c.id]))
        .await
        .unwrap();
    let detail = services.books.detail(book.id).await.unwrap();
    assert_eq!(genre_ids(detail), BTreeSet::from([c.id]));

    let form = services.books.update_form(book.id).await.unwrap();
    let checked: Vec<_> = form
        .genres
        .iter()
        .filter(|g| g.checked)
        .map(|g| g.genre.genre.id)
        .collect();
    assert_eq!(checked, vec![c.id]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_missing_ids_are_not_found(pool: PgPool) {
    let services = services(pool);

    assert!(services.authors.detail(999).await.unwrap_err().is_not_found());
    assert!(services.genres.detail(999).await.unwrap_err().is_not_found());
    assert!(services.books.detail(999).await.unwrap_err().is_not_found());
    assert!(services
        .book_instances
        .detail(999)
        .await
        .unwrap_err()
        .is_not_found());

    assert!(services
        .authors
        .update(999, author_form("Ann", "Leckie"))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(services.genres.delete(999).await.unwrap_err().is_not_found());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_lists_are_ordered(pool: PgPool) {
    let services = services(pool);

    for family in ["Zelazny", "Atwood", "Moorcock"] {
        services.authors.create(author_form("X", family)).await.unwrap();
    }
    let names: Vec<_> = services
        .authors
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.author.family_name)
        .collect();
    assert_eq!(names, vec!["Atwood", "Moorcock", "Zelazny"]);

    for name in ["Horror", "Crime", "Satire"] {
        services.genres.create(genre_form(name)).await.unwrap();
    }
    let names: Vec<_> = services
        .genres
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.genre.name)
        .collect();
    assert_eq!(names, vec!["Crime", "Horror", "Satire"]);

    let author = services.authors.list().await.unwrap()[0].author.id;
    let mut book_ids = Vec::new();
    for title in ["Ubik", "Babel-17", "Nova"] {
        let book = services
            .books
            .create(book_form(title, author, &[]))
            .await
            .unwrap();
        book_ids.push(book.id);
    }
    let titles: Vec<_> = services
        .books
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.book.book.title)
        .collect();
    assert_eq!(titles, vec!["Babel-17", "Nova", "Ubik"]);

    let imprints = ["Zenith, 1970.", "Ace, 1966.", "Mayflower, 1969."];
    for (book_id, imprint) in book_ids.iter().zip(imprints) {
        services
            .book_instances
            .create(copy_form(*book_id, imprint))
            .await
            .unwrap();
    }
    let imprints: Vec<_> = services
        .book_instances
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.instance.instance.imprint)
        .collect();
    assert_eq!(imprints, vec!["Ace, 1966.", "Mayflower, 1969.", "Zenith, 1970."]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_invalid_author_update_leaves_row_unchanged(pool: PgPool) {
    let services = services(pool);

    let author = services.authors.create(author_form("Samuel", "Delany")).await.unwrap();

    let err = services
        .authors
        .update(author.id, author_form("", "Delany"))
        .await
        .unwrap_err();
    match err {
        AppError::Validation { errors, .. } => assert!(errors.has_field("first_name")),
        other => panic!("expected validation error, got {:?}", other),
    }

    let err = services
        .authors
        .update(author.id, author_form("Samuel", &"D".repeat(101)))
        .await
        .unwrap_err();
    match err {
        AppError::Validation { errors, .. } => assert_eq!(
            errors.messages_for("family_name").collect::<Vec<_>>(),
            vec!["Family name must be at most 100 characters."]
        ),
        other => panic!("expected validation error, got {:?}", other),
    }

    let detail = services.authors.detail(author.id).await.unwrap();
    assert_eq!(detail.author.author, author);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_long_book_and_copy_text_is_stored(pool: PgPool) {
    let services = services(pool);

    let author = services.authors.create(author_form("Anon", "Ymous")).await.unwrap();
    let title = "T".repeat(300);
    let mut form = book_form(&title, author.id, &[]);
    form.isbn = "9".repeat(300);
    let book = services.books.create(form).await.unwrap();
    assert_eq!(book.title, title);

    let imprint = "I".repeat(300);
    let copy = services
        .book_instances
        .create(copy_form(book.id, &imprint))
        .await
        .unwrap();

    let detail = services.book_instances.detail(copy.id).await.unwrap();
    assert_eq!(detail.instance.instance.imprint, imprint);
    assert_eq!(detail.book.book.title.chars().count(), 300);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_copy_defaults_and_date_validation(pool: PgPool) {
    let services = services(pool);

    let author = services.authors.create(author_form("Mary", "Shelley")).await.unwrap();
    let book = services
        .books
        .create(book_form("Frankenstein", author.id, &[]))
        .await
        .unwrap();

    let copy = services
        .book_instances
        .create(copy_form(book.id, "Lackington, 1818."))
        .await
        .unwrap();
    assert_eq!(copy.status, BookInstanceStatus::Maintenance);
    assert_eq!(copy.due_back, copy.created_at);

    let mut form = copy_form(book.id, "Colburn, 1831.");
    form.due_back = Some("yesterday".to_string());
    let err = services.book_instances.create(form).await.unwrap_err();
    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(services.book_instances.list().await.unwrap().len(), 1);

    let mut form = copy_form(book.id, "Lackington, 1818.");
    form.status = Some("Available".to_string());
    form.due_back = Some("2026-12-01".to_string());
    let updated = services.book_instances.update(copy.id, form).await.unwrap();
    assert_eq!(updated.status, BookInstanceStatus::Available);
    assert_eq!(updated.due_back_yyyy_mm_dd(), "2026-12-01");
    assert_eq!(updated.url(), format!("/catalog/bookinstance/{}", copy.id));

    let counts = services.catalog.counts().await.unwrap();
    assert_eq!(counts.book_count, 1);
    assert_eq!(counts.book_instance_count, 1);
    assert_eq!(counts.book_instance_available_count, 1);
    assert_eq!(counts.author_count, 1);
    assert_eq!(counts.genre_count, 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_book_with_unknown_author_is_conflict(pool: PgPool) {
    let services = services(pool);

    let err = services
        .books
        .create(book_form("Orphan", 4242, &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    assert!(services.books.list().await.unwrap().is_empty());
}
