//! Integration tests
//!
//! Tests that need PostgreSQL are `#[ignore]`d; run them with a
//! `DATABASE_URL` pointing at a server where a scratch database may be
//! created: `cargo test -- --ignored`.

mod api_tests;
mod catalog_tests;
mod common;
