//! `/api` route table.

use axum::Router;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use shelf_errors::ErrDef;

use super::auth::security_context;
use super::handlers::{authors, books, publishers, users};
use super::state::AppState;

async fn not_found() -> Response {
    ErrDef::NOT_FOUND.as_error().into_response()
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/authors", get(authors::index).post(authors::create))
        .route(
            "/authors/{id}",
            get(authors::show)
                .patch(authors::update)
                .put(authors::update)
                .delete(authors::destroy),
        )
        .route("/publishers", get(publishers::index).post(publishers::create))
        .route(
            "/publishers/{id}",
            get(publishers::show)
                .patch(publishers::update)
                .put(publishers::update)
                .delete(publishers::destroy),
        )
        .route("/users", get(users::index).post(users::create))
        .route(
            "/users/{id}",
            get(users::show)
                .patch(users::update)
                .put(users::update)
                .delete(users::destroy),
        )
        .route("/books", get(books::index).post(books::create))
        .route(
            "/books/{id}",
            get(books::show)
                .patch(books::update)
                .put(books::update)
                .delete(books::destroy),
        );

    Router::new()
        .nest("/api", api)
        .fallback(not_found)
        .layer(middleware::from_fn(security_context))
        .with_state(state)
}
