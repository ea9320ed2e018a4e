//! API handlers for the textbook exchange REST endpoints

pub mod books;
pub mod extract;
pub mod health;
pub mod listings;
pub mod openapi;
pub mod users;

use axum::{routing::get, Router};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Confirmation body for commands without a resource to return
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let resources = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Users
        .route("/users", get(users::list_users))
        .route(
            "/user/:id",
            get(users::get_user)
                .post(users::create_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/user/:id/books", get(users::get_user_books))
        .route("/user/:id/listings", get(users::get_user_listings))
        // Books
        .route("/books", get(books::list_books))
        .route(
            "/book/:isbn",
            get(books::get_book)
                .post(books::create_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/book/:isbn/listings", get(books::get_book_listings))
        // Listings: POST takes the book's isbn, the other methods a listing id
        .route("/listings", get(listings::list_listings))
        .route(
            "/listing/:id",
            get(listings::get_listing)
                .post(listings::create_listing)
                .put(listings::update_listing)
                .delete(listings::delete_listing),
        )
        .with_state(state);

    Router::new()
        .merge(resources)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
