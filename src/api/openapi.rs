//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, listings, users, MessageResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Textbook Exchange API",
        version = "0.1.0",
        description = "Campus textbook listing marketplace REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::get_user_books,
        users::get_user_listings,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::get_book_listings,
        // Listings
        listings::list_listings,
        listings::get_listing,
        listings::create_listing,
        listings::update_listing,
        listings::delete_listing,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::UserOrder,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            users::UserList,
            // Books
            crate::models::book::Book,
            crate::models::book::BookOrder,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookList,
            books::BookCreated,
            // Listings
            crate::models::listing::Listing,
            crate::models::listing::ListingOrder,
            crate::models::listing::NewListing,
            crate::models::listing::UpdateListing,
            listings::ListingList,
            // Common
            health::HealthResponse,
            MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Students posting books"),
        (name = "books", description = "Textbook catalog"),
        (name = "listings", description = "Books offered for sale")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
