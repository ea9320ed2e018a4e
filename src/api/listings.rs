//! Listing endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::listing::{Listing, ListingOrder, ListingQuery, NewListing, UpdateListing},
};

use super::{
    extract::{ApiPath, ApiQuery, ValidatedJson},
    MessageResponse,
};

#[derive(Serialize, ToSchema)]
pub struct ListingList {
    pub listings: Vec<Listing>,
}

/// List listings, optionally filtered and sorted
#[utoipa::path(
    get,
    path = "/listings",
    tag = "listings",
    params(
        ("isbn" = Option<i64>, Query, description = "ISBN of the listed book"),
        ("owner_token" = Option<String>, Query, description = "Owner token"),
        ("status" = Option<String>, Query, description = "Listing status"),
        ("condition" = Option<String>, Query, description = "Book condition"),
        ("order_by" = Option<ListingOrder>, Query, description = "Sort column")
    ),
    responses(
        (status = 200, description = "Listings", body = ListingList)
    )
)]
pub async fn list_listings(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<ListingQuery>,
) -> AppResult<Json<ListingList>> {
    let listings = state.services.listings.list(&query).await?;
    Ok(Json(ListingList { listings }))
}

/// Get a listing by id
#[utoipa::path(
    get,
    path = "/listing/{listing_id}",
    tag = "listings",
    params(("listing_id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing", body = Listing),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_listing(
    State(state): State<crate::AppState>,
    ApiPath(listing_id): ApiPath<i32>,
) -> AppResult<Json<Listing>> {
    let listing = state.services.listings.get_by_id(listing_id).await?;
    Ok(Json(listing))
}

/// Offer a book for sale
///
/// The body may name the owner as `google_tok` instead of `owner_token`.
/// The `isbn` in the body must match the one in the path.
#[utoipa::path(
    post,
    path = "/listing/{isbn}",
    tag = "listings",
    params(("isbn" = i64, Path, description = "ISBN of the listed book")),
    request_body = NewListing,
    responses(
        (status = 201, description = "Listing created", body = Listing),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 500, description = "Unknown book or owner", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_listing(
    State(state): State<crate::AppState>,
    ApiPath(isbn): ApiPath<i64>,
    ValidatedJson(data): ValidatedJson<NewListing>,
) -> AppResult<(StatusCode, Json<Listing>)> {
    if data.isbn != isbn {
        return Err(AppError::Validation(format!(
            "Field `isbn` ({}) does not match the isbn in the path ({})",
            data.isbn, isbn
        )));
    }

    let listing = state.services.listings.create(data).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Change the condition, price or status of a listing
#[utoipa::path(
    put,
    path = "/listing/{listing_id}",
    tag = "listings",
    params(("listing_id" = i32, Path, description = "Listing ID")),
    request_body = UpdateListing,
    responses(
        (status = 200, description = "Listing updated", body = Listing),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_listing(
    State(state): State<crate::AppState>,
    ApiPath(listing_id): ApiPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateListing>,
) -> AppResult<Json<Listing>> {
    let listing = state.services.listings.update(listing_id, data).await?;
    Ok(Json(listing))
}

/// Delete a listing
#[utoipa::path(
    delete,
    path = "/listing/{listing_id}",
    tag = "listings",
    params(("listing_id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing deleted", body = MessageResponse),
        (status = 404, description = "Listing not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_listing(
    State(state): State<crate::AppState>,
    ApiPath(listing_id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.listings.delete(listing_id).await?;
    Ok(Json(MessageResponse::new("Listing deleted")))
}
