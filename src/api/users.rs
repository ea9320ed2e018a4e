//! User endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::user::{CreateUser, UpdateUser, User, UserOrder, UserQuery},
};

use super::{
    books::BookList,
    extract::{ApiPath, ApiQuery, ValidatedJson},
    listings::ListingList,
    MessageResponse,
};

#[derive(Serialize, ToSchema)]
pub struct UserList {
    pub users: Vec<User>,
}

/// List users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    params(
        ("full_name" = Option<String>, Query, description = "Exact full name"),
        ("class_year" = Option<i16>, Query, description = "Class year (0-4)"),
        ("token" = Option<String>, Query, description = "Owner token"),
        ("order_by" = Option<UserOrder>, Query, description = "Sort column")
    ),
    responses(
        (status = 200, description = "Users", body = UserList)
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<UserQuery>,
) -> AppResult<Json<UserList>> {
    let users = state.services.users.list(&query).await?;
    Ok(Json(UserList { users }))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<User>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user))
}

/// Create a user with the given id
#[utoipa::path(
    post,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid input or duplicate id", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(data): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = state.services.users.create(id, data).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Update a user's name or class year
#[utoipa::path(
    put,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(data): ValidatedJson<UpdateUser>,
) -> AppResult<Json<User>> {
    let user = state.services.users.update(id, data).await?;
    Ok(Json(user))
}

/// Delete a user together with their books and listings
#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.delete(id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

/// Books posted by a user
#[utoipa::path(
    get,
    path = "/user/{id}/books",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Books posted by the user", body = BookList),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user_books(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<BookList>> {
    let books = state.services.users.books(id).await?;
    Ok(Json(BookList { books }))
}

/// Listings owned by a user
#[utoipa::path(
    get,
    path = "/user/{id}/listings",
    tag = "users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Listings owned by the user", body = ListingList),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user_listings(
    State(state): State<crate::AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Json<ListingList>> {
    let listings = state.services.users.listings(id).await?;
    Ok(Json(ListingList { listings }))
}
