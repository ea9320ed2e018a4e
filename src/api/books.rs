//! Book endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::book::{Book, BookOrder, BookQuery, CreateBook, UpdateBook},
};

use super::{
    extract::{ApiPath, ApiQuery, ValidatedJson},
    listings::ListingList,
    MessageResponse,
};

#[derive(Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<Book>,
}

#[derive(Serialize, ToSchema)]
pub struct BookCreated {
    pub message: String,
    pub book: Book,
}

/// List books, optionally filtered and sorted
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(
        ("title" = Option<String>, Query, description = "Exact title"),
        ("author" = Option<String>, Query, description = "Exact author"),
        ("search" = Option<String>, Query, description = "Case-insensitive title search"),
        ("user_id" = Option<i32>, Query, description = "Posting user"),
        ("order_by" = Option<BookOrder>, Query, description = "Sort column")
    ),
    responses(
        (status = 200, description = "Books with their listings", body = BookList)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    ApiQuery(query): ApiQuery<BookQuery>,
) -> AppResult<Json<BookList>> {
    let books = state.services.books.list(&query).await?;
    Ok(Json(BookList { books }))
}

/// Get a book and its listings
#[utoipa::path(
    get,
    path = "/book/{isbn}",
    tag = "books",
    params(("isbn" = i64, Path, description = "ISBN")),
    responses(
        (status = 200, description = "Book with nested listings", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    ApiPath(isbn): ApiPath<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_by_isbn(isbn).await?;
    Ok(Json(book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/book/{isbn}",
    tag = "books",
    params(("isbn" = i64, Path, description = "ISBN")),
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookCreated),
        (status = 400, description = "Invalid input or duplicate isbn", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ApiPath(isbn): ApiPath<i64>,
    ValidatedJson(data): ValidatedJson<CreateBook>,
) -> AppResult<(StatusCode, Json<BookCreated>)> {
    let book = state.services.books.create(isbn, data).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookCreated {
            message: "Book created successfully.".to_string(),
            book,
        }),
    ))
}

/// Replace a book's title and author
#[utoipa::path(
    put,
    path = "/book/{isbn}",
    tag = "books",
    params(("isbn" = i64, Path, description = "ISBN")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    ApiPath(isbn): ApiPath<i64>,
    ValidatedJson(data): ValidatedJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.update(isbn, data).await?;
    Ok(Json(book))
}

/// Delete a book and every listing of it
#[utoipa::path(
    delete,
    path = "/book/{isbn}",
    tag = "books",
    params(("isbn" = i64, Path, description = "ISBN")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    ApiPath(isbn): ApiPath<i64>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(isbn).await?;
    Ok(Json(MessageResponse::new("Book deleted")))
}

/// Listings offering a book
#[utoipa::path(
    get,
    path = "/book/{isbn}/listings",
    tag = "books",
    params(("isbn" = i64, Path, description = "ISBN")),
    responses(
        (status = 200, description = "Listings of the book", body = ListingList),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_listings(
    State(state): State<crate::AppState>,
    ApiPath(isbn): ApiPath<i64>,
) -> AppResult<Json<ListingList>> {
    let listings = state.services.books.listings(isbn).await?;
    Ok(Json(ListingList { listings }))
}
