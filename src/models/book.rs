//! Book model

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::listing::Listing;

/// A textbook, identified by ISBN, with every listing currently offering it
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub isbn: i64,
    pub title: String,
    pub author: String,
    /// User who posted the book
    pub user_id: Option<i32>,
    /// Listings of this book, loaded together with it
    #[sqlx(skip)]
    #[serde(default)]
    pub listings: Vec<Listing>,
}

impl Book {
    /// Build an unsaved book with no listings.
    pub fn new(isbn: i64, title: String, author: String, user_id: Option<i32>) -> Self {
        Self {
            isbn,
            title,
            author,
            user_id,
            listings: Vec::new(),
        }
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

/// Filters on the books table
#[derive(Debug, Clone)]
pub enum BookFilter {
    Title(String),
    Author(String),
    /// Case-insensitive substring match on the title
    TitleContains(String),
    PostedBy(i32),
}

/// Sort column for book listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookOrder {
    #[default]
    Isbn,
    Title,
    Author,
}

impl BookOrder {
    pub fn column(self) -> &'static str {
        match self {
            BookOrder::Isbn => "isbn",
            BookOrder::Title => "title",
            BookOrder::Author => "author",
        }
    }
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Free-text search on the title
    pub search: Option<String>,
    pub user_id: Option<i32>,
    pub order_by: Option<BookOrder>,
}

impl BookQuery {
    pub fn filters(&self) -> Vec<BookFilter> {
        let mut filters = Vec::new();
        if let Some(ref title) = self.title {
            filters.push(BookFilter::Title(title.clone()));
        }
        if let Some(ref author) = self.author {
            filters.push(BookFilter::Author(author.clone()));
        }
        if let Some(ref search) = self.search {
            filters.push(BookFilter::TitleContains(search.clone()));
        }
        if let Some(user_id) = self.user_id {
            filters.push(BookFilter::PostedBy(user_id));
        }
        filters
    }
}

/// Create book request
#[serde_as]
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "title cannot be blank"))]
    pub title: String,
    #[validate(length(min = 1, message = "author cannot be blank"))]
    pub author: String,
    /// Posting user; numeric strings are accepted
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[schema(value_type = Option<i32>)]
    pub user_id: Option<i32>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "title cannot be blank"))]
    pub title: String,
    #[validate(length(min = 1, message = "author cannot be blank"))]
    pub author: String,
}
