//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, CreateBook, UpdateBook},
        listing::{Listing, ListingFilter},
    },
    repository::{Repository, Session},
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_isbn(&self, isbn: i64) -> AppResult<Book> {
        let mut session = self.repository.session().await?;
        require_book(&mut session, isbn).await
    }

    pub async fn list(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let mut session = self.repository.session().await?;
        session.books_query(&query.filters(), query.order_by).await
    }

    /// Create a book. An existing ISBN is rejected and left untouched.
    pub async fn create(&self, isbn: i64, data: CreateBook) -> AppResult<Book> {
        let mut session = self.repository.session().await?;
        if session.books_find_by_id(isbn).await?.is_some() {
            return Err(AppError::Conflict(format!("A book with isbn {} already exists", isbn)));
        }

        let book = Book::new(isbn, data.title, data.author, data.user_id);
        session.books_insert(&book).await?;
        session.commit().await?;

        tracing::info!(isbn, "Book created");
        Ok(book)
    }

    pub async fn update(&self, isbn: i64, data: UpdateBook) -> AppResult<Book> {
        let mut session = self.repository.session().await?;
        let mut book = require_book(&mut session, isbn).await?;

        book.title = data.title;
        book.author = data.author;

        session.books_save(&book).await?;
        session.commit().await?;
        Ok(book)
    }

    /// Delete a book along with every listing of it
    pub async fn delete(&self, isbn: i64) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        let book = require_book(&mut session, isbn).await?;
        session.books_delete(&book).await?;
        session.commit().await?;

        tracing::info!(isbn, listings = book.listings.len(), "Book deleted");
        Ok(())
    }

    pub async fn listings(&self, isbn: i64) -> AppResult<Vec<Listing>> {
        let mut session = self.repository.session().await?;
        require_book(&mut session, isbn).await?;
        session.listings_find_by(ListingFilter::Isbn(isbn)).await
    }
}

async fn require_book(session: &mut Session, isbn: i64) -> AppResult<Book> {
    session
        .books_find_by_id(isbn)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found".to_string()))
}
