//! Book domain methods on Session

use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder};

use super::{like_pattern, push_clause, Session};
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookFilter, BookOrder},
        listing::Listing,
    },
};

impl Session {
    /// Get book by ISBN, with its listings
    pub async fn books_find_by_id(&mut self, isbn: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&mut *self.tx)
            .await?;

        let Some(mut book) = book else {
            return Ok(None);
        };

        book.listings = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE isbn = $1 ORDER BY listing_id")
            .bind(isbn)
            .fetch_all(&mut *self.tx)
            .await?;

        Ok(Some(book))
    }

    /// All books matching a single filter
    pub async fn books_find_by(&mut self, filter: BookFilter) -> AppResult<Vec<Book>> {
        self.books_query(&[filter], None).await
    }

    /// All books, ascending by the given column (isbn by default)
    pub async fn books_list_all(&mut self, order: Option<BookOrder>) -> AppResult<Vec<Book>> {
        self.books_query(&[], order).await
    }

    /// Books matching every filter, each with its listings
    pub async fn books_query(&mut self, filters: &[BookFilter], order: Option<BookOrder>) -> AppResult<Vec<Book>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM books");

        for (i, filter) in filters.iter().enumerate() {
            push_clause(&mut builder, i);
            match filter {
                BookFilter::Title(title) => builder.push("title = ").push_bind(title.clone()),
                BookFilter::Author(author) => builder.push("author = ").push_bind(author.clone()),
                BookFilter::TitleContains(fragment) => builder
                    .push("title ILIKE ")
                    .push_bind(like_pattern(fragment)),
                BookFilter::PostedBy(user_id) => builder.push("user_id = ").push_bind(*user_id),
            };
        }

        let order = order.unwrap_or_default();
        builder.push(" ORDER BY ").push(order.column());
        if order != BookOrder::Isbn {
            builder.push(", isbn");
        }

        let mut books = builder
            .build_query_as::<Book>()
            .fetch_all(&mut *self.tx)
            .await?;

        self.attach_listings(&mut books).await?;
        Ok(books)
    }

    /// Load the listings of several books in one query
    async fn attach_listings(&mut self, books: &mut [Book]) -> AppResult<()> {
        if books.is_empty() {
            return Ok(());
        }

        let isbns: Vec<i64> = books.iter().map(|b| b.isbn).collect();
        let listings = sqlx::query_as::<_, Listing>(
            "SELECT * FROM listings WHERE isbn = ANY($1) ORDER BY listing_id",
        )
        .bind(&isbns)
        .fetch_all(&mut *self.tx)
        .await?;

        let mut by_isbn: HashMap<i64, Vec<Listing>> = HashMap::new();
        for listing in listings {
            by_isbn.entry(listing.isbn).or_default().push(listing);
        }
        for book in books.iter_mut() {
            book.listings = by_isbn.remove(&book.isbn).unwrap_or_default();
        }
        Ok(())
    }

    /// Insert a new book. An existing ISBN is a conflict.
    pub async fn books_insert(&mut self, book: &Book) -> AppResult<()> {
        sqlx::query("INSERT INTO books (isbn, title, author, user_id) VALUES ($1, $2, $3, $4)")
            .bind(book.isbn)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.user_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| AppError::conflict_on_duplicate(e, format!("A book with isbn {} already exists", book.isbn)))?;
        Ok(())
    }

    /// Insert or overwrite a book by ISBN. Listings are not touched.
    pub async fn books_save(&mut self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO books (isbn, title, author, user_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (isbn) DO UPDATE
            SET title = EXCLUDED.title,
                author = EXCLUDED.author,
                user_id = EXCLUDED.user_id
            "#,
        )
        .bind(book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.user_id)
        .execute(&mut *self.tx)
        .await?;
        Ok(())
    }

    /// Delete a book. Its listings are removed with it.
    pub async fn books_delete(&mut self, book: &Book) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE isbn = $1")
            .bind(book.isbn)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with isbn {} not found", book.isbn)));
        }
        Ok(())
    }
}
