//! Sample data for demos and local development

use rust_decimal::Decimal;

use super::Session;
use crate::{
    error::AppResult,
    models::{
        book::Book,
        listing::{ListingFilter, NewListing},
        user::User,
    },
};

const USERS: &[(i32, &str, i16)] = &[
    (1111, "Wayne Gretsky", 4),
    (2222, "Sidney Crosby", 3),
    (3333, "Brock Boeser", 1),
    (4444, "Daniel Sedin", 3),
    (5555, "Ryan Getslaf", 2),
];

/// (isbn, title, author, asking price, posted by)
const BOOKS: &[(i64, &str, &str, i64, i32)] = &[
    (1610020243, "Textbook of Neonatal Resuscitation", "Gary M Weiner", 80, 1111),
    (1118324579, "Materials Science and Engineering: An Introduction", "William D. Callister Jr.", 90, 3333),
    (321616677, "Evolutionary Analysis", "Jon. C Herron", 110, 4444),
    (321907981, "Technical Communication Today", "Richard Johnson-Sheehan", 70, 2222),
    (1285852702, "Delmar's Standard Textbook of Electricity", "Stephen Herman", 60, 5555),
    (323319742, "Mosby's Textbook for Nursing Assistants", "Sheila A. Sorrentino", 140, 1111),
    (138147574, "Signals and Systems", "Alan V. Oppenheim", 120, 2222),
    (1848726953, "Textbook of Clinical Neuropsychology", "Joel E. Morgan", 100, 4444),
];

impl Session {
    /// Load the sample users, books and one listing per book. Safe to run
    /// repeatedly: existing rows are overwritten, listings are only added
    /// to books that have none.
    pub async fn seed_demo_data(&mut self) -> AppResult<()> {
        for &(id, name, year) in USERS {
            self.users_save(&User::new(id, name.to_string(), Some(year), None)).await?;
        }

        let mut added = 0;
        for &(isbn, title, author, price, owner) in BOOKS {
            self.books_save(&Book::new(isbn, title.to_string(), author.to_string(), Some(owner)))
                .await?;

            if self.listings_find_by(ListingFilter::Isbn(isbn)).await?.is_empty() {
                let listing = NewListing::new(
                    Decimal::from(price),
                    "good".to_string(),
                    isbn,
                    owner.to_string(),
                    "available".to_string(),
                );
                self.listings_insert(&listing).await?;
                added += 1;
            }
        }

        tracing::info!(
            users = USERS.len(),
            books = BOOKS.len(),
            listings = added,
            "Demo data loaded"
        );
        Ok(())
    }
}
