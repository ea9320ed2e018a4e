//! Data models for the textbook exchange

pub mod book;
pub mod listing;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookFilter, BookOrder};
pub use listing::{Listing, ListingFilter, ListingOrder, NewListing};
pub use user::{User, UserFilter, UserOrder};
