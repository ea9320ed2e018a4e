//! Listing model

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Decimal places kept for prices
pub const PRICE_SCALE: u32 = 2;

/// An offer of a book for sale by a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Listing {
    pub listing_id: i32,
    #[schema(value_type = String, example = "80.00")]
    pub price: Decimal,
    pub condition: String,
    pub isbn: i64,
    /// Token of the owning user
    pub owner_token: String,
    /// e.g. "available", "sold"
    pub status: String,
}

impl PartialEq for Listing {
    fn eq(&self, other: &Self) -> bool {
        self.listing_id == other.listing_id
    }
}

impl Eq for Listing {}

/// A listing that has not been stored yet and so has no id
#[serde_as]
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_new_listing_price"))]
pub struct NewListing {
    /// Number or decimal string, at most two decimal places
    #[schema(value_type = String, example = "80.00")]
    pub price: Decimal,
    #[validate(length(min = 1, max = 15, message = "condition must be 1 to 15 characters"))]
    pub condition: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[schema(value_type = i64)]
    pub isbn: i64,
    #[serde(alias = "google_tok")]
    #[validate(length(min = 1, message = "owner_token cannot be blank"))]
    pub owner_token: String,
    #[validate(length(min = 1, max = 15, message = "status must be 1 to 15 characters"))]
    pub status: String,
}

impl NewListing {
    pub fn new(price: Decimal, condition: String, isbn: i64, owner_token: String, status: String) -> Self {
        Self {
            price: normalize_price(price),
            condition,
            isbn,
            owner_token,
            status,
        }
    }
}

/// Update listing request. Only the offer terms can change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_listing_price"))]
pub struct UpdateListing {
    #[validate(length(min = 1, max = 15, message = "condition must be 1 to 15 characters"))]
    pub condition: String,
    #[schema(value_type = Option<String>, example = "75.00")]
    pub price: Option<Decimal>,
    #[validate(length(min = 1, max = 15, message = "status must be 1 to 15 characters"))]
    pub status: Option<String>,
}

impl Listing {
    /// Overwrite the mutable offer terms.
    pub fn apply(&mut self, update: UpdateListing) {
        self.condition = update.condition;
        if let Some(price) = update.price {
            self.price = normalize_price(price);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Pin a price to two decimal places so it serializes the way it is stored.
pub fn normalize_price(mut price: Decimal) -> Decimal {
    price.rescale(PRICE_SCALE);
    price
}

/// Largest price a `NUMERIC(10, 2)` column holds
pub fn max_price() -> Decimal {
    Decimal::new(9_999_999_999, PRICE_SCALE)
}

/// A price must be storable as is: not negative, no sub-cent digits, within column range.
pub fn check_price(price: &Decimal) -> Result<(), ValidationError> {
    let message = if price.is_sign_negative() {
        "price cannot be negative".to_string()
    } else if price.normalize().scale() > PRICE_SCALE {
        format!("price must have at most {} decimal places", PRICE_SCALE)
    } else if *price > max_price() {
        format!("price cannot exceed {}", max_price())
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new("price");
    error.message = Some(Cow::Owned(message));
    Err(error)
}

fn validate_new_listing_price(listing: &NewListing) -> Result<(), ValidationError> {
    check_price(&listing.price)
}

fn validate_update_listing_price(update: &UpdateListing) -> Result<(), ValidationError> {
    update.price.as_ref().map_or(Ok(()), check_price)
}

/// Equality filters on the listings table
#[derive(Debug, Clone)]
pub enum ListingFilter {
    Isbn(i64),
    OwnerToken(String),
    Status(String),
    Condition(String),
}

/// Sort column for listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingOrder {
    #[default]
    ListingId,
    Price,
    Isbn,
    Status,
}

impl ListingOrder {
    pub fn column(self) -> &'static str {
        match self {
            ListingOrder::ListingId => "listing_id",
            ListingOrder::Price => "price",
            ListingOrder::Isbn => "isbn",
            ListingOrder::Status => "status",
        }
    }
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListingQuery {
    pub isbn: Option<i64>,
    pub owner_token: Option<String>,
    pub status: Option<String>,
    pub condition: Option<String>,
    pub order_by: Option<ListingOrder>,
}

impl ListingQuery {
    pub fn filters(&self) -> Vec<ListingFilter> {
        let mut filters = Vec::new();
        if let Some(isbn) = self.isbn {
            filters.push(ListingFilter::Isbn(isbn));
        }
        if let Some(ref token) = self.owner_token {
            filters.push(ListingFilter::OwnerToken(token.clone()));
        }
        if let Some(ref status) = self.status {
            filters.push(ListingFilter::Status(status.clone()));
        }
        if let Some(ref condition) = self.condition {
            filters.push(ListingFilter::Condition(condition.clone()));
        }
        filters
    }
}
