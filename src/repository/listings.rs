//! Listing domain methods on Session

use sqlx::{Postgres, QueryBuilder};

use super::{push_clause, Session};
use crate::{
    error::{AppError, AppResult},
    models::listing::{Listing, ListingFilter, ListingOrder, NewListing},
};

impl Session {
    /// Get listing by id
    pub async fn listings_find_by_id(&mut self, listing_id: i32) -> AppResult<Option<Listing>> {
        let listing = sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE listing_id = $1")
            .bind(listing_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(listing)
    }

    /// All listings matching a single filter
    pub async fn listings_find_by(&mut self, filter: ListingFilter) -> AppResult<Vec<Listing>> {
        self.listings_query(&[filter], None).await
    }

    /// All listings, ascending by the given column (listing id by default)
    pub async fn listings_list_all(&mut self, order: Option<ListingOrder>) -> AppResult<Vec<Listing>> {
        self.listings_query(&[], order).await
    }

    /// Listings matching every filter
    pub async fn listings_query(
        &mut self,
        filters: &[ListingFilter],
        order: Option<ListingOrder>,
    ) -> AppResult<Vec<Listing>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM listings");

        for (i, filter) in filters.iter().enumerate() {
            push_clause(&mut builder, i);
            match filter {
                ListingFilter::Isbn(isbn) => builder.push("isbn = ").push_bind(*isbn),
                ListingFilter::OwnerToken(token) => builder.push("owner_token = ").push_bind(token.clone()),
                ListingFilter::Status(status) => builder.push("status = ").push_bind(status.clone()),
                ListingFilter::Condition(condition) => builder.push("condition = ").push_bind(condition.clone()),
            };
        }

        let order = order.unwrap_or_default();
        builder.push(" ORDER BY ").push(order.column());
        if order != ListingOrder::ListingId {
            builder.push(", listing_id");
        }

        let listings = builder
            .build_query_as::<Listing>()
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(listings)
    }

    /// Store a new listing and return it with its generated id.
    /// A missing book or owner fails as a storage error.
    pub async fn listings_insert(&mut self, listing: &NewListing) -> AppResult<Listing> {
        let row = sqlx::query_as::<_, Listing>(
            r#"
            INSERT INTO listings (price, condition, isbn, owner_token, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(listing.price)
        .bind(&listing.condition)
        .bind(listing.isbn)
        .bind(&listing.owner_token)
        .bind(&listing.status)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row)
    }

    /// Write back the offer terms of an existing listing
    pub async fn listings_save(&mut self, listing: &Listing) -> AppResult<Listing> {
        sqlx::query_as::<_, Listing>(
            r#"
            UPDATE listings
            SET price = $1, condition = $2, status = $3
            WHERE listing_id = $4
            RETURNING *
            "#,
        )
        .bind(listing.price)
        .bind(&listing.condition)
        .bind(&listing.status)
        .bind(listing.listing_id)
        .fetch_optional(&mut *self.tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {} not found", listing.listing_id)))
    }

    /// Delete a listing
    pub async fn listings_delete(&mut self, listing: &Listing) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM listings WHERE listing_id = $1")
            .bind(listing.listing_id)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Listing {} not found", listing.listing_id)));
        }
        Ok(())
    }
}
