//! Listing service

use crate::{
    error::{AppError, AppResult},
    models::listing::{normalize_price, Listing, ListingQuery, NewListing, UpdateListing},
    repository::{Repository, Session},
};

#[derive(Clone)]
pub struct ListingsService {
    repository: Repository,
}

impl ListingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, listing_id: i32) -> AppResult<Listing> {
        let mut session = self.repository.session().await?;
        require_listing(&mut session, listing_id).await
    }

    pub async fn list(&self, query: &ListingQuery) -> AppResult<Vec<Listing>> {
        let mut session = self.repository.session().await?;
        session.listings_query(&query.filters(), query.order_by).await
    }

    /// Store a listing. The book and the owner must already exist.
    pub async fn create(&self, mut listing: NewListing) -> AppResult<Listing> {
        listing.price = normalize_price(listing.price);
        let mut session = self.repository.session().await?;
        let created = session.listings_insert(&listing).await?;
        session.commit().await?;

        tracing::info!(
            listing_id = created.listing_id,
            isbn = created.isbn,
            "Listing created"
        );
        Ok(created)
    }

    pub async fn update(&self, listing_id: i32, data: UpdateListing) -> AppResult<Listing> {
        let mut session = self.repository.session().await?;
        let mut listing = require_listing(&mut session, listing_id).await?;

        listing.apply(data);
        let saved = session.listings_save(&listing).await?;
        session.commit().await?;
        Ok(saved)
    }

    pub async fn delete(&self, listing_id: i32) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        let listing = require_listing(&mut session, listing_id).await?;
        session.listings_delete(&listing).await?;
        session.commit().await?;

        tracing::info!(listing_id, "Listing deleted");
        Ok(())
    }
}

async fn require_listing(session: &mut Session, listing_id: i32) -> AppResult<Listing> {
    session
        .listings_find_by_id(listing_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Listing {} not found", listing_id)))
}
