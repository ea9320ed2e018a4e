//! User management service

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookFilter},
        listing::{Listing, ListingFilter},
        user::{CreateUser, UpdateUser, User, UserQuery},
    },
    repository::{Repository, Session},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        let mut session = self.repository.session().await?;
        require_user(&mut session, id).await
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        let mut session = self.repository.session().await?;
        session.users_query(&query.filters(), query.order_by).await
    }

    pub async fn create(&self, id: i32, data: CreateUser) -> AppResult<User> {
        let mut session = self.repository.session().await?;
        if session.users_find_by_id(id).await?.is_some() {
            return Err(AppError::Conflict(format!("A user with id {} already exists", id)));
        }

        let user = User::new(id, data.full_name, data.class_year, data.token);
        session.users_insert(&user).await?;
        session.commit().await?;

        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn update(&self, id: i32, data: UpdateUser) -> AppResult<User> {
        let mut session = self.repository.session().await?;
        let mut user = require_user(&mut session, id).await?;

        if let Some(full_name) = data.full_name {
            user.full_name = full_name;
        }
        if data.class_year.is_some() {
            user.class_year = data.class_year;
        }

        session.users_save(&user).await?;
        session.commit().await?;
        Ok(user)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        let user = require_user(&mut session, id).await?;
        session.users_delete(&user).await?;
        session.commit().await?;

        tracing::info!(user_id = id, "User deleted with their books and listings");
        Ok(())
    }

    /// Books posted by a user
    pub async fn books(&self, id: i32) -> AppResult<Vec<Book>> {
        let mut session = self.repository.session().await?;
        require_user(&mut session, id).await?;
        session.books_find_by(BookFilter::PostedBy(id)).await
    }

    /// Listings owned by a user
    pub async fn listings(&self, id: i32) -> AppResult<Vec<Listing>> {
        let mut session = self.repository.session().await?;
        let user = require_user(&mut session, id).await?;
        session.listings_find_by(ListingFilter::OwnerToken(user.token)).await
    }
}

async fn require_user(session: &mut Session, id: i32) -> AppResult<User> {
    session
        .users_find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}
