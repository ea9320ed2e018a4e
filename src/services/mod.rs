//! Business logic services
//!
//! Each service call is one unit of work: it opens a repository session,
//! performs its reads and writes, and commits before returning.

pub mod books;
pub mod listings;
pub mod users;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub books: books::BooksService,
    pub listings: listings::ListingsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            users: users::UsersService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            listings: listings::ListingsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Load the sample data set in a single transaction
    pub async fn seed_demo_data(&self) -> AppResult<()> {
        let mut session = self.repository.session().await?;
        session.seed_demo_data().await?;
        session.commit().await
    }
}
