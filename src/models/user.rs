//! User model

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A student who posts books and owns listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    /// Campus id, assigned by the caller
    pub id: i32,
    /// Opaque owner token referenced by listings
    pub token: String,
    pub full_name: String,
    /// Class year (0-4)
    pub class_year: Option<i16>,
}

impl User {
    /// Build an unsaved user. Without an explicit token the id doubles as one.
    pub fn new(id: i32, full_name: String, class_year: Option<i16>, token: Option<String>) -> Self {
        Self {
            id,
            token: token.unwrap_or_else(|| id.to_string()),
            full_name,
            class_year,
        }
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

/// Equality filters on the users table
#[derive(Debug, Clone)]
pub enum UserFilter {
    FullName(String),
    ClassYear(i16),
    Token(String),
}

/// Sort column for user listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserOrder {
    #[default]
    Id,
    FullName,
    ClassYear,
}

impl UserOrder {
    pub fn column(self) -> &'static str {
        match self {
            UserOrder::Id => "id",
            UserOrder::FullName => "full_name",
            UserOrder::ClassYear => "class_year",
        }
    }
}

/// User list query parameters
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UserQuery {
    pub full_name: Option<String>,
    pub class_year: Option<i16>,
    pub token: Option<String>,
    pub order_by: Option<UserOrder>,
}

impl UserQuery {
    pub fn filters(&self) -> Vec<UserFilter> {
        let mut filters = Vec::new();
        if let Some(ref name) = self.full_name {
            filters.push(UserFilter::FullName(name.clone()));
        }
        if let Some(year) = self.class_year {
            filters.push(UserFilter::ClassYear(year));
        }
        if let Some(ref token) = self.token {
            filters.push(UserFilter::Token(token.clone()));
        }
        filters
    }
}

/// Create user request
#[serde_as]
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "full_name cannot be blank"))]
    pub full_name: String,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[schema(value_type = Option<i16>)]
    #[validate(range(min = 0, max = 4, message = "class_year must be between 0 and 4"))]
    pub class_year: Option<i16>,
    #[validate(length(min = 1, message = "token cannot be blank"))]
    pub token: Option<String>,
}

/// Update user request
#[serde_as]
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "full_name cannot be blank"))]
    pub full_name: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(default)]
    #[schema(value_type = Option<i16>)]
    #[validate(range(min = 0, max = 4, message = "class_year must be between 0 and 4"))]
    pub class_year: Option<i16>,
}
