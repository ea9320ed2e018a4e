//! User domain methods on Session

use sqlx::{Postgres, QueryBuilder};

use super::{push_clause, Session};
use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserFilter, UserOrder},
};

impl Session {
    /// Get user by id
    pub async fn users_find_by_id(&mut self, id: i32) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(user)
    }

    /// All users matching a single filter
    pub async fn users_find_by(&mut self, filter: UserFilter) -> AppResult<Vec<User>> {
        self.users_query(&[filter], None).await
    }

    /// All users, ascending by the given column (id by default)
    pub async fn users_list_all(&mut self, order: Option<UserOrder>) -> AppResult<Vec<User>> {
        self.users_query(&[], order).await
    }

    /// Users matching every filter
    pub async fn users_query(&mut self, filters: &[UserFilter], order: Option<UserOrder>) -> AppResult<Vec<User>> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM users");

        for (i, filter) in filters.iter().enumerate() {
            push_clause(&mut builder, i);
            match filter {
                UserFilter::FullName(name) => builder.push("full_name = ").push_bind(name.clone()),
                UserFilter::ClassYear(year) => builder.push("class_year = ").push_bind(*year),
                UserFilter::Token(token) => builder.push("token = ").push_bind(token.clone()),
            };
        }

        let order = order.unwrap_or_default();
        builder.push(" ORDER BY ").push(order.column());
        if order != UserOrder::Id {
            builder.push(", id");
        }

        let users = builder
            .build_query_as::<User>()
            .fetch_all(&mut *self.tx)
            .await?;
        Ok(users)
    }

    /// Insert a new user. A taken id or token is a conflict.
    pub async fn users_insert(&mut self, user: &User) -> AppResult<()> {
        sqlx::query("INSERT INTO users (id, token, full_name, class_year) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.token)
            .bind(&user.full_name)
            .bind(user.class_year)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| AppError::conflict_on_duplicate(e, format!("A user with id {} or token {} already exists", user.id, user.token)))?;
        Ok(())
    }

    /// Insert or overwrite a user by id
    pub async fn users_save(&mut self, user: &User) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, token, full_name, class_year)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET token = EXCLUDED.token,
                full_name = EXCLUDED.full_name,
                class_year = EXCLUDED.class_year
            "#,
        )
        .bind(user.id)
        .bind(&user.token)
        .bind(&user.full_name)
        .bind(user.class_year)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| AppError::conflict_on_duplicate(e, format!("Token {} belongs to another user", user.token)))?;
        Ok(())
    }

    /// Delete a user. Their books and listings go with them.
    pub async fn users_delete(&mut self, user: &User) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", user.id)));
        }
        Ok(())
    }
}
