//! OAuth2 token repository.

use std::sync::Arc;

use crate::entities::{Token, token};
use portal_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    prelude::DateTimeWithTimeZone,
};
use tracing::debug;

/// Token repository for database operations.
#[derive(Clone)]
pub struct TokenRepository {
    db: Arc<DatabaseConnection>,
}

impl TokenRepository {
    /// Create a new token repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a token by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<token::Model>> {
        Ok(Token::find_by_id(id).one(self.db.as_ref()).await?)
    }

    /// Find a token by its access token.
    pub async fn find_by_access_token(
        &self,
        access_token: &str,
    ) -> AppResult<Option<token::Model>> {
        Ok(Token::find()
            .filter(token::Column::AccessToken.eq(access_token))
            .one(self.db.as_ref())
            .await?)
    }

    /// Find a token by its refresh token.
    pub async fn find_by_refresh_token(
        &self,
        refresh_token: &str,
    ) -> AppResult<Option<token::Model>> {
        Ok(Token::find()
            .filter(token::Column::RefreshToken.eq(refresh_token))
            .one(self.db.as_ref())
            .await?)
    }

    /// Find all tokens issued to a client, newest first.
    pub async fn find_by_client_id(&self, client_id: &str) -> AppResult<Vec<token::Model>> {
        Ok(Token::find()
            .filter(token::Column::ClientId.eq(client_id))
            .order_by_desc(token::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Create a new token.
    ///
    /// A duplicate access or refresh token fails with a unique violation.
    pub async fn create(&self, model: token::ActiveModel) -> AppResult<token::Model> {
        let token = model.insert(self.db.as_ref()).await?;
        debug!(token_id = token.id, client_id = %token.client_id, "Issued token");
        Ok(token)
    }

    /// Delete a token and return the detached model.
    pub async fn delete(&self, token: token::Model) -> AppResult<token::Model> {
        let result = Token::delete_by_id(token.id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Token: {}", token.id)));
        }

        debug!(token_id = token.id, "Deleted token");
        Ok(token)
    }

    /// Delete tokens that expired at or before `now`.
    pub async fn delete_expired(&self, now: DateTimeWithTimeZone) -> AppResult<u64> {
        let result = Token::delete_many()
            .filter(token::Column::Expires.lte(now))
            .exec(self.db.as_ref())
            .await?;

        debug!(count = result.rows_affected, "Deleted expired tokens");
        Ok(result.rows_affected)
    }
}
