//! OAuth2 client repository.

use std::sync::Arc;

use crate::entities::{Client, client};
use portal_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::debug;

/// Client repository for database operations.
///
/// Clients are immutable once registered, so there is no update operation.
#[derive(Clone)]
pub struct ClientRepository {
    db: Arc<DatabaseConnection>,
}

impl ClientRepository {
    /// Create a new client repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a client by row ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<client::Model>> {
        Ok(Client::find_by_id(id).one(self.db.as_ref()).await?)
    }

    /// Find a client by its public client ID.
    pub async fn find_by_client_id(&self, client_id: &str) -> AppResult<Option<client::Model>> {
        Ok(Client::find()
            .filter(client::Column::ClientId.eq(client_id))
            .one(self.db.as_ref())
            .await?)
    }

    /// Get a client by its public client ID, returning an error if not found.
    pub async fn get_by_client_id(&self, client_id: &str) -> AppResult<client::Model> {
        self.find_by_client_id(client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client with client_id: {client_id}")))
    }

    /// Find all clients owned by a user, newest first.
    pub async fn find_by_user_id(&self, user_id: i32) -> AppResult<Vec<client::Model>> {
        Ok(Client::find()
            .filter(client::Column::UserId.eq(user_id))
            .order_by_desc(client::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?)
    }

    /// Register a new client.
    pub async fn create(&self, model: client::ActiveModel) -> AppResult<client::Model> {
        let client = model.insert(self.db.as_ref()).await?;
        debug!(client_id = %client.client_id, user_id = ?client.user_id, "Registered client");
        Ok(client)
    }
}
