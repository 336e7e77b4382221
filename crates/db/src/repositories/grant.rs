//! OAuth2 grant repository.

use std::sync::Arc;

use crate::entities::{Grant, grant};
use portal_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    prelude::DateTimeWithTimeZone,
};
use tracing::debug;

/// Grant repository for database operations.
#[derive(Clone)]
pub struct GrantRepository {
    db: Arc<DatabaseConnection>,
}

impl GrantRepository {
    /// Create a new grant repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a grant by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<grant::Model>> {
        Ok(Grant::find_by_id(id).one(self.db.as_ref()).await?)
    }

    /// Find the grant a client presents for code exchange.
    pub async fn find_by_client_and_code(
        &self,
        client_id: &str,
        code: &str,
    ) -> AppResult<Option<grant::Model>> {
        Ok(Grant::find()
            .filter(grant::Column::ClientId.eq(client_id))
            .filter(grant::Column::Code.eq(code))
            .one(self.db.as_ref())
            .await?)
    }

    /// Create a new grant.
    pub async fn create(&self, model: grant::ActiveModel) -> AppResult<grant::Model> {
        let grant = model.insert(self.db.as_ref()).await?;
        debug!(grant_id = grant.id, client_id = %grant.client_id, "Created grant");
        Ok(grant)
    }

    /// Delete a grant and return the detached model.
    ///
    /// Runs directly on the pool rather than in a caller's transaction, so the
    /// deletion is committed by the time this returns.
    pub async fn delete(&self, grant: grant::Model) -> AppResult<grant::Model> {
        let result = Grant::delete_by_id(grant.id)
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Grant: {}", grant.id)));
        }

        debug!(grant_id = grant.id, "Deleted grant");
        Ok(grant)
    }

    /// Delete grants that expired at or before `now`.
    pub async fn delete_expired(&self, now: DateTimeWithTimeZone) -> AppResult<u64> {
        let result = Grant::delete_many()
            .filter(grant::Column::Expires.lte(now))
            .exec(self.db.as_ref())
            .await?;

        debug!(count = result.rows_affected, "Deleted expired grants");
        Ok(result.rows_affected)
    }
}
