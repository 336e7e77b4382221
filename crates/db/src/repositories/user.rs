//! User repository.

use std::sync::Arc;

use crate::entities::base::{bumped_updated_at, now};
use crate::entities::{User, user};
use portal_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    prelude::DateTimeWithTimeZone, sea_query::Expr,
};
use tracing::debug;

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<user::Model>> {
        Ok(User::find_by_id(id).one(self.db.as_ref()).await?)
    }

    /// Find a user by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<user::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User: {id}")))
    }

    /// Find a user by email.
    ///
    /// Email is not unique at this layer; the first match is returned.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        Ok(User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?)
    }

    /// Create a new user.
    pub async fn create(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        let user = model.insert(self.db.as_ref()).await?;
        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    /// Update a user.
    pub async fn update(&self, model: user::ActiveModel) -> AppResult<user::Model> {
        Ok(model.update(self.db.as_ref()).await?)
    }

    /// Record a successful sign-in.
    ///
    /// The previous current sign-in becomes the last one. The counter and the
    /// rotation are applied in a single `UPDATE` so concurrent sign-ins are
    /// all counted.
    pub async fn record_sign_in(
        &self,
        id: i32,
        ip: &str,
        at: DateTimeWithTimeZone,
    ) -> AppResult<user::Model> {
        let result = User::update_many()
            .col_expr(
                user::Column::SignInCount,
                Expr::col(user::Column::SignInCount).add(1),
            )
            .col_expr(
                user::Column::LastSignInAt,
                Expr::col(user::Column::CurrentSignInAt).into(),
            )
            .col_expr(
                user::Column::LastSignInIp,
                Expr::col(user::Column::CurrentSignInIp).into(),
            )
            .col_expr(user::Column::CurrentSignInAt, Expr::value(at))
            .col_expr(user::Column::CurrentSignInIp, Expr::value(ip))
            .col_expr(user::Column::UpdatedAt, bumped_updated_at(now()))
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("User: {id}")));
        }

        let user = self.get_by_id(id).await?;
        debug!(user_id = id, sign_in_count = user.sign_in_count, "Recorded sign-in");
        Ok(user)
    }

    /// Store a password-reset token and when it was issued.
    pub async fn set_reset_password_token(
        &self,
        id: i32,
        token: &str,
        at: DateTimeWithTimeZone,
    ) -> AppResult<user::Model> {
        let user = self.get_by_id(id).await?;

        let mut active: user::ActiveModel = user.into();
        active.reset_password_token = Set(Some(token.to_string()));
        active.reset_password_sent_at = Set(Some(at));

        let user = active.update(self.db.as_ref()).await?;
        debug!(user_id = id, "Issued password reset token");
        Ok(user)
    }
}
