//! User entity.

use std::fmt;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use portal_common::{AppError, AppResult};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::BaseColumns;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub email: String,

    /// Argon2 PHC string.
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    #[serde(skip_serializing, default)]
    pub encrypted_password: String,

    /// Non-zero means admin.
    #[sea_orm(nullable)]
    pub is_admin: Option<i32>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    #[serde(skip_serializing, default)]
    pub reset_password_token: Option<String>,

    #[sea_orm(nullable)]
    pub reset_password_sent_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(default_value = 0)]
    pub sign_in_count: i32,

    #[sea_orm(nullable)]
    pub current_sign_in_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(nullable)]
    pub last_sign_in_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub current_sign_in_ip: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub last_sign_in_ip: Option<String>,

    #[sea_orm(nullable)]
    pub role: Option<i32>,

    #[sea_orm(nullable)]
    pub affiliate_id: Option<i32>,

    #[sea_orm(nullable)]
    pub advertiser_id: Option<i32>,

    #[sea_orm(nullable)]
    pub usertype: Option<i32>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub username: Option<String>,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub company: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::client::Entity")]
    Clients,
    #[sea_orm(has_many = "super::grant::Entity")]
    Grants,
    #[sea_orm(has_many = "super::token::Entity")]
    Tokens,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Clients.def()
    }
}

impl Related<super::grant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Grants.def()
    }
}

impl Related<super::token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tokens.def()
    }
}

impl BaseColumns for ActiveModel {
    const CREATED_AT: Column = Column::CreatedAt;
    const UPDATED_AT: Column = Column::UpdatedAt;
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(super::base::stamp(self, insert))
    }
}

/// Public view of a user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i32,
    pub email: String,
    pub username: Option<String>,
    pub current_ip: Option<String>,
}

impl Model {
    /// Public view without credentials or counters.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            current_ip: self.current_sign_in_ip.clone(),
        }
    }

    /// A loaded user is always authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        true
    }

    /// Users are never deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        true
    }

    /// Identifier for session storage.
    #[must_use]
    pub const fn get_id(&self) -> i32 {
        self.id
    }

    /// Whether the admin flag is set to a non-zero value.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin.is_some_and(|flag| flag != 0)
    }

    /// Check a plaintext password against `encrypted_password`.
    pub fn verify_password(&self, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&self.encrypted_password)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {e}")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.username.as_deref().unwrap_or(&self.email))
    }
}

/// Hash a password using Argon2 for storage in `encrypted_password`.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_user() -> Model {
        Model {
            id: 7,
            email: "alice@example.com".to_string(),
            encrypted_password: hash_password("hunter2").unwrap(),
            is_admin: None,
            reset_password_token: Some("reset".to_string()),
            reset_password_sent_at: None,
            sign_in_count: 3,
            current_sign_in_at: None,
            last_sign_in_at: None,
            current_sign_in_ip: Some("10.0.0.1".to_string()),
            last_sign_in_ip: None,
            role: None,
            affiliate_id: None,
            advertiser_id: None,
            usertype: None,
            username: Some("alice".to_string()),
            company: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_summary() {
        let user = create_test_user();
        let summary = user.summary();

        assert_eq!(
            summary,
            UserSummary {
                id: 7,
                email: "alice@example.com".to_string(),
                username: Some("alice".to_string()),
                current_ip: Some("10.0.0.1".to_string()),
            }
        );
    }

    #[test]
    fn test_serialization_omits_secrets() {
        let user = create_test_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("encrypted_password").is_none());
        assert!(json.get("reset_password_token").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }

    #[test]
    fn test_session_helpers() {
        let mut user = create_test_user();
        assert!(user.is_authenticated());
        assert!(user.is_active());
        assert_eq!(user.get_id(), 7);

        assert!(!user.is_admin());
        user.is_admin = Some(0);
        assert!(!user.is_admin());
        user.is_admin = Some(1);
        assert!(user.is_admin());
    }

    #[test]
    fn test_display_prefers_username() {
        let mut user = create_test_user();
        assert_eq!(user.to_string(), "alice");

        user.username = None;
        assert_eq!(user.to_string(), "alice@example.com");
    }

    #[test]
    fn test_password_round_trip() {
        let user = create_test_user();
        assert!(user.encrypted_password.starts_with("$argon2"));
        assert!(user.verify_password("hunter2").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn test_verify_password_rejects_malformed_hash() {
        let mut user = create_test_user();
        user.encrypted_password = "not-a-hash".to_string();
        assert!(matches!(
            user.verify_password("hunter2"),
            Err(AppError::Internal(_))
        ));
    }
}
