//! OAuth2 client entity.

use std::fmt;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::{BaseColumns, split_spaced};

/// OAuth2 client type. Every registered client is public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    /// Cannot keep its secret confidential.
    Public,
}

impl ClientType {
    /// Wire name of the client type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
        }
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OAuth2 client application model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public client identifier. Referenced by grants and tokens.
    #[sea_orm(column_type = "String(StringLen::N(40))", unique)]
    pub client_id: String,

    #[sea_orm(column_type = "String(StringLen::N(50))")]
    #[serde(skip_serializing, default)]
    pub client_secret: String,

    /// Owning user.
    #[sea_orm(nullable)]
    pub user_id: Option<i32>,

    /// Whitespace-delimited redirect URIs. Read through [`Model::redirect_uris`].
    #[sea_orm(column_name = "_redirect_uris", column_type = "Text", nullable)]
    pub raw_redirect_uris: Option<String>,

    /// Whitespace-delimited scopes. Read through [`Model::default_scopes`].
    #[sea_orm(column_name = "_default_scopes", column_type = "Text", nullable)]
    pub raw_default_scopes: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::grant::Entity")]
    Grants,
    #[sea_orm(has_many = "super::token::Entity")]
    Tokens,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
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

impl Model {
    /// Always [`ClientType::Public`].
    #[must_use]
    pub const fn client_type(&self) -> ClientType {
        ClientType::Public
    }

    /// Registered redirect URIs, in stored order.
    #[must_use]
    pub fn redirect_uris(&self) -> Vec<&str> {
        split_spaced(self.raw_redirect_uris.as_deref())
    }

    /// First registered redirect URI, or `None` when none are registered.
    #[must_use]
    pub fn default_redirect_uri(&self) -> Option<&str> {
        self.redirect_uris().first().copied()
    }

    /// Scopes granted when a request names none.
    #[must_use]
    pub fn default_scopes(&self) -> Vec<&str> {
        split_spaced(self.raw_default_scopes.as_deref())
    }
}
