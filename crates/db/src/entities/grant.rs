//! OAuth2 authorization grant entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::base::{BaseColumns, split_spaced};

/// Short-lived authorization code model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "grant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    #[sea_orm(column_type = "String(StringLen::N(40))")]
    pub client_id: String,

    /// The authorization code.
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub code: String,

    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub redirect_uri: Option<String>,

    #[sea_orm(nullable)]
    pub expires: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_name = "_scopes", column_type = "Text", nullable)]
    pub raw_scopes: Option<String>,

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
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::ClientId"
    )]
    Client,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
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
    /// Scopes approved for this code, in stored order.
    #[must_use]
    pub fn scopes(&self) -> Vec<&str> {
        split_spaced(self.raw_scopes.as_deref())
    }

    /// Whether the code has expired at `now`. Codes without expiry never do.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTimeWithTimeZone) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}
