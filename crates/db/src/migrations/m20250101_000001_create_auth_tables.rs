//! Create users, client, grant and token tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn created_at<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Users::EncryptedPassword)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Users::IsAdmin).integer())
                    .col(ColumnDef::new(Users::ResetPasswordToken).string_len(255))
                    .col(ColumnDef::new(Users::ResetPasswordSentAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Users::SignInCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::CurrentSignInAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::LastSignInAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(Users::CurrentSignInIp).string_len(255))
                    .col(ColumnDef::new(Users::LastSignInIp).string_len(255))
                    .col(ColumnDef::new(Users::Role).integer())
                    .col(ColumnDef::new(Users::AffiliateId).integer())
                    .col(ColumnDef::new(Users::AdvertiserId).integer())
                    .col(ColumnDef::new(Users::Usertype).integer())
                    .col(ColumnDef::new(Users::Username).string_len(255))
                    .col(ColumnDef::new(Users::Company).string_len(255))
                    .col(created_at(Users::CreatedAt))
                    .col(created_at(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create client table
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Client::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Client::ClientId)
                            .string_len(40)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Client::ClientSecret).string_len(50).not_null())
                    .col(ColumnDef::new(Client::UserId).integer())
                    .col(ColumnDef::new(Client::RedirectUris).text())
                    .col(ColumnDef::new(Client::DefaultScopes).text())
                    .col(created_at(Client::CreatedAt))
                    .col(created_at(Client::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_user")
                            .from(Client::Table, Client::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_client_user_id")
                    .table(Client::Table)
                    .col(Client::UserId)
                    .to_owned(),
            )
            .await?;

        // Create grant table
        manager
            .create_table(
                Table::create()
                    .table(Grant::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Grant::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Grant::UserId).integer().not_null())
                    .col(ColumnDef::new(Grant::ClientId).string_len(40).not_null())
                    .col(ColumnDef::new(Grant::Code).string_len(255).not_null())
                    .col(ColumnDef::new(Grant::RedirectUri).string_len(255))
                    .col(ColumnDef::new(Grant::Expires).timestamp_with_time_zone())
                    .col(ColumnDef::new(Grant::Scopes).text())
                    .col(created_at(Grant::CreatedAt))
                    .col(created_at(Grant::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grant_user")
                            .from(Grant::Table, Grant::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_grant_client")
                            .from(Grant::Table, Grant::ClientId)
                            .to(Client::Table, Client::ClientId),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (client_id, code) for code exchange
        manager
            .create_index(
                Index::create()
                    .name("idx_grant_client_id_code")
                    .table(Grant::Table)
                    .col(Grant::ClientId)
                    .col(Grant::Code)
                    .to_owned(),
            )
            .await?;

        // Create token table
        manager
            .create_table(
                Table::create()
                    .table(Token::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Token::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Token::UserId).integer())
                    .col(ColumnDef::new(Token::ClientId).string_len(40).not_null())
                    .col(ColumnDef::new(Token::TokenType).string_len(40))
                    .col(ColumnDef::new(Token::AccessToken).string_len(255).unique_key())
                    .col(ColumnDef::new(Token::RefreshToken).string_len(255).unique_key())
                    .col(ColumnDef::new(Token::Expires).timestamp_with_time_zone())
                    .col(ColumnDef::new(Token::Scopes).text())
                    .col(created_at(Token::CreatedAt))
                    .col(created_at(Token::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_token_user")
                            .from(Token::Table, Token::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_token_client")
                            .from(Token::Table, Token::ClientId)
                            .to(Client::Table, Client::ClientId),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: client_id
        manager
            .create_index(
                Index::create()
                    .name("idx_token_client_id")
                    .table(Token::Table)
                    .col(Token::ClientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Token::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Grant::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Client::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    EncryptedPassword,
    IsAdmin,
    ResetPasswordToken,
    ResetPasswordSentAt,
    SignInCount,
    CurrentSignInAt,
    LastSignInAt,
    CurrentSignInIp,
    LastSignInIp,
    Role,
    AffiliateId,
    AdvertiserId,
    Usertype,
    Username,
    Company,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Client {
    Table,
    Id,
    ClientId,
    ClientSecret,
    UserId,
    #[iden = "_redirect_uris"]
    RedirectUris,
    #[iden = "_default_scopes"]
    DefaultScopes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Grant {
    Table,
    Id,
    UserId,
    ClientId,
    Code,
    RedirectUri,
    Expires,
    #[iden = "_scopes"]
    Scopes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Token {
    Table,
    Id,
    UserId,
    ClientId,
    TokenType,
    AccessToken,
    RefreshToken,
    Expires,
    #[iden = "_scopes"]
    Scopes,
    CreatedAt,
    UpdatedAt,
}
