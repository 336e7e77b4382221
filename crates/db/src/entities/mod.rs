//! Database entities.

pub mod base;
pub mod client;
pub mod grant;
pub mod token;
pub mod user;

pub use client::Entity as Client;
pub use grant::Entity as Grant;
pub use token::Entity as Token;
pub use user::Entity as User;
