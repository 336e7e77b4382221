//! Repositories for database access.

pub mod client;
pub mod grant;
pub mod token;
pub mod user;

pub use client::ClientRepository;
pub use grant::GrantRepository;
pub use token::TokenRepository;
pub use user::UserRepository;
