//! Authentication for the bank server.
//!
//! Passwords are stored as argon2 hashes, login issues an HS256 token that
//! names the account number, and `/account/{id}` requests are only
//! admitted when that number matches the account stored under `id`.

pub mod handlers;
pub mod middleware;
pub mod password;
pub mod service;
pub mod token;

pub use middleware::require_account_token;
pub use service::AuthService;
pub use token::{Claims, TokenIssuer};
