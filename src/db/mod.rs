//! Account persistence.
//!
//! `Storage` is the capability the rest of the server depends on.
//! `PgStorage` backs it with PostgreSQL and `InMemoryStorage` with a map.

pub mod memory;
pub mod models;
pub mod postgres;
pub mod storage;

pub use memory::InMemoryStorage;
pub use models::{Account, CreateAccountRequest, LoginRequest, LoginResponse, NewAccount};
pub use postgres::PgStorage;
pub use storage::Storage;
