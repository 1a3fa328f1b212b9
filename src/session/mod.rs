//! Client-side session: persisted token/user and the auth state holder

pub mod auth;
pub mod store;

pub use auth::AuthSession;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
