mod auth;
mod categories;
pub mod client;
mod currency;
mod expenses;
mod files;
mod imports;
mod notifications;
mod reports;
pub mod retry;
pub mod session;
pub mod types;
mod vendors;

pub use client::*;
pub use retry::RetryPolicy;
pub use session::{PersistedAuth, SessionStore};
pub use types::*;
