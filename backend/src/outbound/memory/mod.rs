//! In-memory adapters for the repository ports.
//!
//! Used when no database URL is configured (development mode) and by the
//! HTTP tests. Each adapter guards its table with a `tokio::sync::RwLock`;
//! every mutation happens under a single write lock, so email uniqueness
//! and whole-patch updates are atomic just as in PostgreSQL.

mod assets;
mod login_events;
mod users;

pub use assets::InMemoryAssetRepository;
pub use login_events::InMemoryLoginEventRepository;
pub use users::InMemoryUserRepository;
