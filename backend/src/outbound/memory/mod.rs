//! In-process adapters used when no database is configured and by tests.
//!
//! Each repository keeps its records behind a single `RwLock`, so every port
//! call is atomic with respect to the others.

mod post_repository;
mod user_repository;

pub use post_repository::InMemoryPostRepository;
pub use user_repository::InMemoryUserRepository;

fn poisoned(store: &str) -> String {
    format!("{store} store lock poisoned")
}
