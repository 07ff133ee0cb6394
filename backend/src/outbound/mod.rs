//! Outbound adapters implementing the driven domain ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel.
//! - **memory**: in-process repositories for database-less runs and tests.
//! - **security**: Argon2 password hashing and JWT session tokens.
//!
//! Adapters translate between domain types and infrastructure types. They hold
//! no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
