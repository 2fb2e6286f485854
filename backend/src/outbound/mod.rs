//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories for database-free deployments and
//!   tests.
//! - **security**: Argon2id password hashing.
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
