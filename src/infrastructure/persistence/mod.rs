//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! - [`PgLinkRepository`] - Link storage, lookups and click counters

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
