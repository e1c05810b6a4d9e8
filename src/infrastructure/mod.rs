//! Infrastructure layer for external integrations.
//!
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`verification`] - Bot verification clients

pub mod persistence;
pub mod verification;
