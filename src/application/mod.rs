//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and business rules and
//! expose a small API to HTTP handlers and the admin CLI.
//!
//! - [`services::AllocationService`] - Custom and generated slug allocation
//! - [`services::RedirectService`] - Slug resolution and click dispatch
//! - [`services::StatsService`] - Click count reconciliation and listings

pub mod services;
