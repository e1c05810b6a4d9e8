//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`click_event`] - Click accounting event model
//! - [`click_worker`] - Asynchronous click processing worker
//! - [`history`] - Client-side history model and count reconciliation
//!
//! # Click Processing Flow
//!
//! 1. The redirect service resolves a slug
//! 2. A [`click_event::ClickEvent`] is offered to a bounded channel without waiting
//! 3. [`click_worker::run_click_worker`] applies the increment in the background
//! 4. Failures are logged and dropped; the redirect has already been served

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod history;
pub mod repositories;
