//! Core domain entities.
//!
//! - [`Link`] - A stored slug-to-URL mapping with its click counter
//! - [`NewLink`] - Input for creating a link
//! - [`InsertOutcome`] - Typed result of the atomic conditional insert
//! - [`SlugClicks`] / [`StoreSummary`] - Read models for statistics

pub mod link;

pub use link::{InsertOutcome, Link, NewLink, SlugClicks, StoreSummary};
