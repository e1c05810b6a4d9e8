//! Input validation helpers shared across layers.
//!
//! - [`slug`] - Slug alphabet, generation and custom slug rules
//! - [`url_validator`] - Destination URL validation

pub mod slug;
pub mod url_validator;
