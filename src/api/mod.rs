//! HTTP layer: translates requests into service calls and formats responses.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - One handler per endpoint
//! - [`middleware`] - Tracing and CORS layers
//! - [`routes`] - JSON route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
