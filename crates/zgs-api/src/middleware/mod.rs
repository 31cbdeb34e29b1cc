//! # Middleware
//!
//! Tower layers applied to the whole router.

pub mod tracing_layer;
