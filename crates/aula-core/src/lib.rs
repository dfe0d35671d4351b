//! Ambient service plumbing shared across the workspace: health endpoint,
//! request-id layer, tracing setup, serialization helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
