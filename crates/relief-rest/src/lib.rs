//! # Relief REST
//!
//! REST API layer using Axum for Relief Hub.
//! Provides the help request, task, responder and attachment endpoints behind
//! a read-through response cache, plus health checks.

pub mod controllers;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
pub use middleware::{CachePolicy, ResponseCache};
