//! # Relief Server Library
//!
//! Wiring and startup utilities for the Relief Hub server.

pub mod app;
pub mod di;
pub mod startup;

pub use app::Application;
