//! # Relief Core
//!
//! Core types, errors, and domain records for Relief Hub.
//! This crate provides the foundational abstractions shared by the storage,
//! service, and REST layers.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
