//! # Relief Service
//!
//! Business services for help requests, tasks, responders, users and
//! attachments, plus the key/value cache abstraction the response cache is built on.

pub mod attachment_service;
pub mod cache;
pub mod dto;
pub mod help_request_service;
pub mod service_impl;
pub mod responder_service;
pub mod task_service;
pub mod user_service;

pub use attachment_service::*;
pub use cache::*;
pub use dto::*;
pub use help_request_service::*;
pub use service_impl::*;
pub use responder_service::*;
pub use task_service::*;
pub use user_service::*;
