//! REST API controllers.

pub mod attachment_controller;
pub mod health_controller;
pub mod help_request_controller;
pub mod responder_controller;
pub mod task_controller;
pub mod user_controller;

pub use health_controller::*;
