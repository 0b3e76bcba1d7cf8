//! Data Transfer Objects (DTOs).

mod help_request_dto;
mod responder_dto;
mod task_dto;
mod user_dto;

pub use help_request_dto::*;
pub use responder_dto::*;
pub use task_dto::*;
pub use user_dto::*;
