//! Typed, prefixed ID wrappers for domain records.
//!
//! Document ids are stored as plain strings (`req-<uuid>`, `task-<uuid>`) so
//! they stay readable in the backing stores.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

macro_rules! prefixed_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Prefix shared by every id of this kind.
            pub const PREFIX: &'static str = $prefix;

            /// Creates a new random id.
            #[must_use]
            pub fn new() -> Self {
                Self(format!("{}-{}", Self::PREFIX, Uuid::new_v4()))
            }

            /// Wraps an existing id string without checking its prefix.
            #[must_use]
            pub fn from_string(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the id as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the id carries the expected prefix.
            #[must_use]
            pub fn has_prefix(&self) -> bool {
                self.0
                    .strip_prefix(Self::PREFIX)
                    .is_some_and(|rest| rest.starts_with('-') && rest.len() > 1)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

prefixed_id!(
    /// Identifier of a help request (`req-<uuid>`).
    RequestId,
    "req"
);

prefixed_id!(
    /// Identifier of the chat room opened for a help request (`room-<uuid>`).
    ChatRoomId,
    "room"
);

prefixed_id!(
    /// Identifier of a task (`task-<uuid>`).
    TaskId,
    "task"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_carry_prefix() {
        assert!(RequestId::new().as_str().starts_with("req-"));
        assert!(ChatRoomId::new().as_str().starts_with("room-"));
        assert!(TaskId::new().as_str().starts_with("task-"));
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(TaskId::new(), TaskId::new());
    }

    #[test]
    fn test_has_prefix() {
        assert!(RequestId::new().has_prefix());
        assert!(!RequestId::from_string("task-123").has_prefix());
        assert!(!RequestId::from_string("req-").has_prefix());
        assert!(!RequestId::from_string("request-1").has_prefix());
    }

    #[test]
    fn test_serde_transparent() {
        let id = TaskId::from_string("task-abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"task-abc\"");
        let back: TaskId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
