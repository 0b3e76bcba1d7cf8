//! User profile service trait definition.

use crate::dto::UserDocument;
use async_trait::async_trait;
use relief_core::{Interface, ReliefResult};
use serde_json::Value;

/// Free-form user profiles kept in the realtime store.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Reads a user profile.
    async fn get_user(&self, id: &str) -> ReliefResult<UserDocument>;

    /// Stores a new profile under its `id` field, or a millisecond timestamp.
    async fn create_user(&self, data: Value) -> ReliefResult<UserDocument>;

    /// Merges fields into a profile, creating it if absent.
    async fn update_user(&self, id: &str, data: Value) -> ReliefResult<UserDocument>;

    /// Removes a profile.
    async fn delete_user(&self, id: &str) -> ReliefResult<()>;
}
