//! User service implementation.

use crate::dto::UserDocument;
use crate::user_service::UserService;
use async_trait::async_trait;
use chrono::Utc;
use relief_core::{ReliefError, ReliefResult};
use relief_storage::{Record, Store};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Realtime base path of user profiles.
pub const USERS_PATH: &str = "users";

/// User service over the realtime store.
pub struct UserServiceImpl {
    users: Arc<dyn Store<Input = Value, Output = Record>>,
}

impl UserServiceImpl {
    pub fn new(users: Arc<dyn Store<Input = Value, Output = Record>>) -> Self {
        Self { users }
    }
}

/// The profile's own `id` (string or number), else the current epoch millis.
fn user_id(data: &Value) -> String {
    match data.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => Utc::now().timestamp_millis().to_string(),
    }
}

fn require_object(data: &Value) -> ReliefResult<()> {
    if data.is_object() {
        Ok(())
    } else {
        Err(ReliefError::validation("user must be a JSON object"))
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn get_user(&self, id: &str) -> ReliefResult<UserDocument> {
        self.users
            .read(id)
            .await?
            .map(UserDocument::from)
            .ok_or_else(|| ReliefError::not_found("User", id))
    }

    async fn create_user(&self, data: Value) -> ReliefResult<UserDocument> {
        require_object(&data)?;
        let id = user_id(&data);
        let record = self.users.create(&id, data).await?;

        info!(user_id = %id, "User created");
        Ok(record.into())
    }

    async fn update_user(&self, id: &str, data: Value) -> ReliefResult<UserDocument> {
        require_object(&data)?;
        self.users
            .update(id, data)
            .await?
            .map(UserDocument::from)
            .ok_or_else(|| ReliefError::not_found("User", id))
    }

    async fn delete_user(&self, id: &str) -> ReliefResult<()> {
        if !self.users.delete(id).await? {
            return Err(ReliefError::not_found("User", id));
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
