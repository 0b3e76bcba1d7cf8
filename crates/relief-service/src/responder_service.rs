//! Responder service trait definition.

use crate::dto::{RegisterResponderRequest, ResponderRegistered};
use async_trait::async_trait;
use relief_core::{Interface, Location, ReliefResult, ResponderKind};

/// Responder registration and live location tracking.
#[async_trait]
pub trait ResponderService: Interface + Send + Sync {
    /// Registers a responder profile in the collection for `kind`.
    async fn register(
        &self,
        kind: ResponderKind,
        request: RegisterResponderRequest,
    ) -> ReliefResult<ResponderRegistered>;

    /// Records the latest location of a user.
    async fn update_location(&self, user_id: &str, location: Location) -> ReliefResult<()>;

    /// Reads the latest location of a user.
    async fn get_location(&self, user_id: &str) -> ReliefResult<Location>;
}
