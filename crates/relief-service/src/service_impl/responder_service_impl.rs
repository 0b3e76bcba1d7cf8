//! Responder service implementation.

use crate::dto::{RegisterResponderRequest, ResponderRegistered};
use crate::responder_service::ResponderService;
use async_trait::async_trait;
use chrono::Utc;
use relief_core::{Location, ReliefError, ReliefResult, ResponderKind, ResponderProfile};
use relief_storage::{DocumentCollection, Record, Store};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Realtime base path of user locations.
pub const LOCATIONS_PATH: &str = "userLocations";

/// Responder service over the two profile collections and the realtime
/// location store.
pub struct ResponderServiceImpl {
    first_responders: Arc<dyn DocumentCollection>,
    volunteers: Arc<dyn DocumentCollection>,
    locations: Arc<dyn Store<Input = Value, Output = Record>>,
}

impl ResponderServiceImpl {
    pub fn new(
        first_responders: Arc<dyn DocumentCollection>,
        volunteers: Arc<dyn DocumentCollection>,
        locations: Arc<dyn Store<Input = Value, Output = Record>>,
    ) -> Self {
        Self {
            first_responders,
            volunteers,
            locations,
        }
    }

    fn profiles(&self, kind: ResponderKind) -> &Arc<dyn DocumentCollection> {
        match kind {
            ResponderKind::FirstResponder => &self.first_responders,
            ResponderKind::Volunteer => &self.volunteers,
        }
    }
}

fn require_user_id(user_id: &str) -> ReliefResult<()> {
    if user_id.trim().is_empty() {
        return Err(ReliefError::validation("userId is required"));
    }
    Ok(())
}

#[async_trait]
impl ResponderService for ResponderServiceImpl {
    async fn register(
        &self,
        kind: ResponderKind,
        request: RegisterResponderRequest,
    ) -> ReliefResult<ResponderRegistered> {
        require_user_id(&request.user_id)?;

        let profile = ResponderProfile {
            user_id: request.user_id,
            name: request.name,
            skills: request.skills,
            contact: request.contact,
            created_at: Utc::now(),
        };
        self.profiles(kind)
            .create(&profile.user_id, serde_json::to_value(&profile)?)
            .await?;

        info!(user_id = %profile.user_id, collection = kind.collection(), "Responder registered");
        Ok(ResponderRegistered {
            user_id: profile.user_id,
            created_at: profile.created_at,
        })
    }

    async fn update_location(&self, user_id: &str, location: Location) -> ReliefResult<()> {
        require_user_id(user_id)?;
        debug!(user_id, lat = location.lat, lng = location.lng, "Updating location");

        self.locations
            .update(user_id, serde_json::to_value(&location)?)
            .await?;
        Ok(())
    }

    async fn get_location(&self, user_id: &str) -> ReliefResult<Location> {
        self.locations
            .read(user_id)
            .await?
            .ok_or_else(|| ReliefError::not_found("Location", user_id))?
            .parse()
    }
}
