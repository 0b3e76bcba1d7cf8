//! Responder profiles and live locations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two responder populations, each kept in its own collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponderKind {
    FirstResponder,
    Volunteer,
}

impl ResponderKind {
    /// Document collection holding profiles of this kind.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::FirstResponder => "firstResponders",
            Self::Volunteer => "volunteers",
        }
    }
}

/// A responder profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponderProfile {
    pub user_id: String,
    pub name: String,
    pub skills: Vec<String>,
    pub contact: String,
    pub created_at: DateTime<Utc>,
}

/// Last reported position of a responder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    /// Client-reported ISO-8601 timestamp.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collections() {
        assert_eq!(ResponderKind::FirstResponder.collection(), "firstResponders");
        assert_eq!(ResponderKind::Volunteer.collection(), "volunteers");
    }
}
