//! Domain records for disaster-response coordination.

mod help_request;
mod responder;
mod task;

pub use help_request::*;
pub use responder::*;
pub use task::*;

use serde::{Deserialize, Serialize};

/// Kind of media attached to a request or task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Audio,
    Video,
    Document,
}

/// A reference to media stored elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: String,
}

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_wire_format() {
        let attachment = Attachment {
            kind: AttachmentKind::Image,
            url: "https://cdn.example.org/a.png".to_string(),
        };
        let json = serde_json::to_value(&attachment).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["url"], "https://cdn.example.org/a.png");
    }
}
