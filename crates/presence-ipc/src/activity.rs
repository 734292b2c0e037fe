//! Typed activity payload.
//!
//! The session treats activity payloads as opaque JSON; this model mirrors
//! the fields the presence peer understands and serializes to exactly that
//! shape. Absent fields are omitted from the wire payload entirely — a
//! paused track, for example, simply carries no `timestamps`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// One presence update: what the user is doing right now.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Second line, typically `"Artist - Album"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// First line, typically the track title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Timestamps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Assets>,
}

/// Unix timestamps (seconds) bounding the activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timestamps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Artwork keys and hover text shown alongside the activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_text: Option<String>,
}

impl Activity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_timestamps(mut self, timestamps: Timestamps) -> Self {
        self.timestamps = Some(timestamps);
        self
    }

    pub fn with_assets(mut self, assets: Assets) -> Self {
        self.assets = Some(assets);
        self
    }

    /// Convert into the opaque JSON payload the session sends.
    pub fn into_value(self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_are_omitted() {
        let value = Activity::new()
            .with_state("A - B")
            .with_details("Song")
            .into_value()
            .unwrap();
        assert_eq!(value, json!({"state": "A - B", "details": "Song"}));
    }

    #[test]
    fn test_playing_track_payload_shape() {
        let value = Activity::new()
            .with_state("Unknown Artist - Unknown Album")
            .with_details("Song")
            .with_timestamps(Timestamps {
                start: None,
                end: Some(1_700_000_000),
            })
            .with_assets(Assets {
                large_image: Some("logo".into()),
                large_text: Some("Listening with mpv".into()),
                ..Assets::default()
            })
            .into_value()
            .unwrap();

        assert_eq!(value["timestamps"], json!({"end": 1_700_000_000}));
        assert_eq!(
            value["assets"],
            json!({"large_image": "logo", "large_text": "Listening with mpv"})
        );
    }

    #[test]
    fn test_roundtrip_through_json() {
        let activity = Activity::new()
            .with_state("A - B")
            .with_timestamps(Timestamps {
                start: Some(1),
                end: Some(2),
            });
        let value = serde_json::to_value(&activity).unwrap();
        let back: Activity = serde_json::from_value(value).unwrap();
        assert_eq!(back, activity);
    }
}
