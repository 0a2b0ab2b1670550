//! Embedded images carried by orders and intake previews

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An image embedded as a `data:` URL
///
/// Produced by the capture surface at submission time, or by reading a card
/// photo. The payload is opaque to the rest of the crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attachment(String);

impl Attachment {
    /// Wrap an existing data URL
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Self(data_url.into())
    }

    /// Encode raw bytes as a base64 data URL
    pub fn from_bytes(media_type: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", media_type, STANDARD.encode(bytes)))
    }

    /// The full data URL
    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// Media type declared in the data URL header, if any
    pub fn media_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let header = rest.split(',').next()?;
        header.split(';').next().filter(|m| !m.is_empty())
    }

    /// Decode the payload when it is base64-encoded
    pub fn decode(&self) -> Option<Vec<u8>> {
        let (header, payload) = self.0.strip_prefix("data:")?.split_once(',')?;
        if !header.ends_with(";base64") {
            return None;
        }
        STANDARD.decode(payload).ok()
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_and_decode() {
        let att = Attachment::from_bytes("image/png", b"\x89PNG");
        assert!(att.as_data_url().starts_with("data:image/png;base64,"));
        assert_eq!(att.media_type(), Some("image/png"));
        assert_eq!(att.decode().unwrap(), b"\x89PNG".to_vec());
    }

    #[test]
    fn test_non_base64_payload() {
        let att = Attachment::from_data_url("data:text/plain,hello");
        assert_eq!(att.media_type(), Some("text/plain"));
        assert!(att.decode().is_none());
    }
}
