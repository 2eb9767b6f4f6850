use base64::{Engine, engine::general_purpose::STANDARD};

use crate::Result;

/// Image payload as it arrives at a request surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageInput {
    /// Raw uploaded bytes
    Raw(Vec<u8>),
    /// Plain base64 or a `data:<mime>;base64,<payload>` URL
    Base64(String),
}

impl ImageInput {
    /// Normalise the payload to the encoded image bytes
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Self::Raw(bytes) => Ok(bytes),
            Self::Base64(payload) => decode_base64_payload(&payload),
        }
    }
}

impl From<Vec<u8>> for ImageInput {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Raw(bytes)
    }
}

impl From<String> for ImageInput {
    fn from(payload: String) -> Self {
        Self::Base64(payload)
    }
}

/// Remove a `data:...;base64,` header, up to and including the first comma
pub fn strip_data_url(payload: &str) -> &str {
    let trimmed = payload.trim();
    if trimmed.starts_with("data:") {
        if let Some((_, data)) = trimmed.split_once(',') {
            return data;
        }
    }
    trimmed
}

/// Decode base64 (optionally data-URL wrapped) into bytes
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>> {
    let data = strip_data_url(payload);
    // Line-wrapped base64 is common when the payload was pasted
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact.as_bytes())?)
}

/// Encode bytes as standard base64
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
