use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use swatch::PaletteOptions;

/// 25 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Runtime settings of the HTTP service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by CORS
    pub allowed_origins: Vec<String>,
    /// Largest accepted request body, base64 overhead included
    pub max_body_bytes: usize,
    pub palette: PaletteOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            palette: PaletteOptions::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, resolved by the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
