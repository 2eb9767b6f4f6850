//! # Hueseum
//!
//! Request layer over the [`swatch`] palette and [`outline`] line-art pipelines.
//! Every surface funnels into one dispatch, [`ImageCommand::execute`], which turns
//! encoded image bytes into an [`Artifact`]:
//!
//! - an axum HTTP API ([`server::build_router`])
//! - an MCP tool server over stdio ([`mcp::HueseumMcpServer`])
//!
//! ```rust,no_run
//! use hueseum::{config::ServerConfig, server};
//!
//! # async fn run() -> std::io::Result<()> {
//! server::serve(ServerConfig::default()).await
//! # }
//! ```

pub mod api;
pub mod command;
pub mod config;
pub mod error;
pub mod mcp;
pub mod server;

pub use command::{Artifact, ImageCommand};
pub use config::ServerConfig;
pub use error::ApiError;
