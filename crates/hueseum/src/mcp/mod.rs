use std::sync::Arc;

use hueseum_common::{ImageInput, input::encode_base64};
use outline::OutlineParams;
use rmcp::{
    handler::server::tool::IntoCallToolResult, model::{CallToolResult, Content, ServerCapabilities, ServerInfo}, schemars, tool, Error as McpError, ServerHandler
};
use serde::Deserialize;
use serde_json::json;
use strum::IntoEnumIterator;
use swatch::PaletteOptions;

use crate::command::{Artifact, ImageCommand};

/// Request carrying only an image
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ImageRequest {
    #[schemars(description = "Image as plain base64 or a data URL (data:image/png;base64,...)")]
    pub image_data: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PaletteRequest {
    #[schemars(description = "Image as plain base64 or a data URL (data:image/png;base64,...)")]
    pub image_data: String,
    #[schemars(
        description = "Number of colours to extract (default 12)",
        range(min = 1, max = 24)
    )]
    pub size: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PixelRequest {
    #[schemars(description = "Image as plain base64 or a data URL (data:image/png;base64,...)")]
    pub image_data: String,
    #[schemars(description = "Column, 0 <= x < width")]
    pub x: i64,
    #[schemars(description = "Row, 0 <= y < height")]
    pub y: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct VectorOutlineRequest {
    #[schemars(description = "Image as plain base64 or a data URL (data:image/png;base64,...)")]
    pub image_data: String,
    #[serde(flatten)]
    pub params: OutlineParams,
}

/// What a tool hands back to the client
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Json(serde_json::Value),
    Text(String),
    Failure(String),
}

impl IntoCallToolResult for ToolOutput {
    fn into_call_tool_result(self) -> Result<CallToolResult, McpError> {
        Ok(match self {
            ToolOutput::Json(value) => CallToolResult::success(vec![Content::text(
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
            )]),
            ToolOutput::Text(text) => CallToolResult::success(vec![Content::text(text)]),
            ToolOutput::Failure(message) => CallToolResult::error(vec![Content::text(message)]),
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> ToolOutput {
    match serde_json::to_value(value) {
        Ok(value) => ToolOutput::Json(value),
        Err(e) => ToolOutput::Failure(format!("Failed to serialize result: {e}")),
    }
}

/// Frame a command's outcome for the client; binary artifacts travel as base64
fn respond(result: Result<Artifact, String>) -> ToolOutput {
    let artifact = match result {
        Ok(artifact) => artifact,
        Err(message) => return ToolOutput::Failure(message),
    };
    let (content_type, filename) = (artifact.content_type(), artifact.filename());

    match artifact {
        Artifact::Palette(palette) => to_json(&json!({
            "palette": palette.entries,
            "count": palette.len(),
            "image_dimensions": palette.image_dimensions,
        })),
        Artifact::Pixel(sample) => to_json(&sample),
        Artifact::Dimensions(dims) => to_json(&dims),
        Artifact::Png(bytes) => ToolOutput::Json(json!({
            "content_type": content_type,
            "filename": filename,
            "data": encode_base64(&bytes),
        })),
        Artifact::Svg(svg) => ToolOutput::Text(svg),
    }
}

/// Human-readable listing of every command and its parameters
fn command_info() -> String {
    let mut info = String::new();
    info.push_str("Available ImageCommands:\n\n");

    for (i, name) in ImageCommand::command_names().iter().enumerate() {
        info.push_str(&format!("{}. {}\n", i + 1, name));
    }

    info.push_str("\nCommand Details:\n");
    for cmd in ImageCommand::iter() {
        info.push_str(&format!("\n- {}\n", cmd));
        info.push_str(&format!("  Description: {}\n", cmd.description()));

        let params = cmd.parameters_info();
        if !params.is_empty() {
            info.push_str("  Parameters:\n");
            for (name, desc, required) in params {
                let req_marker = if required { " (required)" } else { " (optional)" };
                info.push_str(&format!("    - {}{}: {}\n", name, req_marker, desc));
            }
        }
    }

    info
}

/// MCP server exposing the palette and outline pipelines as tools
#[derive(Clone)]
pub struct HueseumMcpServer {
    options: Arc<PaletteOptions>,
}

impl HueseumMcpServer {
    pub fn new() -> Self {
        Self::with_options(PaletteOptions::default())
    }

    pub fn with_options(options: PaletteOptions) -> Self {
        Self { options: Arc::new(options) }
    }

    /// Decode the payload and run one command on the blocking pool
    async fn run(&self, image_data: String, command: ImageCommand) -> Result<Artifact, String> {
        let bytes = ImageInput::from(image_data)
            .into_bytes()
            .map_err(|e| e.to_string())?;
        let options = self.options.clone();

        tokio::task::spawn_blocking(move || command.execute(&bytes, &options))
            .await
            .map_err(|e| format!("Processing task failed: {e}"))?
            .map_err(|e| e.to_string())
    }
}

impl Default for HueseumMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool(tool_box)]
impl HueseumMcpServer {
    #[tool(description = "Extract the dominant colours of an image, most prevalent first")]
    async fn extract_palette(&self, #[tool(aggr)] PaletteRequest { image_data, size }: PaletteRequest) -> ToolOutput {
        let command = ImageCommand::ExtractPalette { size: size.unwrap_or(12) };
        respond(self.run(image_data, command).await)
    }

    #[tool(description = "Read the exact colour of one pixel")]
    async fn get_pixel_color(&self, #[tool(aggr)] PixelRequest { image_data, x, y }: PixelRequest) -> ToolOutput {
        respond(self.run(image_data, ImageCommand::PixelColor { x, y }).await)
    }

    #[tool(description = "Get the width and height of an image")]
    async fn get_image_dimensions(&self, #[tool(aggr)] ImageRequest { image_data }: ImageRequest) -> ToolOutput {
        respond(self.run(image_data, ImageCommand::Dimensions).await)
    }

    #[tool(description = "Render a black-on-white coloring-book outline; returns the PNG as base64")]
    async fn generate_outline(&self, #[tool(aggr)] ImageRequest { image_data }: ImageRequest) -> ToolOutput {
        respond(self.run(image_data, ImageCommand::ColoringBookOutline).await)
    }

    #[tool(description = "Trace the image's edges into an SVG document with tunable blur, Canny thresholds and dilation")]
    async fn generate_vector_outline(
        &self,
        #[tool(aggr)] VectorOutlineRequest { image_data, params }: VectorOutlineRequest
    ) -> ToolOutput {
        respond(self.run(image_data, ImageCommand::VectorOutline(params)).await)
    }

    #[tool(description = "Get information about available commands and their parameters")]
    fn get_command_info(&self) -> String {
        command_info()
    }

    #[tool(description = "Get the JSON schema for ImageCommand")]
    fn get_command_schema(&self) -> String {
        let schema = ImageCommand::schema();
        serde_json::to_string_pretty(&schema)
            .unwrap_or_else(|e| format!("Failed to serialize schema: {}", e))
    }
}

#[tool(tool_box)]
impl ServerHandler for HueseumMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some("Hueseum Image Server - Extract colour palettes, probe pixels and turn photos into coloring-book outlines (PNG or SVG). Images are passed as base64 or data URLs.".into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hueseum_common::{Dimensions, PipelineError, codec::encode_png};
    use image::{DynamicImage, Rgb, RgbImage};

    fn encoded_image() -> String {
        let img = RgbImage::from_pixel(5, 4, Rgb([12, 34, 56]));
        encode_base64(&encode_png(&DynamicImage::ImageRgb8(img)).unwrap())
    }

    #[tokio::test]
    async fn test_run_accepts_data_urls() {
        let server = HueseumMcpServer::new();
        let payload = format!("data:image/png;base64,{}", encoded_image());
        let artifact = server.run(payload, ImageCommand::Dimensions).await.unwrap();
        assert_eq!(artifact, Artifact::Dimensions(Dimensions::new(5, 4)));
    }

    #[tokio::test]
    async fn test_run_reports_failures_as_text() {
        let server = HueseumMcpServer::new();
        let error = server
            .run(encoded_image(), ImageCommand::PixelColor { x: 5, y: 0 })
            .await
            .unwrap_err();
        assert_eq!(
            error,
            PipelineError::OutOfBounds { x: 5, y: 0, width: 5, height: 4 }.to_string()
        );

        assert!(server.run("%%%".to_string(), ImageCommand::Dimensions).await.is_err());
    }

    #[test]
    fn test_png_is_returned_as_base64() {
        let ToolOutput::Json(value) = respond(Ok(Artifact::Png(vec![1, 2, 3]))) else {
            panic!("expected JSON output");
        };
        assert_eq!(value["content_type"], "image/png");
        assert_eq!(value["filename"], "outline.png");
        assert_eq!(value["data"], "AQID");
    }

    #[test]
    fn test_svg_and_failures() {
        assert_eq!(respond(Ok(Artifact::Svg("<svg/>".into()))), ToolOutput::Text("<svg/>".into()));
        assert_eq!(respond(Err("boom".into())), ToolOutput::Failure("boom".into()));
    }

    #[test]
    fn test_command_info_lists_parameters() {
        let info = command_info();
        assert!(info.contains("1. extract_palette"));
        assert!(info.contains("- vector_outline"));
        assert!(info.contains("blur_kernel (optional)"));
        assert!(info.contains("x (required)"));
    }
}
