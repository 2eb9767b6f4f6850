use hueseum_common::{Dimensions, PixelSample, Result, codec::image_dimensions};
use outline::OutlineParams;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use swatch::{Palette, PaletteOptions};
use tracing::instrument;

/// One operation on one image
#[derive(
    Debug, Clone,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq
)]
#[serde(tag = "type", content = "params")]
#[strum(serialize_all = "snake_case")]
pub enum ImageCommand {
    /// Dominant colours by k-means clustering
    #[serde(rename = "extract_palette")]
    ExtractPalette {
        #[schemars(range(min = 1, max = 24))]
        size: usize,
    },

    /// Exact colour of a single pixel
    #[serde(rename = "pixel_color")]
    PixelColor { x: i64, y: i64 },

    /// Width and height, read from the image header
    #[serde(rename = "dimensions")]
    Dimensions,

    /// Fixed-parameter raster outline (PNG)
    #[serde(rename = "coloring_book_outline")]
    ColoringBookOutline,

    /// Tunable vector outline (SVG)
    #[serde(rename = "vector_outline")]
    VectorOutline(OutlineParams),
}

impl ImageCommand {
    /// Get the JSON schema for all commands
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ImageCommand)
    }

    /// Get a list of all available command names
    pub fn command_names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ExtractPalette { .. } => "Cluster the image's pixels and list the dominant colours, most prevalent first",
            Self::PixelColor { .. } => "Read the exact RGB and hex colour at one pixel",
            Self::Dimensions => "Report the image's width and height",
            Self::ColoringBookOutline => "Render black-on-white coloring-book line art as a PNG",
            Self::VectorOutline(_) => "Trace the image's edges into SVG paths with tunable edge detection",
        }
    }

    /// (name, description, required) for each parameter
    pub fn parameters_info(&self) -> Vec<(&'static str, &'static str, bool)> {
        match self {
            Self::ExtractPalette { .. } => vec![
                ("size", "Number of colours to extract (1-24, clamped to the distinct colours present)", true),
            ],
            Self::PixelColor { .. } => vec![
                ("x", "Column, 0 <= x < width", true),
                ("y", "Row, 0 <= y < height", true),
            ],
            Self::Dimensions | Self::ColoringBookOutline => vec![],
            Self::VectorOutline(_) => vec![
                ("blur_kernel", "Gaussian blur kernel size, bumped to odd (0-99, default 3)", false),
                ("canny_low", "Lower Canny threshold (default 50)", false),
                ("canny_high", "Upper Canny threshold (default 150)", false),
                ("dilate_iterations", "Dilation passes and stroke width; 0 disables dilation (default 1)", false),
            ],
        }
    }

    /// Run the command against encoded image bytes. Blocking and CPU-bound.
    #[instrument(skip(bytes, options), fields(command = %self, len = bytes.len()))]
    pub fn execute(&self, bytes: &[u8], options: &PaletteOptions) -> Result<Artifact> {
        let artifact = match self {
            Self::ExtractPalette { size } => {
                Artifact::Palette(swatch::extract_palette(bytes, *size, options)?)
            }
            Self::PixelColor { x, y } => Artifact::Pixel(swatch::probe_pixel(bytes, *x, *y)?),
            Self::Dimensions => Artifact::Dimensions(image_dimensions(bytes)?),
            Self::ColoringBookOutline => {
                Artifact::Png(outline::generate_coloring_book_outline(bytes)?)
            }
            Self::VectorOutline(params) => {
                Artifact::Svg(outline::generate_vector_outline(bytes, params)?)
            }
        };
        Ok(artifact)
    }
}

/// What a command produces
#[derive(Debug, Clone, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Artifact {
    Palette(Palette),
    Pixel(PixelSample),
    Dimensions(Dimensions),
    Png(Vec<u8>),
    Svg(String),
}

impl Artifact {
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Palette(_) | Self::Pixel(_) | Self::Dimensions(_) => "application/json",
            Self::Png(_) => "image/png",
            Self::Svg(_) => "image/svg+xml",
        }
    }

    /// Suggested download name for file artifacts
    pub fn filename(&self) -> Option<&'static str> {
        match self {
            Self::Png(_) => Some("outline.png"),
            Self::Svg(_) => Some("custom-outline.svg"),
            _ => None,
        }
    }
}
