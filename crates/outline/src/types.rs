use serde::{Deserialize, Serialize};

/// One traced border of an edge region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    /// Vertices in tracing order, integer pixel coordinates
    pub points: Vec<[i32; 2]>,
    /// Whether this border encloses a hole of its region rather than its outside
    pub is_hole: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedOutline {
    /// Every border found in the edge map, without hierarchy
    pub contours: Vec<Contour>,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

impl ComputedOutline {
    /// Total number of vertices over all contours
    pub fn vertex_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }
}

/// Stroke styling applied to every path of a vector outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: u32,
}

impl StrokeStyle {
    pub fn with_width(width: u32) -> Self {
        Self {
            width: width.max(1),
            ..Self::default()
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            width: 1,
        }
    }
}
