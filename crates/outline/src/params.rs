use hueseum_common::{PipelineError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest blur kernel a request may ask for
pub const MAX_BLUR_KERNEL: i32 = 99;

/// Tunable parameters of the vector outline, as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutlineParams {
    /// Gaussian blur kernel size; even values are bumped to the next odd one
    #[schemars(range(min = 0, max = 99))]
    pub blur_kernel: i32,
    /// Lower hysteresis threshold of the edge detector
    #[schemars(range(min = 0.0))]
    pub canny_low: f32,
    /// Upper hysteresis threshold of the edge detector
    #[schemars(range(min = 0.0))]
    pub canny_high: f32,
    /// Dilation passes thickening the edges; 0 or less disables dilation
    pub dilate_iterations: i32,
}

impl Default for OutlineParams {
    fn default() -> Self {
        Self {
            blur_kernel: 3,
            canny_low: 50.0,
            canny_high: 150.0,
            dilate_iterations: 1,
        }
    }
}

/// Parameters after validation and coercion, ready to build a pipeline from
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSettings {
    /// Always odd
    pub blur_kernel: usize,
    pub canny_low: f32,
    pub canny_high: f32,
    pub dilate_iterations: u8,
    pub stroke_width: u32,
}

impl Default for EdgeSettings {
    fn default() -> Self {
        Self {
            blur_kernel: 3,
            canny_low: 50.0,
            canny_high: 150.0,
            dilate_iterations: 1,
            stroke_width: 1,
        }
    }
}

impl OutlineParams {
    /// Nearest odd kernel size not smaller than the requested one
    pub fn effective_blur_kernel(&self) -> i32 {
        if self.blur_kernel % 2 == 0 {
            self.blur_kernel + 1
        } else {
            self.blur_kernel
        }
    }

    /// Stroke width of the emitted paths, tracking the dilation thickness
    pub fn stroke_width(&self) -> u32 {
        self.dilate_iterations.max(1).unsigned_abs()
    }

    pub fn validate(&self) -> Result<EdgeSettings> {
        if !(0..=MAX_BLUR_KERNEL).contains(&self.blur_kernel) {
            return Err(PipelineError::invalid_parameter(format!(
                "blur_kernel must be between 0 and {MAX_BLUR_KERNEL}, got {}",
                self.blur_kernel
            )));
        }
        for (name, value) in [("canny_low", self.canny_low), ("canny_high", self.canny_high)] {
            if !value.is_finite() || value < 0.0 {
                return Err(PipelineError::invalid_parameter(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let (canny_low, canny_high) = if self.canny_low <= self.canny_high {
            (self.canny_low, self.canny_high)
        } else {
            (self.canny_high, self.canny_low)
        };

        Ok(EdgeSettings {
            blur_kernel: self.effective_blur_kernel().unsigned_abs() as usize,
            canny_low,
            canny_high,
            dilate_iterations: self.dilate_iterations.clamp(0, i32::from(u8::MAX)) as u8,
            stroke_width: self.stroke_width(),
        })
    }
}
