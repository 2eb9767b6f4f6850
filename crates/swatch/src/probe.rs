use hueseum_common::{Dimensions, PipelineError, PixelSample, Result, codec::decode_rgb};
use tracing::instrument;

/// Read the exact colour at `(x, y)`; no resampling or interpolation is involved
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn probe_pixel(bytes: &[u8], x: i64, y: i64) -> Result<PixelSample> {
    let image = decode_rgb(bytes)?;
    let dims = Dimensions::new(image.width(), image.height());
    if !dims.contains(x, y) {
        return Err(PipelineError::OutOfBounds {
            x,
            y,
            width: dims.width,
            height: dims.height,
        });
    }

    // Both coordinates are within 0..u32 after the bounds check
    let (x, y) = (x as u32, y as u32);
    Ok(PixelSample::new(x, y, image.get_pixel(x, y).0))
}
