use std::collections::HashSet;

use hueseum_common::{ColorEntry, Dimensions, PipelineError, Result, codec::decode_rgb};
use image::{RgbImage, imageops::{self, FilterType}};
use kmeans_colors::{Kmeans, get_kmeans};
use palette::Srgb;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{MAX_COLORS, options::PaletteOptions};

/// Dominant colours of one image, most prevalent first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub entries: Vec<ColorEntry>,
    /// Size of the source image before any downsampling
    pub image_dimensions: Dimensions,
}

impl Palette {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain ordered hex codes
    pub fn hex_codes(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.hex.clone()).collect()
    }

    pub fn total_percentage(&self) -> f64 {
        self.entries.iter().map(|entry| entry.percentage).sum()
    }
}

/// Extract up to `k` dominant colours from encoded image bytes.
///
/// `k` is clamped to the number of distinct colours present, so a flat image
/// yields a single entry. Clusters that end up without pixels are dropped.
#[instrument(skip(bytes, options), fields(len = bytes.len()))]
pub fn extract_palette(bytes: &[u8], k: usize, options: &PaletteOptions) -> Result<Palette> {
    if k == 0 || k > MAX_COLORS {
        return Err(PipelineError::invalid_parameter(format!(
            "color count must be between 1 and {MAX_COLORS}, got {k}"
        )));
    }

    let image = decode_rgb(bytes)?;
    let image_dimensions = Dimensions::new(image.width(), image.height());
    let image = downsample(image, options.max_dimension);

    let pixels: Vec<[u8; 3]> = image.pixels().map(|p| p.0).collect();
    let distinct = pixels.iter().collect::<HashSet<_>>().len();
    let clusters = k.min(distinct);
    debug!(
        sampled = pixels.len(),
        distinct,
        requested = k,
        clusters,
        "clustering pixels"
    );

    let buffer: Vec<Srgb> = pixels
        .iter()
        .map(|&[r, g, b]| Srgb::new(r, g, b).into_format())
        .collect();
    let result = best_of_runs(clusters, &buffer, options);

    let mut counts = vec![0usize; result.centroids.len()];
    for &index in &result.indices {
        counts[usize::from(index)] += 1;
    }

    let mut ranked: Vec<(usize, &Srgb)> = counts
        .iter()
        .copied()
        .zip(result.centroids.iter())
        .filter(|(count, _)| *count > 0)
        .collect();
    // Stable sort keeps cluster order for ties
    ranked.sort_by(|a, b| b.0.cmp(&a.0));

    let sorted_counts: Vec<usize> = ranked.iter().map(|(count, _)| *count).collect();
    let shares = apportion_hundredths(&sorted_counts);
    let entries = ranked
        .into_iter()
        .zip(shares)
        .map(|((_, centroid), hundredths)| {
            ColorEntry::new(to_rgb8(centroid), hundredths as f64 / 100.0)
        })
        .collect();

    Ok(Palette {
        entries,
        image_dimensions,
    })
}

fn best_of_runs(k: usize, buffer: &[Srgb], options: &PaletteOptions) -> Kmeans<Srgb> {
    let run = |n: u32| {
        let result = get_kmeans(
            k,
            options.max_iterations,
            options.convergence,
            false,
            buffer,
            options.seed + u64::from(n),
        );
        debug!(run = n, score = result.score, "k-means run finished");
        result
    };

    let mut best = run(0);
    for n in 1..options.runs {
        let candidate = run(n);
        if candidate.score < best.score {
            best = candidate;
        }
    }
    best
}

/// Shrink so the longer side is at most `max_dimension`, keeping the aspect ratio
fn downsample(image: RgbImage, max_dimension: u32) -> RgbImage {
    let (width, height) = image.dimensions();
    if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
        return image;
    }
    let (new_width, new_height) = fit_within(width, height, max_dimension);
    debug!(width, height, new_width, new_height, "downsampling before clustering");
    imageops::resize(&image, new_width, new_height, FilterType::Lanczos3)
}

pub(crate) fn fit_within(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let scale = f64::from(max_dimension) / f64::from(width.max(height));
    let scaled = |side: u32| ((f64::from(side) * scale).round() as u32).clamp(1, max_dimension);
    (scaled(width), scaled(height))
}

fn to_rgb8(color: &Srgb) -> [u8; 3] {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color.red), channel(color.green), channel(color.blue)]
}

/// Split 100.00% over `counts` in whole hundredths using the largest remainder
/// method. The shares sum to exactly 10000 and each is within one hundredth of
/// its exact value. Equal remainders go to the earlier entry, so counts sorted in
/// descending order keep their order.
fn apportion_hundredths(counts: &[usize]) -> Vec<u64> {
    let total = counts.iter().sum::<usize>() as u64;
    if total == 0 {
        return vec![0; counts.len()];
    }

    let mut shares = Vec::with_capacity(counts.len());
    let mut remainders = Vec::with_capacity(counts.len());
    for (index, &count) in counts.iter().enumerate() {
        let scaled = count as u64 * 10_000;
        shares.push(scaled / total);
        remainders.push((scaled % total, index));
    }

    let leftover = 10_000 - shares.iter().sum::<u64>();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, index) in remainders.iter().take(leftover as usize) {
        shares[index] += 1;
    }
    shares
}
