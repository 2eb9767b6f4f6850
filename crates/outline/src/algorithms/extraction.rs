use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};
use hueseum_common::Result;
use tracing::debug;

use crate::{traits::ContourExtractor, types::Contour};

/// Imageproc-based contour extractor.
///
/// Lists every outer and hole border of the non-zero regions, flat, and keeps
/// only the vertices where the chain changes direction.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourExtractor;

impl ContourExtractor for ImageprocContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        let contours = find_contours::<i32>(binary_image);
        let traced: usize = contours.iter().map(|c| c.points.len()).sum();

        let result: Vec<Contour> = contours
            .into_iter()
            .map(|contour| {
                let points: Vec<[i32; 2]> = contour.points.iter().map(|p| [p.x, p.y]).collect();
                Contour {
                    points: compress_collinear(&points),
                    is_hole: contour.border_type == BorderType::Hole,
                }
            })
            .collect();

        debug!(
            contours = result.len(),
            traced_points = traced,
            kept_points = result.iter().map(Contour::len).sum::<usize>(),
            "extracted contours"
        );
        Ok(result)
    }
}

/// Collapse straight runs of a closed chain down to their end points
pub fn compress_collinear(points: &[[i32; 2]]) -> Vec<[i32; 2]> {
    let mut chain: Vec<[i32; 2]> = Vec::with_capacity(points.len());
    for &point in points {
        if chain.last() != Some(&point) {
            chain.push(point);
        }
    }
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }

    let n = chain.len();
    if n < 3 {
        return chain;
    }

    let direction = |from: [i32; 2], to: [i32; 2]| [(to[0] - from[0]).signum(), (to[1] - from[1]).signum()];
    (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let next = chain[(i + 1) % n];
            direction(prev, chain[i]) != direction(chain[i], next)
        })
        .map(|i| chain[i])
        .collect()
}
