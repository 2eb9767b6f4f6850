use std::fmt::Write;

use crate::types::{ComputedOutline, Contour, StrokeStyle};

impl Contour {
    /// SVG path data for this contour, or `None` when it has two vertices or fewer.
    ///
    /// Contours with more than three vertices are closed with `Z`.
    pub fn svg_path_data(&self) -> Option<String> {
        let (first, rest) = self.points.split_first()?;
        if self.points.len() <= 2 {
            return None;
        }

        let mut data = format!("M {} {}", first[0], first[1]);
        for [x, y] in rest {
            // Writing into a String cannot fail
            let _ = write!(data, " L {} {}", x, y);
        }
        if self.points.len() > 3 {
            data.push_str(" Z");
        }
        Some(data)
    }
}

impl ComputedOutline {
    /// Render every drawable contour as a stroked SVG path
    pub fn to_svg(&self, style: &StrokeStyle) -> String {
        let (width, height) = (self.image_width, self.image_height);
        let mut svg = String::new();
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
            width, height, width, height
        );
        for data in self.contours.iter().filter_map(Contour::svg_path_data) {
            let _ = writeln!(
                svg,
                "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
                data, style.color, style.width
            );
        }
        svg.push_str("</svg>\n");
        svg
    }
}
