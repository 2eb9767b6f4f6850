//! Synthetic images and request bodies.

use hueseum_common::{codec::encode_png, input::encode_base64};
use image::{DynamicImage, Rgb, RgbImage};
use serde_json::{json, Value};

pub fn png(img: RgbImage) -> Vec<u8> {
    encode_png(&DynamicImage::ImageRgb8(img)).expect("PNG encoding should succeed")
}

pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    png(RgbImage::from_pixel(width, height, Rgb(color)))
}

/// 8x8, left three quarters blue and right quarter white
pub fn blue_white_png() -> Vec<u8> {
    png(RgbImage::from_fn(8, 8, |x, _| {
        if x < 6 { Rgb([0, 0, 255]) } else { Rgb([255, 255, 255]) }
    }))
}

/// Light rectangle on a dark field, with clear edges to trace
pub fn rectangle_png() -> Vec<u8> {
    png(RgbImage::from_fn(64, 48, |x, y| {
        if (16..48).contains(&x) && (12..36).contains(&y) {
            Rgb([235, 225, 210])
        } else {
            Rgb([25, 30, 35])
        }
    }))
}

pub fn data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", encode_base64(bytes))
}

/// `{"image_data": <base64>}`
pub fn image_body(bytes: &[u8]) -> Value {
    json!({ "image_data": encode_base64(bytes) })
}

/// `{"image_data": <data url>}`
pub fn data_url_body(bytes: &[u8]) -> Value {
    json!({ "image_data": data_url(bytes) })
}
