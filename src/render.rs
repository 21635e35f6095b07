//! PNG preview of a terrain bundle.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut, draw_polygon_mut};
use imageproc::point::Point as PixelPoint;

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::terrain::{TerrainBundle, WaterKind};

const LAND: Rgba<u8> = Rgba([196, 186, 150, 255]);
const OCEAN: Rgba<u8> = Rgba([52, 96, 148, 255]);
const LAKE: Rgba<u8> = Rgba([86, 140, 190, 255]);
const BEACH: Rgba<u8> = Rgba([232, 214, 160, 255]);
const CONTOUR: Rgba<u8> = Rgba([150, 128, 96, 255]);
const COASTLINE: Rgba<u8> = Rgba([34, 52, 80, 255]);
const RIVER: Rgba<u8> = Rgba([70, 122, 180, 255]);

/// Paints the bundle onto a square image of `image_size` pixels covering
/// the bundle's whole world.
#[must_use]
pub fn render_bundle(bundle: &TerrainBundle, image_size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(image_size, image_size, LAND);
    let scale = f64::from(image_size) / bundle.world_size;

    for water in bundle.water.iter().filter(|w| w.kind == WaterKind::Ocean) {
        fill(&mut img, &water.polygon, scale, OCEAN);
    }
    for beach in &bundle.beaches {
        fill(&mut img, &beach.polygon, scale, BEACH);
    }
    for lake in bundle.lakes() {
        fill(&mut img, &lake.polygon, scale, LAKE);
    }
    for contour in &bundle.contours {
        stroke(&mut img, &contour.polyline, scale, CONTOUR);
    }
    for coastline in &bundle.coastlines {
        stroke(&mut img, &coastline.polyline, scale, COASTLINE);
    }
    for river in &bundle.rivers {
        let radius = ((river.width * scale) / 2.0).round().max(1.0) as i32;
        for p in &river.polyline {
            let (x, y) = to_pixel(*p, scale);
            let center = (x.round() as i32, y.round() as i32);
            draw_filled_circle_mut(&mut img, center, radius, RIVER);
        }
        stroke(&mut img, &river.polyline, scale, RIVER);
    }
    img
}

/// Renders and writes the preview as PNG.
pub fn save_png(bundle: &TerrainBundle, image_size: u32, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    render_bundle(bundle, image_size)
        .save(path)
        .map_err(|err| match err {
            image::ImageError::IoError(source) => Error::Io {
                path: path.to_path_buf(),
                source,
            },
            other => Error::Image(other),
        })
}

fn to_pixel(p: Point, scale: f64) -> (f32, f32) {
    ((p.x * scale) as f32, (p.y * scale) as f32)
}

/// Fills a ring, skipping rings that collapse to fewer than three pixels.
fn fill(img: &mut RgbaImage, ring: &[Point], scale: f64, color: Rgba<u8>) {
    let mut pixels: Vec<PixelPoint<i32>> = Vec::with_capacity(ring.len());
    for &p in ring {
        let (x, y) = to_pixel(p, scale);
        let px = PixelPoint::new(x.round() as i32, y.round() as i32);
        if pixels.last() != Some(&px) {
            pixels.push(px);
        }
    }
    // imageproc rejects an explicitly closed ring.
    while pixels.len() > 1 && pixels.first() == pixels.last() {
        pixels.pop();
    }
    if pixels.len() >= 3 {
        draw_polygon_mut(img, &pixels, color);
    }
}

fn stroke(img: &mut RgbaImage, line: &[Point], scale: f64, color: Rgba<u8>) {
    for pair in line.windows(2) {
        let (from, to) = (to_pixel(pair[0], scale), to_pixel(pair[1], scale));
        draw_line_segment_mut(img, from, to, color);
    }
}
