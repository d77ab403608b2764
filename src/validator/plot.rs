//! Diagnostic plot of measured vs. modeled luma means.
//!
//! Output is a debugging aid only; callers must not let a plot failure
//! change a verdict.

use crate::errors::SuiteError;
use image::{Rgb, RgbImage};
use std::path::Path;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;
const MARGIN: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([64, 64, 64]);
const MEASURED: Rgb<u8> = Rgb([220, 32, 32]);
const MODELED: Rgb<u8> = Rgb([32, 32, 220]);

/// Render measured (red) and modeled (blue) luma curves over the EV sweep
/// and save them as a PNG.
pub fn save_means_plot(
    path: &Path,
    evs: &[i32],
    measured: &[f64],
    modeled: &[f64],
) -> Result<(), SuiteError> {
    if evs.len() < 2 || measured.len() != evs.len() || modeled.len() != evs.len() {
        return Err(SuiteError::DiagnosticError(format!(
            "plot needs at least two aligned samples, got {} evs / {} measured / {} modeled",
            evs.len(),
            measured.len(),
            modeled.len()
        )));
    }

    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    draw_axes(&mut img);

    let y_max = measured
        .iter()
        .chain(modeled.iter())
        .fold(0.0f64, |acc, v| acc.max(*v))
        .max(1e-6);

    draw_series(&mut img, evs, measured, y_max, MEASURED);
    draw_series(&mut img, evs, modeled, y_max, MODELED);

    img.save(path)
        .map_err(|e| SuiteError::DiagnosticError(format!("failed to save {}: {e}", path.display())))
}

fn draw_axes(img: &mut RgbImage) {
    for x in MARGIN..WIDTH - MARGIN {
        img.put_pixel(x, HEIGHT - MARGIN, AXIS);
    }
    for y in MARGIN..HEIGHT - MARGIN {
        img.put_pixel(MARGIN, y, AXIS);
    }
}

fn draw_series(img: &mut RgbImage, evs: &[i32], values: &[f64], y_max: f64, color: Rgb<u8>) {
    let points: Vec<(f32, f32)> = evs
        .iter()
        .zip(values.iter())
        .map(|(&ev, &v)| (to_x(ev, evs), to_y(v, y_max)))
        .collect();

    for pair in points.windows(2) {
        draw_line(img, pair[0], pair[1], color);
    }
    for &(x, y) in &points {
        draw_marker(img, x as i64, y as i64, color);
    }
}

fn to_x(ev: i32, evs: &[i32]) -> f32 {
    let min = *evs.first().unwrap_or(&0) as f32;
    let max = *evs.last().unwrap_or(&1) as f32;
    let span = (max - min).max(1.0);
    MARGIN as f32 + (ev as f32 - min) / span * (WIDTH - 2 * MARGIN) as f32
}

fn to_y(value: f64, y_max: f64) -> f32 {
    let norm = (value / y_max).clamp(0.0, 1.0) as f32;
    (HEIGHT - MARGIN) as f32 - norm * (HEIGHT - 2 * MARGIN) as f32
}

fn draw_line(img: &mut RgbImage, from: (f32, f32), to: (f32, f32), color: Rgb<u8>) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (from.0 + dx * t).round() as i64;
        let y = (from.1 + dy * t).round() as i64;
        put_pixel_checked(img, x, y, color);
    }
}

fn draw_marker(img: &mut RgbImage, cx: i64, cy: i64, color: Rgb<u8>) {
    for dy in -1..=1 {
        for dx in -1..=1 {
            put_pixel_checked(img, cx + dx, cy + dy, color);
        }
    }
}

fn put_pixel_checked(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}
