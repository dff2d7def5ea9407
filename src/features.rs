//! Per-image feature extraction: uniform LBP histograms or flattened pixels.

use image::imageops::{self, FilterType};
use image::GrayImage;

/// Keeps the L1 normalization finite when a histogram is all zeros.
const LBP_EPS: f64 = 1e-7;

/// Feature extraction strategy. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureKind {
    /// Uniform Local Binary Pattern histogram with `points + 2` bins,
    /// L1-normalized.
    LbpHistogram { points: u32, radius: f64 },
    /// Resize to `width` x `height` and flatten the raw pixel intensities.
    ResizeFlatten { width: u32, height: u32 },
}

impl FeatureKind {
    /// Length of the vectors produced by [`extract`](Self::extract).
    pub fn output_len(&self) -> usize {
        match *self {
            FeatureKind::LbpHistogram { points, .. } => points as usize + 2,
            FeatureKind::ResizeFlatten { width, height } => (width * height) as usize,
        }
    }

    /// Computes the feature vector for an 8-bit grayscale image.
    pub fn extract(&self, image: &GrayImage) -> Vec<f64> {
        match *self {
            FeatureKind::LbpHistogram { points, radius } => lbp_histogram(image, points, radius),
            FeatureKind::ResizeFlatten { width, height } => resize_flatten(image, width, height),
        }
    }
}

/// Resizes to a fixed target and flattens the raw intensities row by row.
pub fn resize_flatten(image: &GrayImage, width: u32, height: u32) -> Vec<f64> {
    let resized = imageops::resize(image, width, height, FilterType::Triangle);
    resized.pixels().map(|p| p.0[0] as f64).collect()
}

/// Computes the uniform Local Binary Pattern histogram of a grayscale image.
///
/// Every interior pixel is compared against `points` neighbours sampled on a
/// circle of the given radius, with bilinear interpolation for off-grid
/// samples. Patterns with at most two circular 0/1 transitions are binned by
/// their set-bit count (0..=points); all other patterns share the final
/// overflow bin. Border pixels whose circle leaves the image are skipped.
pub fn lbp_histogram(image: &GrayImage, points: u32, radius: f64) -> Vec<f64> {
    let mut hist = vec![0.0; points as usize + 2];
    let (width, height) = image.dimensions();
    let margin = radius.ceil() as u32;

    if width > 2 * margin && height > 2 * margin {
        for y in margin..height - margin {
            for x in margin..width - margin {
                hist[lbp_code(image, x, y, points, radius)] += 1.0;
            }
        }
    }

    let total: f64 = hist.iter().sum();
    for bin in &mut hist {
        *bin /= total + LBP_EPS;
    }
    hist
}

/// Uniform LBP code of a single pixel, already mapped to its histogram bin.
fn lbp_code(image: &GrayImage, x: u32, y: u32, points: u32, radius: f64) -> usize {
    let center = image.get_pixel(x, y).0[0] as f64;
    let mut bits = Vec::with_capacity(points as usize);

    for p in 0..points {
        let angle = 2.0 * std::f64::consts::PI * p as f64 / points as f64;
        let sx = x as f64 + radius * angle.cos();
        let sy = y as f64 - radius * angle.sin();
        // Intensities are integers; anything within 1e-6 of the center is
        // interpolation rounding, not a darker neighbour.
        bits.push(sample_bilinear(image, sx, sy) - center >= -1e-6);
    }

    let transitions = bits
        .iter()
        .zip(bits.iter().cycle().skip(1))
        .take(bits.len())
        .filter(|(a, b)| a != b)
        .count();

    if transitions <= 2 {
        bits.iter().filter(|&&b| b).count()
    } else {
        points as usize + 1
    }
}

fn pixel_or_zero(image: &GrayImage, x: i64, y: i64) -> f64 {
    if x < 0 || y < 0 || x >= image.width() as i64 || y >= image.height() as i64 {
        return 0.0;
    }
    image.get_pixel(x as u32, y as u32).0[0] as f64
}

/// Samples a pixel with bilinear interpolation for sub-pixel accuracy.
fn sample_bilinear(image: &GrayImage, x: f64, y: f64) -> f64 {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = pixel_or_zero(image, x0, y0);
    let p10 = pixel_or_zero(image, x0 + 1, y0);
    let p01 = pixel_or_zero(image, x0, y0 + 1);
    let p11 = pixel_or_zero(image, x0 + 1, y0 + 1);

    let top = p00 * (1.0 - fx) + p10 * fx;
    let bottom = p01 * (1.0 - fx) + p11 * fx;
    top * (1.0 - fy) + bottom * fy
}
