use ndarray::prelude::*;

use super::FeatureEncoder;
use crate::datasets::PIXELS_PER_IMAGE;

// 0.299, 0.587 and 0.114 in 14 bit fixed point, as opencv's rgb to gray
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Weighted luminance of one pixel, rounded to nearest
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = R_WEIGHT * r as u32 + G_WEIGHT * g as u32 + B_WEIGHT * b as u32 + (1 << (SHIFT - 1));
    (y >> SHIFT) as u8
}

/// Converts an [H, W, C] rgb image to a single [H, W] channel
pub fn to_luma(image: ArrayView3<u8>) -> Array2<u8> {
    let (h, w, _) = image.dim();
    Array2::from_shape_fn((h, w), |(i, j)| {
        luminance(image[[i, j, 0]], image[[i, j, 1]], image[[i, j, 2]])
    })
}

/// Luminance of every pixel, row-major, 1024 values in [0, 255]
#[derive(Clone, Copy, Debug, Default)]
pub struct Grayscale;

impl FeatureEncoder for Grayscale {
    fn name(&self) -> &str {
        "gray"
    }

    fn dim(&self) -> usize {
        PIXELS_PER_IMAGE
    }

    fn encode(&self, image: ArrayView3<u8>) -> Vec<f32> {
        to_luma(image).iter().map(|&y| f32::from(y)).collect()
    }
}

#[test]
fn luminance_extremes() {
    assert_eq!(luminance(0, 0, 0), 0);
    assert_eq!(luminance(255, 255, 255), 255);
    assert_eq!(luminance(255, 0, 0), 76);
    assert_eq!(luminance(0, 255, 0), 150);
    assert_eq!(luminance(0, 0, 255), 29);
    for v in [1u8, 17, 128, 200, 254] {
        assert_eq!(luminance(v, v, v), v);
    }
}

#[test]
fn grayscale_encoding() {
    let batch = crate::datasets::test::random_batch(&[1]);
    let image = batch.image(0);
    let features = Grayscale.encode(image);
    assert_eq!(features.len(), 1024);
    assert!(features.iter().all(|&v| (0.0..=255.0).contains(&v) && v.fract() == 0.0));

    // row-major: index 32 * i + j holds pixel (i, j)
    let expected = luminance(image[[7, 21, 0]], image[[7, 21, 1]], image[[7, 21, 2]]);
    assert_eq!(features[7 * 32 + 21], f32::from(expected));
}
