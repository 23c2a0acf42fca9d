use ndarray::prelude::*;

use super::FeatureEncoder;
use crate::datasets::BYTES_PER_IMAGE;

/// Raw pixel bytes, row by row, column by column, channel innermost
#[derive(Clone, Copy, Debug, Default)]
pub struct Rgb;

impl FeatureEncoder for Rgb {
    fn name(&self) -> &str {
        "rgb"
    }

    fn dim(&self) -> usize {
        BYTES_PER_IMAGE
    }

    fn encode(&self, image: ArrayView3<u8>) -> Vec<f32> {
        // logical order of an [H, W, C] view is already the wanted order
        image.iter().map(|&v| f32::from(v)).collect()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::datasets::test::random_batch;

    #[test]
    fn flattened_vector_rebuilds_image() {
        let batch = random_batch(&[2, 8, 4]);
        for i in 0..batch.len() {
            let features = Rgb.encode(batch.image(i));
            assert_eq!(features.len(), 3072);
            let pixels: Vec<u8> = features.iter().map(|&v| v as u8).collect();
            let rebuilt = Array3::from_shape_vec((32, 32, 3), pixels).unwrap();
            assert_eq!(rebuilt.view(), batch.image(i));
        }
    }

    #[test]
    fn channel_is_innermost() {
        let mut image = Array3::<u8>::zeros((32, 32, 3));
        image[[0, 1, 2]] = 9;
        image[[1, 0, 0]] = 7;
        let features = Rgb.encode(image.view());
        assert_eq!(features[5], 9.0);
        assert_eq!(features[96], 7.0);
    }

    #[test]
    fn non_standard_views_keep_logical_order() {
        let batch = random_batch(&[0]);
        let chw = batch.image(0).permuted_axes([2, 0, 1]).to_owned();
        let hwc = chw.view().permuted_axes([1, 2, 0]);
        assert_eq!(Rgb.encode(hwc), Rgb.encode(batch.image(0)));
    }
}
