//! This module only defines the dataset logic for loading raw batches
//! and the label tables that go with them. Turning images into features is
//! left to the encoders module, writing them out to the formatter module.
use std::fmt;

use ndarray::prelude::*;

use crate::error::DatasetError;

pub mod cifar;
pub mod labels;

pub const IMAGE_SIDE: usize = 32;
pub const CHANNELS: usize = 3;
pub const PIXELS_PER_IMAGE: usize = IMAGE_SIDE * IMAGE_SIDE;
pub const BYTES_PER_IMAGE: usize = PIXELS_PER_IMAGE * CHANNELS;
/// Upper bound on the number of images a single batch file may hold
pub const MAX_IMAGES: usize = 10_000;
pub const NUM_BATCHES: u8 = 5;

/// Identifies one of the on-disk training batches, always within 1..=5
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(u8);

impl BatchId {
    pub fn new(id: u8) -> Result<Self, DatasetError> {
        if (1..=NUM_BATCHES).contains(&id) {
            Ok(Self(id))
        } else {
            Err(DatasetError::InvalidBatchId(id))
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = BatchId> {
        (1..=NUM_BATCHES).map(BatchId)
    }
}

impl TryFrom<u8> for BatchId {
    type Error = DatasetError;
    fn try_from(id: u8) -> Result<Self, Self::Error> {
        BatchId::new(id)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully loaded batch, images are stored as NHWC with the channel innermost,
/// labels hold the original class index of each image.
#[derive(Clone, Debug)]
pub struct Batch {
    images: Array4<u8>,
    labels: Vec<u8>,
}

impl Batch {
    pub fn from_parts(images: Array4<u8>, labels: Vec<u8>) -> Result<Self, DatasetError> {
        let (n, h, w, c) = images.dim();
        if (h, w, c) != (IMAGE_SIDE, IMAGE_SIDE, CHANNELS) {
            return Err(DatasetError::InvalidBatch(format!(
                "expected images of shape [N, {IMAGE_SIDE}, {IMAGE_SIDE}, {CHANNELS}], got [{n}, {h}, {w}, {c}]"
            )));
        }
        if n != labels.len() {
            return Err(DatasetError::InvalidBatch(format!(
                "{} images but {} labels",
                n,
                labels.len()
            )));
        }
        if n == 0 || n > MAX_IMAGES {
            return Err(DatasetError::InvalidBatch(format!(
                "batch must hold between 1 and {MAX_IMAGES} images, got {n}"
            )));
        }
        if let Some((i, l)) = labels
            .iter()
            .enumerate()
            .find(|(_, l)| **l as usize >= labels::LABEL_NAMES.len())
        {
            return Err(DatasetError::InvalidBatch(format!(
                "label {l} of image {i} is not a class index"
            )));
        }
        Ok(Self { images, labels })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn images(&self) -> ArrayView4<u8> {
        self.images.view()
    }

    /// A single image as [H, W, C]
    pub fn image(&self, i: usize) -> ArrayView3<u8> {
        self.images.index_axis(Axis(0), i)
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// The binary Animal / Not-Animal codes of every image in the batch
    pub fn binary_labels(&self) -> Vec<u8> {
        labels::remap_labels(&self.labels)
    }
}

/// Checks `start <= end <= limit`
pub fn check_range(start: usize, end: usize, limit: usize) -> Result<(), DatasetError> {
    if start <= end && end <= limit {
        Ok(())
    } else {
        Err(DatasetError::InvalidRange { start, end, limit })
    }
}

/// Checks `count <= limit`
pub fn check_count(count: usize, limit: usize) -> Result<(), DatasetError> {
    if count <= limit {
        Ok(())
    } else {
        Err(DatasetError::InvalidCount { count, limit })
    }
}


#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    /// Random pixels with the given labels, used throughout the crate's tests
    pub(crate) fn random_batch(labels: &[u8]) -> Batch {
        let images = Array4::random(
            (labels.len(), IMAGE_SIDE, IMAGE_SIDE, CHANNELS),
            Uniform::new_inclusive(0u8, 255u8),
        );
        Batch::from_parts(images, labels.to_vec()).unwrap()
    }

    #[test]
    fn batch_id_bounds() {
        assert!(BatchId::new(0).is_err());
        assert!(BatchId::new(6).is_err());
        let ids: Vec<u8> = BatchId::all().map(|b| b.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(matches!(BatchId::try_from(9), Err(DatasetError::InvalidBatchId(9))));
    }

    #[test]
    fn from_parts_rejects_bad_shapes() {
        let images = Array4::<u8>::zeros((2, 32, 32, 3));
        assert!(Batch::from_parts(images.clone(), vec![1]).is_err());
        assert!(Batch::from_parts(images.clone(), vec![1, 10]).is_err());
        assert!(Batch::from_parts(Array4::zeros((2, 3, 32, 32)), vec![1, 2]).is_err());
        assert!(Batch::from_parts(Array4::zeros((0, 32, 32, 3)), vec![]).is_err());
        let batch = Batch::from_parts(images, vec![3, 9]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.image(1).dim(), (32, 32, 3));
        assert_eq!(batch.binary_labels(), vec![0, 1]);
    }

    #[test]
    fn ranges() {
        assert!(check_range(0, 0, 10).is_ok());
        assert!(check_range(3, 10, 10).is_ok());
        assert!(check_range(4, 3, 10).is_err());
        assert!(check_range(0, 11, 10).is_err());
        assert!(check_count(10, 10).is_ok());
        assert!(matches!(
            check_count(11, 10),
            Err(DatasetError::InvalidCount { count: 11, limit: 10 })
        ));
    }
}
