//! Feature encoders turn a single [H, W, C] image into a flat feature vector.
//! Every image is encoded independently of the rest of its batch.
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

pub mod grayscale;
pub mod histogram;
pub mod rgb;

pub use grayscale::Grayscale;
pub use histogram::{Channel, Histogram};
pub use rgb::Rgb;

pub trait FeatureEncoder {
    /// short name, used in file names and progress output
    fn name(&self) -> &str;
    /// length of every vector returned by `encode`
    fn dim(&self) -> usize;
    fn encode(&self, image: ArrayView3<u8>) -> Vec<f32>;
}

impl<E: FeatureEncoder + ?Sized> FeatureEncoder for Box<E> {
    fn name(&self) -> &str {
        (**self).name()
    }
    fn dim(&self) -> usize {
        (**self).dim()
    }
    fn encode(&self, image: ArrayView3<u8>) -> Vec<f32> {
        (**self).encode(image)
    }
}

/// The unification of every encoder in a single type, used by configs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum EncoderKind {
    Grayscale,
    Rgb,
    Histogram,
}

impl EncoderKind {
    /// the name used for output paths
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "gray",
            Self::Rgb => "rgb",
            Self::Histogram => "hist",
        }
    }

    pub fn build(&self) -> Box<dyn FeatureEncoder> {
        match self {
            Self::Grayscale => Box::new(Grayscale),
            Self::Rgb => Box::new(Rgb),
            Self::Histogram => Box::new(Histogram::default()),
        }
    }

    pub fn all() -> Vec<EncoderKind> {
        EncoderKind::iter().collect()
    }
}
