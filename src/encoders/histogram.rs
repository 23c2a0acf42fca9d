use ndarray::prelude::*;

use super::FeatureEncoder;

pub const BINS: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Counts of every intensity of a single channel.
pub fn channel_histogram(image: ArrayView3<u8>, channel: Channel) -> [u32; BINS] {
    let mut bins = [0u32; BINS];
    for &v in image.index_axis(Axis(2), channel.index()).iter() {
        bins[v as usize] += 1;
    }
    bins
}

/// 256-bin intensity histogram of one channel.
///
/// The default is the blue channel: the arff files and training sets this
/// pipeline has always produced hold blue-only histograms (red and green were
/// computed and dropped). Build with `for_channel` to pick another one; doing
/// so changes every histogram feature downstream consumers see.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Histogram {
    pub channel: Channel,
}

impl Default for Histogram {
    fn default() -> Self {
        Self { channel: Channel::Blue }
    }
}

impl Histogram {
    pub fn for_channel(channel: Channel) -> Self {
        Self { channel }
    }
}

impl FeatureEncoder for Histogram {
    fn name(&self) -> &str {
        "hist"
    }

    fn dim(&self) -> usize {
        BINS
    }

    fn encode(&self, image: ArrayView3<u8>) -> Vec<f32> {
        channel_histogram(image, self.channel)
            .iter()
            .map(|&c| c as f32)
            .collect()
    }
}
