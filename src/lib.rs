use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

pub mod configs;
pub mod datasets;
pub mod driver;
pub mod encoders;
pub mod error;
pub mod formatter;
pub mod renderer;

pub use datasets::cifar::{CifarBatches, CifarParams};
pub use datasets::labels::{remap_labels, BinaryLabel};
pub use datasets::{Batch, BatchId};
pub use encoders::{EncoderKind, FeatureEncoder, Grayscale, Histogram, Rgb};
pub use error::DatasetError;
pub use formatter::{DatasetFormatter, TrainingSet};

/// Parameters that are saved to and loaded from disk as ron
pub trait Config {
    fn config(&self) -> Result<String>;
    fn load_config(&mut self, config: &str) -> Result<()>;
}

impl<T: Serialize + DeserializeOwned> Config for T {
    fn config(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize config")
    }
    fn load_config(&mut self, config: &str) -> Result<()> {
        *self = ron::from_str(config).context(format!("Failed to load config {}", config))?;
        Ok(())
    }
}
