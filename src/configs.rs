use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::datasets::cifar::CifarParams;
use crate::datasets::NUM_BATCHES;
use crate::encoders::EncoderKind;
use crate::Config;

/// One encoder applied to the first `count` images of each listed batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParams {
    pub encoder: EncoderKind,
    pub batches: Vec<u8>,
    pub count: usize,
}

/// Everything the driver binary needs, stored as ron
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverParams {
    pub cifar: CifarParams,
    pub output_dir: PathBuf,
    pub jobs: Vec<JobParams>,
}

impl Default for DriverParams {
    /// 50 images of every batch, once per encoder
    fn default() -> Self {
        let jobs = [EncoderKind::Rgb, EncoderKind::Grayscale, EncoderKind::Histogram]
            .into_iter()
            .map(|encoder| JobParams {
                encoder,
                batches: (1..=NUM_BATCHES).collect(),
                count: 50,
            })
            .collect();
        Self {
            cifar: CifarParams::default(),
            output_dir: PathBuf::from("."),
            jobs,
        }
    }
}

impl DriverParams {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let serialized = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let mut params = Self::default();
        params.load_config(&serialized)?;
        Ok(params)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        fs::write(path, self.config()?)
            .with_context(|| format!("Failed to write config {:?}", path))
    }

    /// `<output_dir>/<encoder>-batch<id>.arff`
    pub fn output_path(&self, encoder: EncoderKind, batch_id: u8) -> PathBuf {
        self.output_dir.join(format!("{}-batch{}.arff", encoder.name(), batch_id))
    }
}
