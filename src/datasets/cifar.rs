use std::fs;
use std::path::{Path, PathBuf};

use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Batch, BatchId, BYTES_PER_IMAGE, CHANNELS, IMAGE_SIDE, MAX_IMAGES};
use crate::error::DatasetError;

/// One label byte followed by the image in channel-major order
const RECORD_BYTES: usize = BYTES_PER_IMAGE + 1;

// main parameters driving the cifar10 batch source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CifarParams {
    pub path: PathBuf,
    /// file name of a batch, `{id}` is replaced by the batch id
    pub file_template: String,
}

impl Default for CifarParams {
    fn default() -> Self {
        Self {
            path: PathBuf::from("cifar-10-batches-bin"),
            file_template: "data_batch_{id}.bin".to_string(),
        }
    }
}

impl CifarParams {
    pub fn build(&self) -> CifarBatches {
        CifarBatches::new(&self.path).with_template(&self.file_template)
    }
}

/// Locates and reads the binary cifar10 batches of a data folder.
/// Nothing is cached, every call to `load_batch` reads the file again.
#[derive(Debug, Clone)]
pub struct CifarBatches {
    dir: PathBuf,
    file_template: String,
}

impl CifarBatches {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let CifarParams { file_template, .. } = CifarParams::default();
        Self { dir: dir.as_ref().to_path_buf(), file_template }
    }

    pub fn with_template(mut self, template: &str) -> Self {
        self.file_template = template.to_string();
        self
    }

    pub fn batch_path(&self, id: BatchId) -> PathBuf {
        self.dir.join(self.file_template.replace("{id}", &id.to_string()))
    }

    pub fn load_batch(&self, batch_id: u8) -> Result<Batch, DatasetError> {
        let id = BatchId::new(batch_id)?;
        let path = self.batch_path(id);
        let raw_buf = fs::read(&path).map_err(DatasetError::file(&path))?;
        parse_batch(&raw_buf).map_err(|e| match e {
            DatasetError::InvalidBatch(reason) => DatasetError::MalformedBatch { path, reason },
            e => e,
        })
    }

    /// Writes `batch` in the binary layout `load_batch` reads
    pub fn write_batch(&self, batch_id: u8, batch: &Batch) -> Result<PathBuf, DatasetError> {
        let id = BatchId::new(batch_id)?;
        let path = self.batch_path(id);
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(DatasetError::file(&self.dir))?;
        }
        fs::write(&path, encode_batch(batch)).map_err(DatasetError::file(&path))?;
        Ok(path)
    }
}

/// Decodes a binary batch, reordering every image from [C, H, W] to [H, W, C]
pub fn parse_batch(raw_buf: &[u8]) -> Result<Batch, DatasetError> {
    if raw_buf.is_empty() || raw_buf.len() % RECORD_BYTES != 0 {
        return Err(DatasetError::InvalidBatch(format!(
            "length {} is not a positive multiple of the {} byte record size",
            raw_buf.len(),
            RECORD_BYTES
        )));
    }
    let num_images = raw_buf.len() / RECORD_BYTES;
    if num_images > MAX_IMAGES {
        return Err(DatasetError::InvalidBatch(format!(
            "{num_images} records, a batch holds at most {MAX_IMAGES}"
        )));
    }

    let mut labels = Vec::<u8>::with_capacity(num_images);
    let mut pixels = Vec::<u8>::with_capacity(num_images * BYTES_PER_IMAGE);
    for record in raw_buf.chunks_exact(RECORD_BYTES) {
        labels.push(record[0]);
        pixels.extend_from_slice(&record[1..]);
    }

    let nchw = Array4::from_shape_vec((num_images, CHANNELS, IMAGE_SIDE, IMAGE_SIDE), pixels)?;
    let nhwc = nchw.permuted_axes([0, 2, 3, 1]).as_standard_layout().into_owned();
    Batch::from_parts(nhwc, labels)
}

/// Inverse of `parse_batch`
pub fn encode_batch(batch: &Batch) -> Vec<u8> {
    let mut raw_buf = Vec::with_capacity(batch.len() * RECORD_BYTES);
    let nchw = batch.images().permuted_axes([0, 3, 1, 2]);
    for (image, label) in nchw.axis_iter(Axis(0)).zip(batch.labels()) {
        raw_buf.push(*label);
        raw_buf.extend(image.iter());
    }
    raw_buf
}
