//! Drives batch loading, label remapping and one feature encoder over a range
//! of images, producing either an in-memory training set or an arff file.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::datasets::cifar::CifarBatches;
use crate::datasets::labels::BinaryLabel;
use crate::datasets::{check_count, check_range, Batch, BatchId, MAX_IMAGES};
use crate::encoders::FeatureEncoder;
use crate::error::DatasetError;

pub mod arff;

use self::arff::ArffWriter;

/// Feature vectors with their parallel binary label codes
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingSet {
    pub features: Vec<Vec<f32>>,
    pub labels: Vec<u8>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[f32], u8)> {
        self.features.iter().map(|f| f.as_slice()).zip(self.labels.iter().copied())
    }
}

pub struct DatasetFormatter<'a, E: FeatureEncoder + ?Sized> {
    batches: &'a CifarBatches,
    encoder: &'a E,
}

impl<'a, E: FeatureEncoder + ?Sized> DatasetFormatter<'a, E> {
    pub fn new(batches: &'a CifarBatches, encoder: &'a E) -> Self {
        Self { batches, encoder }
    }

    /// Encodes images `start..end` of a batch. An empty range is a valid,
    /// empty result.
    pub fn format_batch_train(
        &self,
        batch_id: u8,
        start: usize,
        end: usize,
    ) -> Result<TrainingSet, DatasetError> {
        BatchId::new(batch_id)?;
        check_range(start, end, MAX_IMAGES)?;
        let batch = self.batches.load_batch(batch_id)?;
        self.encode_range(&batch, start, end)
    }

    pub fn encode_range(
        &self,
        batch: &Batch,
        start: usize,
        end: usize,
    ) -> Result<TrainingSet, DatasetError> {
        check_range(start, end, batch.len())?;
        let labels = batch.binary_labels();
        let features = (start..end)
            .map(|i| self.encoder.encode(batch.image(i)))
            .collect();
        Ok(TrainingSet {
            features,
            labels: labels[start..end].to_vec(),
        })
    }

    /// Writes the first `count` images of a batch to an arff file at `path`,
    /// truncating whatever was there. Nothing is written if validation fails.
    pub fn format_arff_file(
        &self,
        path: impl AsRef<Path>,
        batch_id: u8,
        count: usize,
    ) -> Result<(), DatasetError> {
        let path = path.as_ref();
        BatchId::new(batch_id)?;
        check_count(count, MAX_IMAGES)?;
        let batch = self.batches.load_batch(batch_id)?;
        check_count(count, batch.len())?;

        let file = File::create(path).map_err(DatasetError::file(path))?;
        self.write_arff(BufWriter::new(file), &batch, count)
            .map_err(DatasetError::file(path))?;
        println!(
            "  Wrote {} {} rows of batch {} to {:?}",
            count,
            self.encoder.name(),
            batch_id,
            path
        );
        Ok(())
    }

    /// Writes header and the first `count` rows of `batch` to `out`
    pub fn write_arff<W: Write>(&self, out: W, batch: &Batch, count: usize) -> std::io::Result<W> {
        let mut writer = ArffWriter::new(out, self.encoder.dim());
        writer.write_header()?;
        for (i, &label) in batch.labels().iter().enumerate().take(count) {
            let features = self.encoder.encode(batch.image(i));
            writer.write_row(&features, BinaryLabel::from_original(label))?;
        }
        writer.finish()
    }
}
