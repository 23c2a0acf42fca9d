use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use ndarray::prelude::*;

use crate::datasets::cifar::CifarBatches;
use crate::datasets::{check_range, Batch, BatchId, MAX_IMAGES};
use crate::encoders::grayscale::luminance;
use crate::error::DatasetError;

/// `dir/batch<id>-img<n>.png`
pub fn staged_image_path(dir: &Path, batch_id: BatchId, n: usize) -> PathBuf {
    dir.join(format!("batch{}-img{}.png", batch_id, n))
}

/// [H, W, C] array to an image buffer
pub fn image_to_rgb(image: ArrayView3<u8>) -> RgbImage {
    let (h, w, _) = image.dim();
    RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let (i, j) = (y as usize, x as usize);
        Rgb([image[[i, j, 0]], image[[i, j, 1]], image[[i, j, 2]]])
    })
}

/// Saves images `start..end` of a batch as png files in `dir`.
/// Staging always uses the same file names, so only one caller per
/// directory at a time.
pub fn save_images(
    batches: &CifarBatches,
    dir: impl AsRef<Path>,
    batch_id: u8,
    start: usize,
    end: usize,
) -> Result<Vec<PathBuf>, DatasetError> {
    let id = BatchId::new(batch_id)?;
    check_range(start, end, MAX_IMAGES)?;
    let batch = batches.load_batch(batch_id)?;
    stage_batch(&batch, dir.as_ref(), id, start, end)
}

pub fn stage_batch(
    batch: &Batch,
    dir: &Path,
    batch_id: BatchId,
    start: usize,
    end: usize,
) -> Result<Vec<PathBuf>, DatasetError> {
    check_range(start, end, batch.len())?;
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(DatasetError::file(dir))?;
    }
    (start..end)
        .map(|n| -> Result<PathBuf, DatasetError> {
            let path = staged_image_path(dir, batch_id, n);
            image_to_rgb(batch.image(n)).save(&path)?;
            Ok(path)
        })
        .collect()
}

/// Removes the files `save_images` wrote, files already gone are skipped
pub fn delete_images(
    dir: impl AsRef<Path>,
    batch_id: u8,
    start: usize,
    end: usize,
) -> Result<(), DatasetError> {
    let id = BatchId::new(batch_id)?;
    check_range(start, end, MAX_IMAGES)?;
    for n in start..end {
        remove_staged(&staged_image_path(dir.as_ref(), id, n))?;
    }
    Ok(())
}

fn remove_staged(path: &Path) -> Result<(), DatasetError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(DatasetError::File { path: path.to_path_buf(), source: e }),
    }
}

/// Reads an image file and returns its luminance as [H, W], using the same
/// weights as the grayscale encoder
pub fn convert_to_grayscale(path: impl AsRef<Path>) -> Result<Array2<u8>, DatasetError> {
    let img = image::open(path.as_ref())?.into_rgb8();
    let (w, h) = img.dimensions();
    Ok(Array2::from_shape_fn((h as usize, w as usize), |(i, j)| {
        let p = img.get_pixel(j as u32, i as u32);
        luminance(p[0], p[1], p[2])
    }))
}
