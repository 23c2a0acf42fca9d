use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use ndarray::prelude::*;
use plotters::prelude::*;

use super::staging::image_to_rgb;
use crate::datasets::cifar::CifarBatches;
use crate::datasets::labels::original_name;
use crate::datasets::{check_range, Batch, BatchId, MAX_IMAGES};
use crate::encoders::grayscale::luminance;
use crate::encoders::histogram::{channel_histogram, Channel, BINS};
use crate::error::DatasetError;

const PLOT_SIZE: (u32, u32) = (800, 400);

fn plot_err<E: std::fmt::Display>(e: E) -> DatasetError {
    DatasetError::Plot(e.to_string())
}

/// Loads a batch and checks that image `n` exists in it
fn load_single(batches: &CifarBatches, batch_id: u8, n: usize) -> Result<Batch, DatasetError> {
    BatchId::new(batch_id)?;
    let end = n
        .checked_add(1)
        .ok_or(DatasetError::InvalidRange { start: n, end: n, limit: MAX_IMAGES })?;
    check_range(n, end, MAX_IMAGES)?;
    let batch = batches.load_batch(batch_id)?;
    check_range(n, end, batch.len())?;
    Ok(batch)
}

/// Saves image `n` of a batch scaled up by `scale` (nearest neighbour) and
/// returns the name of its original class
pub fn render_image(
    batches: &CifarBatches,
    batch_id: u8,
    n: usize,
    out: impl AsRef<Path>,
    scale: u32,
) -> Result<&'static str, DatasetError> {
    let batch = load_single(batches, batch_id, n)?;
    let img = image_to_rgb(batch.image(n));
    let scale = scale.max(1);
    let (width, height) = (img.width() * scale, img.height() * scale);
    let img = imageops::resize(&img, width, height, FilterType::Nearest);
    img.save(out.as_ref())?;

    let name = original_name(batch.labels()[n]).unwrap_or("unknown");
    println!("Original class: {}", name);
    Ok(name)
}

/// Saves image `n` of a batch resized to `side` x `side` and converted to grayscale
pub fn render_grayscale(
    batches: &CifarBatches,
    batch_id: u8,
    n: usize,
    out: impl AsRef<Path>,
    side: u32,
) -> Result<(), DatasetError> {
    let batch = load_single(batches, batch_id, n)?;
    let img = image_to_rgb(batch.image(n));
    let img = imageops::resize(&img, side.max(1), side.max(1), FilterType::Triangle);
    let gray = GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        Luma([luminance(p[0], p[1], p[2])])
    });
    gray.save(out.as_ref())?;
    Ok(())
}

/// Red, green and blue histograms of one image
pub fn channel_histograms(image: ArrayView3<u8>) -> [[u32; BINS]; 3] {
    [Channel::Red, Channel::Green, Channel::Blue].map(|c| channel_histogram(image, c))
}

/// Plots image `n` of a batch next to its per channel histograms
pub fn plot_histogram(
    batches: &CifarBatches,
    batch_id: u8,
    n: usize,
    out: impl AsRef<Path>,
) -> Result<(), DatasetError> {
    let batch = load_single(batches, batch_id, n)?;
    draw_histogram(batch.image(n), out.as_ref())
}

pub fn draw_histogram(image: ArrayView3<u8>, out: &Path) -> Result<(), DatasetError> {
    let root = BitMapBackend::new(out, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let (left, right) = root.split_horizontally((PLOT_SIZE.0 / 2) as i32);

    // the image itself, one filled square per pixel
    let (h, w, _) = image.dim();
    let margin = 10i32;
    let cell = ((PLOT_SIZE.1 as i32 - 2 * margin) / h.max(w).max(1) as i32).max(1);
    for ((i, j), px) in image.slice(s![.., .., 0]).indexed_iter() {
        let color = RGBColor(*px, image[[i, j, 1]], image[[i, j, 2]]);
        let (x, y) = (margin + j as i32 * cell, margin + i as i32 * cell);
        left.draw(&Rectangle::new([(x, y), (x + cell, y + cell)], color.filled()))
            .map_err(plot_err)?;
    }

    let hists = channel_histograms(image);
    let max = hists.iter().flat_map(|h| h.iter()).copied().max().unwrap_or(0).max(1);
    let mut chart = ChartBuilder::on(&right)
        .margin(10)
        .build_cartesian_2d(0u32..BINS as u32, 0u32..max + 1)
        .map_err(plot_err)?;
    for (hist, color) in hists.iter().zip([RED, GREEN, BLUE]) {
        chart
            .draw_series(LineSeries::new(
                hist.iter().enumerate().map(|(i, c)| (i as u32, *c)),
                &color,
            ))
            .map_err(plot_err)?;
    }
    chart
        .plotting_area()
        .draw(&Rectangle::new([(0u32, 0u32), (BINS as u32 - 1, max)], BLACK.stroke_width(1)))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}


#[cfg(test)]
mod test {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::datasets::test::random_batch;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("animal_features_plots_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn rendered_outputs() {
        let dir = temp_dir("render");
        let batches = CifarBatches::new(&dir);
        batches.write_batch(1, &random_batch(&[3, 8])).unwrap();

        let name = render_image(&batches, 1, 1, dir.join("img.png"), 4).unwrap();
        assert_eq!(name, "ship");
        let img = image::open(dir.join("img.png")).unwrap();
        assert_eq!((img.width(), img.height()), (128, 128));

        render_grayscale(&batches, 1, 0, dir.join("gray.png"), 250).unwrap();
        let gray = image::open(dir.join("gray.png")).unwrap();
        assert_eq!((gray.width(), gray.height()), (250, 250));
        assert_eq!(gray.color(), image::ColorType::L8);

        plot_histogram(&batches, 1, 0, dir.join("hist.png")).unwrap();
        let plot = image::open(dir.join("hist.png")).unwrap();
        assert_eq!((plot.width(), plot.height()), PLOT_SIZE);

        assert!(render_image(&batches, 1, 2, dir.join("none.png"), 1).is_err());
        assert!(plot_histogram(&batches, 6, 0, dir.join("none.png")).is_err());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn index_past_the_end() {
        let dir = temp_dir("index");
        let batches = CifarBatches::new(&dir);
        batches.write_batch(2, &random_batch(&[0])).unwrap();

        for n in [1, MAX_IMAGES, usize::MAX] {
            let out = dir.join("none.png");
            let err = render_image(&batches, 2, n, &out, 1).unwrap_err();
            assert!(matches!(err, DatasetError::InvalidRange { start, .. } if start == n));
            let err = render_grayscale(&batches, 2, n, &out, 64).unwrap_err();
            assert!(matches!(err, DatasetError::InvalidRange { .. }));
            let err = plot_histogram(&batches, 2, n, &out).unwrap_err();
            assert!(matches!(err, DatasetError::InvalidRange { .. }));
            assert!(!out.exists());
        }
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn histograms_per_channel() {
        let batch = random_batch(&[0]);
        let hists = channel_histograms(batch.image(0));
        for (c, hist) in hists.iter().enumerate() {
            assert_eq!(hist.iter().sum::<u32>(), 1024);
            let v = batch.image(0)[[4, 4, c]];
            assert!(hist[v as usize] >= 1);
        }
    }
}
