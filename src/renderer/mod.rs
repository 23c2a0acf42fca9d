//! Visual helpers around loaded batches: png staging of single images and
//! rendering images and their histograms to files.
pub mod plots;
pub mod staging;

pub use plots::{plot_histogram, render_grayscale, render_image};
pub use staging::{convert_to_grayscale, delete_images, save_images};
