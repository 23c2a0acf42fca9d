use std::path::Path;

use animal_features_lib::configs::DriverParams;
use animal_features_lib::driver;
use anyhow::Result;

/// animal-features [config.ron]
///
/// Without a config the default jobs run: rgb, grayscale and histogram arff
/// files for the first 50 images of batches 1 to 5, read from
/// `cifar-10-batches-bin/` and written to the working directory.
fn main() -> Result<()> {
    let params = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading config {}", path);
            DriverParams::load(Path::new(&path))?
        }
        None => DriverParams::default(),
    };

    let written = driver::run(&params)?;
    println!("Done, wrote {} files", written.len());
    Ok(())
}
