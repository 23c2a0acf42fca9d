#[macro_use]
extern crate bencher;

use bencher::Bencher;

use animal_features_lib::{Batch, FeatureEncoder, Grayscale, Histogram, Rgb};
use ndarray::Array4;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::Rng;

const IMAGES: usize = 64;

fn batch() -> Batch {
    let mut rng = rand::thread_rng();
    let images = Array4::random((IMAGES, 32, 32, 3), Uniform::new_inclusive(0u8, 255u8));
    let labels = (0..IMAGES).map(|_| rng.gen_range(0..10u8)).collect();
    Batch::from_parts(images, labels).unwrap()
}

fn encode_all<E: FeatureEncoder>(bench: &mut Bencher, encoder: E) {
    let batch = batch();
    bench.iter(|| {
        (0..batch.len())
            .map(|i| encoder.encode(batch.image(i)))
            .collect::<Vec<_>>()
    })
}

fn bench_grayscale(bench: &mut Bencher) {
    encode_all(bench, Grayscale)
}

fn bench_rgb(bench: &mut Bencher) {
    encode_all(bench, Rgb)
}

fn bench_histogram(bench: &mut Bencher) {
    encode_all(bench, Histogram::default())
}

benchmark_group!(benches, bench_grayscale, bench_rgb, bench_histogram);
benchmark_main!(benches);
