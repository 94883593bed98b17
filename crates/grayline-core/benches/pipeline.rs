//! Benchmarks for the Grayline image pipeline.
//!
//! Run with: cargo bench -p grayline-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use grayline_core::config::ResizeFilter;
use grayline_core::pipeline::transform;
use grayline_core::{Config, ExecutionMode, ImageCodec, Pipeline};
use image::{DynamicImage, Rgb, RgbImage};

fn source_image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(1920, 1080, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    }))
}

fn benchmark_resize(c: &mut Criterion) {
    let img = source_image();

    c.bench_function("resize_500_lanczos3", |b| {
        b.iter(|| transform::resize(black_box(&img), 500, 500, ResizeFilter::Lanczos3))
    });
}

fn benchmark_grayscale(c: &mut Criterion) {
    let img = transform::resize(&source_image(), 500, 500, ResizeFilter::Lanczos3);

    c.bench_function("grayscale_500", |b| {
        b.iter(|| transform::grayscale(black_box(&img)))
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let img = transform::grayscale(&transform::resize(
        &source_image(),
        500,
        500,
        ResizeFilter::Lanczos3,
    ));
    let codec = ImageCodec::default();

    c.bench_function("encode_jpeg_500", |b| {
        b.iter(|| {
            let _ = codec.encode(black_box(&img), "bench.jpeg");
        })
    });
}

fn benchmark_modes(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    std::fs::create_dir_all(images.join("output")).unwrap();

    let img = source_image();
    let sources: Vec<String> = (1..=4)
        .map(|i| {
            let path = images.join(format!("image{i}.jpeg"));
            img.save_with_format(&path, image::ImageFormat::Jpeg).unwrap();
            path.to_string_lossy().into_owned()
        })
        .collect();

    let mut config = Config::default();
    config.paths.source_segment = format!("{}/", images.display());
    config.paths.dest_segment = format!("{}/", images.join("output").display());
    let pipeline = Pipeline::new(&config);
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("pipeline_4_images");
    group.sample_size(10);
    for (name, mode) in [
        ("concurrent", ExecutionMode::Concurrent),
        ("sequential", ExecutionMode::Sequential),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| rt.block_on(pipeline.run(black_box(sources.clone()), mode, |_| {})))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_resize,
    benchmark_grayscale,
    benchmark_encode,
    benchmark_modes,
);
criterion_main!(benches);
