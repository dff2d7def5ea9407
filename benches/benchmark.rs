use criterion::{criterion_group, criterion_main, Criterion};
use face2gender::FeatureKind;
use image::{GrayImage, Luma};

fn synthetic_face(edge: u32) -> GrayImage {
    GrayImage::from_fn(edge, edge, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]))
}

fn bench_lbp_histogram(c: &mut Criterion) {
    let image = synthetic_face(150);
    let features = FeatureKind::LbpHistogram {
        points: 24,
        radius: 8.0,
    };

    c.bench_function("lbp histogram 150x150", |b| {
        b.iter(|| {
            let _ = features.extract(&image);
        })
    });
}

fn bench_resize_flatten(c: &mut Criterion) {
    let image = synthetic_face(250);
    let features = FeatureKind::ResizeFlatten {
        width: 150,
        height: 150,
    };

    c.bench_function("resize and flatten 250x250", |b| {
        b.iter(|| {
            let _ = features.extract(&image);
        })
    });
}

criterion_group!(benches, bench_lbp_histogram, bench_resize_flatten);
criterion_main!(benches);
