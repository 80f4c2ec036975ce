use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use qrdash::qr::{render_png, QrImage, QrRequest, QrStyle, RenderOptions};
use std::hint::black_box;

fn bench_render_styles(c: &mut Criterion) {
    let options = RenderOptions::default();
    let mut group = c.benchmark_group("render_png");

    for style in QrStyle::ALL {
        let mut request = QrRequest::new("https://example.com/some/longer/path?with=query");
        request.dot_style = style;
        request.eye_style = style;

        group.bench_with_input(BenchmarkId::from_parameter(style), &request, |b, request| {
            b.iter(|| render_png(black_box(request), &options))
        });
    }

    group.finish();
}

fn bench_render_sizes(c: &mut Criterion) {
    let request = QrRequest::new("https://example.com");
    let mut group = c.benchmark_group("render_module_size");

    for module_size in [4u32, 10, 20] {
        let options = RenderOptions {
            module_size,
            ..RenderOptions::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(module_size),
            &options,
            |b, options| b.iter(|| render_png(black_box(&request), options)),
        );
    }

    group.finish();
}

fn bench_data_uri(c: &mut Criterion) {
    let png = render_png(&QrRequest::new("https://example.com"), &RenderOptions::default()).unwrap();

    c.bench_function("qr_image_from_png", |b| {
        b.iter(|| QrImage::from_png(black_box(&png)))
    });

    let image = QrImage::from_png(&png);
    c.bench_function("qr_image_png_bytes", |b| {
        b.iter(|| black_box(&image).png_bytes())
    });
}

criterion_group!(benches, bench_render_styles, bench_render_sizes, bench_data_uri);
criterion_main!(benches);
