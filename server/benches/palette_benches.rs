use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use proptest::prelude::*;
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::TestRunner;

use huewheel_lib::render::font::Fonts;
use huewheel_lib::{generate_palette, nearest_color_name, PaletteRenderer};

fn arb_hex() -> impl Strategy<Value = String> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| format!("#{r:02x}{g:02x}{b:02x}"))
}

fn sample_hexes(count: usize) -> Vec<String> {
    let mut runner = TestRunner::default();
    (0..count)
        .map(|_| {
            arb_hex()
                .new_tree(&mut runner)
                .expect("generate hex")
                .current()
        })
        .collect()
}

fn generate_benchmark(c: &mut Criterion) {
    let seeds = sample_hexes(64);
    c.bench_function("generate_palette", |b| {
        b.iter(|| {
            for seed in &seeds {
                black_box(generate_palette(black_box(seed)));
            }
        })
    });
}

fn nearest_name_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_color_name");
    for (label, hex) in [("exact", "#ff0000"), ("nearest", "#fe0102")] {
        group.bench_with_input(BenchmarkId::from_parameter(label), hex, |b, hex| {
            b.iter(|| nearest_color_name(black_box(hex)))
        });
    }
    group.finish();
}

fn draw_benchmark(c: &mut Criterion) {
    let dir = std::env::temp_dir();
    let renderer = PaletteRenderer::with_fonts(dir, Fonts::bitmap());
    let colors = generate_palette("#3498db")
        .expect("palette for benchmark")
        .to_hex_strings();

    c.bench_function("draw_palette", |b| {
        b.iter(|| renderer.draw(black_box(colors.as_slice())).expect("draw palette"))
    });
}

criterion_group!(
    benches,
    generate_benchmark,
    nearest_name_benchmark,
    draw_benchmark
);
criterion_main!(benches);
