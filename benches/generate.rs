use criterion::{Criterion, black_box, criterion_group, criterion_main};
use shoreline::batch::seed_range;
use shoreline::render::render_bundle;
use shoreline::{GenerationParams, GeographicSetting, generate, generate_batch};

const WORLD: f64 = 768.0;
const SEED: i64 = 2025;

fn bench_archetype_families(c: &mut Criterion) {
    for setting in [
        GeographicSetting::Coastal,
        GeographicSetting::BayHarbor,
        GeographicSetting::Peninsula,
        GeographicSetting::Delta,
        GeographicSetting::RiverValley,
        GeographicSetting::Inland,
    ] {
        c.bench_function(&format!("generate {setting}"), |b| {
            b.iter(|| generate(black_box(WORLD), SEED, Some(setting)));
        });
    }
}

fn bench_batch(c: &mut Criterion) {
    let params = GenerationParams::new(WORLD, SEED, None);
    let seeds = seed_range(SEED, 64);
    c.bench_function("generate_batch 64 seeds", |b| {
        b.iter(|| generate_batch(&params, black_box(&seeds)));
    });
}

fn bench_render(c: &mut Criterion) {
    let bundle = generate(WORLD, SEED, Some(GeographicSetting::Delta));
    c.bench_function("render_bundle 512px", |b| {
        b.iter(|| render_bundle(black_box(&bundle), 512));
    });
}

criterion_group!(benches, bench_archetype_families, bench_batch, bench_render);
criterion_main!(benches);
