//! Benchmarks for single covering attempts.
//!
//! # Benchmarks
//!
//! - **`cover_rect`**: Covers a 12x12 rectangle with blocks of four positions,
//!   including the finishability check after every block.
//! - **`cover_rect_path`**: The same rectangle with the path constraint active.
//! - **`cover_pyramid_planar`**: Covers a four-layer pyramid with planar blocks
//!   of five spheres.
//!
//! # Test Data
//!
//! Uses three fixed seeds so that each benchmark replays the same searches:
//!
//! - **`seed_0`**: `c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1`
//! - **`seed_1`**: `a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3`
//! - **`seed_2`**: `1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef`
//!
//! An attempt may end in a dead end; its time is measured all the same.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench coverer
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use teselace_core::{PyramidTopology, RectTopology, Topology};
use teselace_coverer::{BlockSizes, ConstraintKind, CoveringConfig, CoveringModel, CoveringSeed};

const SEEDS: [&str; 3] = [
    "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1",
    "a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3",
    "1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef",
];

fn bench_cover<T: Topology>(c: &mut Criterion, name: &str, topology: &T, config: &CoveringConfig) {
    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = CoveringSeed::from_str(seed).unwrap();
        let model = CoveringModel::with_seed(topology.clone(), config.clone(), seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new(name, format!("seed_{i}")),
            &model,
            |b, model| {
                b.iter_batched(
                    || hint::black_box(model.clone()),
                    |mut model| model.try_cover(),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_cover_rect(c: &mut Criterion) {
    let config = CoveringConfig::new(BlockSizes::fixed(4).unwrap());
    bench_cover(c, "cover_rect", &RectTopology::new(12, 12).unwrap(), &config);
}

fn bench_cover_rect_path(c: &mut Criterion) {
    let config =
        CoveringConfig::new(BlockSizes::fixed(4).unwrap()).with_constraint(ConstraintKind::Path);
    bench_cover(c, "cover_rect_path", &RectTopology::new(12, 12).unwrap(), &config);
}

fn bench_cover_pyramid_planar(c: &mut Criterion) {
    let config =
        CoveringConfig::new(BlockSizes::fixed(5).unwrap()).with_constraint(ConstraintKind::Planar);
    bench_cover(
        c,
        "cover_pyramid_planar",
        &PyramidTopology::new(4).unwrap(),
        &config,
    );
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_cover_rect,
        bench_cover_rect_path,
        bench_cover_pyramid_planar
);
criterion_main!(benches);
