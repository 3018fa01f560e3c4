// ─────────────────────────────────────────────────────────────────────
// Spiral Spring Core — Particle Swarm Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spring_core::optimizer::Optimizer;
use spring_core::pipeline::prepare_problem;
use spring_swarm::ParticleSwarm;
use spring_types::config::{DesignInputs, SearchOptions, SpringConfig, SwarmConfig};
use std::hint::black_box;

/// Reference PLA spring with a fixed seed so every sample does the same work.
fn make_config(swarm_size: usize, free_height: bool) -> SpringConfig {
    SpringConfig {
        design_name: format!("bench-{}", swarm_size),
        inputs: DesignInputs::pla_reference(),
        search: SearchOptions {
            height_range: free_height.then_some([3.0, 6.0]),
            ..Default::default()
        },
        swarm: SwarmConfig {
            swarm_size,
            max_iterations: 50,
            min_step: 0.0,
            min_objective_change: 0.0,
            seed: Some(42),
            ..Default::default()
        },
    }
}

fn bench_swarm(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_swarm");
    group.sample_size(20);

    for &n in &[25usize, 100] {
        for free_height in [false, true] {
            let cfg = make_config(n, free_height);
            let problem = prepare_problem(&cfg).expect("bench config should validate");
            let swarm = ParticleSwarm::new(cfg.swarm.clone());
            let label = if free_height { "t_l_h" } else { "t_l" };
            group.bench_with_input(BenchmarkId::new(label, n), &n, |b, _| {
                b.iter(|| {
                    let out = swarm.minimize(&problem).expect("swarm should converge");
                    black_box(out.objective);
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_swarm);
criterion_main!(benches);
