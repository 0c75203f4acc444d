use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use mathdrill_core::{Engine, SkillTemplate, Tier};

fn bench_next_problem(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_problem");
    let engine = Engine::default();

    for template in SkillTemplate::ALL {
        for tier in Tier::ALL {
            let mut rng = StdRng::seed_from_u64(42);
            group.bench_function(format!("{}/{tier}", template.unit()), |b| {
                b.iter(|| engine.next_problem(black_box(template), black_box(tier), &mut rng))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_next_problem);
criterion_main!(benches);
