use criterion::{criterion_group, criterion_main, Criterion};
use highway_lib::{CommandReader, Highway, HighwayConfig, Marker};
use once_cell::sync::Lazy;
use std::hint::black_box;

const STATIONS: i64 = 20_000;
const SPACING: i64 = 7;

/// Long highway with a repeating mix of short and long range vehicles.
fn synthetic_highway() -> Highway {
    let mut highway = Highway::new(HighwayConfig::default());
    for step in 0..STATIONS {
        let marker = step * SPACING;
        let vehicles = [(step % 5) as u64 * 4, (step % 13) as u64 * 9, 10];
        highway
            .add_station(marker, &vehicles)
            .expect("unique marker");
    }
    highway
}

static HIGHWAY: Lazy<Highway> = Lazy::new(synthetic_highway);
static LAST: Lazy<Marker> = Lazy::new(|| (STATIONS - 1) * SPACING);

fn benchmark_route_planning(c: &mut Criterion) {
    let highway = &*HIGHWAY;
    let last = *LAST;

    c.bench_function("plan_route_ascending_full_length", |b| {
        b.iter(|| {
            let plan = highway.plan_route(0, last).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("plan_route_descending_full_length", |b| {
        b.iter(|| {
            let plan = highway.plan_route(last, 0).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("build_index_20k", |b| {
        b.iter(|| black_box(synthetic_highway().stations().height()));
    });

    c.bench_function("command_stream_mixed", |b| {
        let mut script = String::new();
        for marker in 0..2_000 {
            script.push_str(&format!("add-station {} 2 {} 15\n", marker * 10, marker % 7));
        }
        for marker in (0..2_000).step_by(3) {
            script.push_str(&format!("remove-station {}\n", marker * 10));
        }
        script.push_str("plan-route 10 19990\n");

        b.iter(|| {
            let mut highway = Highway::default();
            let executed = CommandReader::new(script.as_bytes())
                .map(|command| command.expect("valid script").execute(&mut highway))
                .count();
            black_box(executed)
        });
    });
}

criterion_group!(benches, benchmark_route_planning);
criterion_main!(benches);
