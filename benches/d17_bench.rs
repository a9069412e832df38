use advent::d17_lib::{minimal_heat_loss, parse_city, REGULAR_CRUCIBLE, ULTRA_CRUCIBLE};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let input = "2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533";
    let city = parse_city(input).unwrap();
    c.bench_with_input(
        BenchmarkId::new("minimal_heat_loss", "regular"),
        &city,
        |b, i| b.iter(|| minimal_heat_loss(i, &REGULAR_CRUCIBLE)),
    );
    c.bench_with_input(
        BenchmarkId::new("minimal_heat_loss", "ultra"),
        &city,
        |b, i| b.iter(|| minimal_heat_loss(i, &ULTRA_CRUCIBLE)),
    );
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
