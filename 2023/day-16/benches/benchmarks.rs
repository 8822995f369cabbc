use aoc2023_day_16::grid::Contraption;
use aoc2023_day_16::search::find_max_energized;
use aoc2023_day_16::{part1, part2};
use divan::{black_box, Bencher};

fn main() {
    divan::main();
}

/// Square layout with roughly one mirror or splitter in ten tiles, seeded so
/// every run benchmarks the same contraption.
fn layout(size: usize) -> String {
    const TILES: [char; 4] = ['/', '\\', '-', '|'];
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;

    (0..size)
        .map(|_| {
            (0..size)
                .map(|_| {
                    state = state
                        .wrapping_mul(6_364_136_223_846_793_005)
                        .wrapping_add(1_442_695_040_888_963_407);
                    let roll = (state >> 33) as usize;
                    if roll % 10 == 0 {
                        TILES[(roll / 10) % TILES.len()]
                    } else {
                        '.'
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[divan::bench]
fn bench_part1(bencher: Bencher) {
    let input = layout(110);
    bencher.bench(|| part1::process(black_box(&input)).unwrap());
}

#[divan::bench]
fn bench_part2(bencher: Bencher) {
    let input = layout(110);
    bencher.bench(|| part2::process(black_box(&input)).unwrap());
}

#[divan::bench(args = [10, 40, 110])]
fn search(bencher: Bencher, size: usize) {
    bencher
        .with_inputs(|| Contraption::parse(&layout(size)).unwrap())
        .bench_refs(|grid| find_max_energized(grid));
}
