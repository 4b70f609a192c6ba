use criterion::{black_box, criterion_group, criterion_main, Criterion};

use npuzzle_solver::{parse_board, Solver};

// a four-move instance
const SIMPLE_INPUT: &str = "
3
 0 1 3
 4 2 5
 7 8 6
";

// fourteen moves
const MEDIUM_INPUT: &str = "
3
 8 1 3
 4 0 2
 7 6 5
";

// twenty-two moves
const HARDER_INPUT: &str = "
3
 7 3 2
 5 4 6
 0 8 1
";

fn criterion_bench(c: &mut Criterion) {
    c.bench_function("simple", |b| {
        let input = parse_board(SIMPLE_INPUT).unwrap();
        b.iter(|| {
            Solver::new(black_box(input.clone()));
        })
    });

    c.bench_function("medium", |b| {
        let input = parse_board(MEDIUM_INPUT).unwrap();
        b.iter(|| {
            Solver::new(black_box(input.clone()));
        })
    });

    c.bench_function("harder", |b| {
        let input = parse_board(HARDER_INPUT).unwrap();
        b.iter(|| {
            Solver::new(black_box(input.clone()));
        })
    });
}

criterion_group!(benches, criterion_bench);
criterion_main!(benches);
