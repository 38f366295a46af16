use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetrion_core::Board;

fn bench_cell_ops(c: &mut Criterion) {
    c.bench_function("fill_clear_cell", |b| {
        let mut board = Board::new(10, 20).unwrap();
        b.iter(|| {
            for y in 0..20 {
                for x in 0..10 {
                    board.fill_cell(black_box(x), black_box(y));
                }
            }
            for y in 0..20 {
                for x in 0..10 {
                    board.clear_cell(black_box(x), black_box(y));
                }
            }
        })
    });
}

fn bench_clear_filled_rows(c: &mut Criterion) {
    c.bench_function("clear_filled_rows_x4", |b| {
        let mut template = Board::new(10, 20).unwrap();
        for y in [0, 2, 4, 6] {
            template.fill_row(y);
        }
        for y in [1, 3, 5] {
            template.fill_cell(4, y);
        }
        b.iter(|| {
            let mut board = template.clone();
            black_box(board.clear_filled_rows())
        })
    });
}

criterion_group!(benches, bench_cell_ops, bench_clear_filled_rows);
criterion_main!(benches);
