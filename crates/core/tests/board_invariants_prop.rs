//! Property tests for the board cache invariants.
//!
//! After any sequence of cell mutations the three caches must agree with
//! the bitmap: `filled_cell_count` is the popcount, every column height is
//! the topmost filled cell plus one, and the roof is the tallest column.

use proptest::prelude::*;
use tetrion_core::{Board, Rotation};

#[derive(Debug, Clone, Copy)]
enum Op {
    Fill(i32, i32),
    Clear(i32, i32),
    FillRow(i32),
    ClearFilledRows,
}

fn assert_caches_coherent(board: &Board) {
    let mut popcount = 0;
    let mut max_height = 0;
    for x in 0..board.width() {
        let mut column_top = 0;
        for y in 0..board.height() {
            if board.is_filled(x, y) {
                popcount += 1;
                column_top = y + 1;
            }
        }
        assert_eq!(
            board.column_height(x),
            column_top,
            "column {x} height out of sync"
        );
        max_height = max_height.max(column_top);
    }
    assert_eq!(board.filled_cell_count(), popcount);
    assert_eq!(board.roof(), max_height);
}

proptest! {
    #[test]
    fn caches_stay_coherent_over_random_mutations(
        (width, height) in (4i32..=12, 4i32..=24),
        seed in proptest::collection::vec(any::<prop::sample::Index>(), 0..80),
    ) {
        let mut board = Board::new(width, height).unwrap();
        let ops: Vec<Op> = seed
            .iter()
            .map(|ix| {
                // Derive a deterministic op from the index sample.
                let n = ix.index(usize::MAX - 1);
                let x = (n % width as usize) as i32;
                let y = ((n / 7) % height as usize) as i32;
                match n % 6 {
                    0 | 1 | 2 => Op::Fill(x, y),
                    3 => Op::Clear(x, y),
                    4 => Op::FillRow(y),
                    _ => Op::ClearFilledRows,
                }
            })
            .collect();

        for op in ops {
            match op {
                Op::Fill(x, y) => board.fill_cell(x, y),
                Op::Clear(x, y) => board.clear_cell(x, y),
                Op::FillRow(y) => board.fill_row(y),
                Op::ClearFilledRows => {
                    board.clear_filled_rows();
                }
            }
            assert_caches_coherent(&board);
        }
    }

    #[test]
    fn clear_filled_rows_removes_exactly_the_full_rows(
        rows in proptest::collection::vec(0u32..(1 << 10), 1..20),
    ) {
        let mut board = Board::new(10, 20).unwrap();
        for (y, bits) in rows.iter().enumerate() {
            for x in 0..10 {
                if (bits >> x) & 1 == 1 {
                    board.fill_cell(x, y as i32);
                }
            }
        }

        let survivors: Vec<u32> = (0..board.height())
            .map(|y| board.row_bits(y))
            .filter(|&bits| bits != (1 << 10) - 1 && bits != 0)
            .collect();
        let full = (0..board.height())
            .filter(|&y| board.is_row_filled(y))
            .count() as u32;

        let cleared = board.clear_filled_rows();
        assert_eq!(cleared, full);
        assert_caches_coherent(&board);

        // Surviving rows keep their relative vertical order.
        let after: Vec<u32> = (0..board.height())
            .map(|y| board.row_bits(y))
            .filter(|&bits| bits != 0)
            .collect();
        assert_eq!(after, survivors);
        assert!((0..board.height()).all(|y| !board.is_row_filled(y)));
    }

    #[test]
    fn rotation_arithmetic_round_trips(index in 0usize..4) {
        let r = Rotation::ALL[index];
        prop_assert_eq!(r.flip().flip(), r);
        prop_assert_eq!(r.cw().ccw(), r);
        prop_assert_eq!(r.ccw().cw(), r);
    }
}
