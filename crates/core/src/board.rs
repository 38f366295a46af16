//! Board representation - one u32 bitmap per row for O(1) cell queries and
//! constant-time full-row detection against a precomputed mask.
//!
//! Column heights, the roof, and the filled-cell count are maintained
//! incrementally on every mutation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Maximum supported board width.
pub const MAX_BOARD_WIDTH: i32 = 32;

/// Maximum supported board height.
pub const MAX_BOARD_HEIGHT: i32 = 40;

/// Minimum supported width and height.
pub const MIN_BOARD_DIMENSION: i32 = 4;

/// A rectangular playing field. `(0, 0)` is the bottom-left corner.
///
/// Reads and writes outside the active `width x height` area are silently
/// ignored; the board acts as a sink beyond its edges so that cell loops
/// stamping a piece do not need to bounds-check.
#[derive(Clone, Debug)]
pub struct Board {
    rows: [u32; MAX_BOARD_HEIGHT as usize],
    column_heights: [i32; MAX_BOARD_WIDTH as usize],
    width: i32,
    height: i32,
    roof: i32,
    filled_count: u32,
    full_row_mask: u32,
}

impl Board {
    /// Create an empty board. Fails when either dimension is outside
    /// `[4, 32]` x `[4, 40]`.
    pub fn new(width: i32, height: i32) -> Result<Self, Error> {
        if !(MIN_BOARD_DIMENSION..=MAX_BOARD_WIDTH).contains(&width)
            || !(MIN_BOARD_DIMENSION..=MAX_BOARD_HEIGHT).contains(&height)
        {
            return Err(Error::InvalidDimensions { width, height });
        }

        let full_row_mask = if width == MAX_BOARD_WIDTH {
            u32::MAX
        } else {
            (1u32 << width) - 1
        };

        Ok(Self {
            rows: [0; MAX_BOARD_HEIGHT as usize],
            column_heights: [0; MAX_BOARD_WIDTH as usize],
            width,
            height,
            roof: 0,
            filled_count: 0,
            full_row_mask,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Height of the highest filled cell on the board, 0 when empty.
    pub fn roof(&self) -> i32 {
        self.roof
    }

    pub fn filled_cell_count(&self) -> u32 {
        self.filled_count
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Whether the cell at `(x, y)` is filled. Out-of-range reads are
    /// `false`.
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        (self.rows[y as usize] >> x) & 1 == 1
    }

    /// Fill the cell at `(x, y)`. Idempotent; out of range is a no-op.
    pub fn fill_cell(&mut self, x: i32, y: i32) {
        if !self.in_bounds(x, y) || self.is_filled(x, y) {
            return;
        }

        self.rows[y as usize] |= 1 << x;
        self.filled_count += 1;

        if y + 1 > self.column_heights[x as usize] {
            self.column_heights[x as usize] = y + 1;
            self.roof = self.roof.max(y + 1);
        }
    }

    /// Clear the cell at `(x, y)`. Idempotent; out of range is a no-op.
    pub fn clear_cell(&mut self, x: i32, y: i32) {
        if !self.in_bounds(x, y) || !self.is_filled(x, y) {
            return;
        }

        self.rows[y as usize] &= !(1 << x);
        self.filled_count -= 1;

        // Only the topmost cell of a column can lower its height, and only
        // the roof-supplying column can lower the roof.
        if y + 1 == self.column_heights[x as usize] {
            let was_roof = y + 1 == self.roof;
            self.column_heights[x as usize] = self.scan_column_height(x);
            if was_roof {
                self.roof = self
                    .column_heights
                    .iter()
                    .take(self.width as usize)
                    .copied()
                    .max()
                    .unwrap_or(0);
            }
        }
    }

    /// Fill every cell of row `y`.
    pub fn fill_row(&mut self, y: i32) {
        for x in 0..self.width {
            self.fill_cell(x, y);
        }
    }

    /// A row is filled iff all `width` cells in it are set. Out of range is
    /// `false`.
    pub fn is_row_filled(&self, y: i32) -> bool {
        if y < 0 || y >= self.height {
            return false;
        }
        self.rows[y as usize] == self.full_row_mask
    }

    /// Remove every full row, shifting the rows above each down by one, and
    /// return how many were removed.
    pub fn clear_filled_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = 0;
        while y < self.height {
            if self.rows[y as usize] == self.full_row_mask {
                for i in y..self.height - 1 {
                    self.rows[i as usize] = self.rows[i as usize + 1];
                }
                self.rows[self.height as usize - 1] = 0;
                cleared += 1;
                self.filled_count -= self.width as u32;
                // Stay on the same row index: everything above shifted down.
            } else {
                y += 1;
            }
        }

        if cleared > 0 {
            self.update_heights();
        }
        cleared
    }

    /// Height of the highest filled cell in `column`, 0 when the column is
    /// empty or out of range.
    pub fn column_height(&self, column: i32) -> i32 {
        if column < 0 || column >= self.width {
            return 0;
        }
        self.column_heights[column as usize]
    }

    /// Read-only view of all column heights.
    pub fn column_heights(&self) -> &[i32] {
        &self.column_heights[..self.width as usize]
    }

    /// Raw bitmap of row `y` (bit `x` is the cell at `(x, y)`), 0 out of
    /// range.
    pub fn row_bits(&self, y: i32) -> u32 {
        if y < 0 || y >= self.height {
            return 0;
        }
        self.rows[y as usize]
    }

    fn scan_column_height(&self, x: i32) -> i32 {
        for y in (0..self.height).rev() {
            if (self.rows[y as usize] >> x) & 1 == 1 {
                return y + 1;
            }
        }
        0
    }

    fn update_heights(&mut self) {
        self.roof = 0;
        for x in 0..self.width {
            let h = self.scan_column_height(x);
            self.column_heights[x as usize] = h;
            self.roof = self.roof.max(h);
        }
    }
}

/// Boards compare equal when they have the same dimensions and the same
/// occupancy over the active area.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rows[..self.height as usize] == other.rows[..other.height as usize]
    }
}

impl Eq for Board {}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in (0..self.height).rev() {
            for x in 0..self.width {
                write!(f, "{}", if self.is_filled(x, y) { "[]" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct BoardRepr {
    width: i32,
    height: i32,
    rows: Vec<u32>,
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        BoardRepr {
            width: self.width,
            height: self.height,
            rows: self.rows[..self.height as usize].to_vec(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = BoardRepr::deserialize(deserializer)?;
        let mut board =
            Board::new(repr.width, repr.height).map_err(serde::de::Error::custom)?;
        if repr.rows.len() != repr.height as usize {
            return Err(serde::de::Error::custom("row count does not match height"));
        }
        for (y, &bits) in repr.rows.iter().enumerate() {
            let bits = bits & board.full_row_mask;
            board.rows[y] = bits;
            board.filled_count += bits.count_ones();
        }
        board.update_heights();
        Ok(board)
    }
}
