use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::direction::{Axis, Move};
use super::{Score, Tile};
use crate::config::{validate_params, BoardConfig};
use crate::error::EngineError;

/// A `width` x `height` grid of tiles, the running score, and the RNG that
/// feeds random insertion.
///
/// Cells are stored row-major. Every cell is 0 (empty) or a power of two >= 2.
/// Mutation only happens through [`Board::make_move`] and
/// [`Board::insert_random`]; rows and columns are read and written as
/// oriented lines (see [`Board::line`]).
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
    score: Score,
    insertion_bias: f64,
    pub(super) rng: StdRng,
}

/// Read-only copy of a board's grid and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub score: Score,
    /// `rows[r][c]` is the tile value at row `r`, column `c`.
    pub rows: Vec<Vec<Tile>>,
}

#[inline]
pub(crate) fn is_valid_tile(v: Tile) -> bool {
    v == 0 || (v >= 2 && v.is_power_of_two())
}

impl Board {
    /// Build a board seeded from OS entropy with `initial_tiles` random tiles.
    pub fn new(
        width: usize,
        height: usize,
        initial_tiles: usize,
        insertion_bias: f64,
    ) -> Result<Self, EngineError> {
        Self::with_rng(width, height, initial_tiles, insertion_bias, StdRng::from_entropy())
    }

    /// Like [`Board::new`] but drawing all randomness from `rng`.
    ///
    /// ```
    /// use merge_2048::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let b = Board::with_rng(4, 4, 2, 0.9, StdRng::seed_from_u64(42)).unwrap();
    /// assert_eq!(b.count_empty(), 14);
    /// assert_eq!(b.score(), 0);
    /// ```
    pub fn with_rng(
        width: usize,
        height: usize,
        initial_tiles: usize,
        insertion_bias: f64,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        validate_params(width, height, initial_tiles, insertion_bias)?;
        let mut board = Board {
            width,
            height,
            cells: vec![0; width * height],
            score: 0,
            insertion_bias,
            rng,
        };
        for _ in 0..initial_tiles {
            board.insert_random()?;
        }
        Ok(board)
    }

    pub fn from_config(cfg: &BoardConfig) -> Result<Self, EngineError> {
        let rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(cfg.width, cfg.height, cfg.initial_tiles, cfg.insertion_bias, rng)
    }

    /// Build a board from explicit rows with score 0 and no random seeding.
    ///
    /// ```
    /// use merge_2048::engine::{Board, Move};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut b = Board::from_cells(&[vec![2, 2], vec![0, 2]], 0.9, StdRng::seed_from_u64(1)).unwrap();
    /// assert!(b.make_move(Move::Left).unwrap());
    /// assert_eq!(b.score(), 4);
    /// ```
    pub fn from_cells(
        rows: &[Vec<Tile>],
        insertion_bias: f64,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        validate_params(width, height, 0, insertion_bias)?;
        let mut cells = Vec::with_capacity(width * height);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::InvalidArgument(format!(
                    "row {r} has {} cells, expected {width}",
                    row.len()
                )));
            }
            if let Some(&bad) = row.iter().find(|&&v| !is_valid_tile(v)) {
                return Err(EngineError::InvalidArgument(format!(
                    "row {r} holds {bad}, which is not 0 or a power of two >= 2"
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Board { width, height, cells, score: 0, insertion_bias, rng })
    }

    #[inline]
    pub fn width(&self) -> usize { self.width }

    #[inline]
    pub fn height(&self) -> usize { self.height }

    /// Total points from every merge so far.
    #[inline]
    pub fn score(&self) -> Score { self.score }

    #[inline]
    pub fn insertion_bias(&self) -> f64 { self.insertion_bias }

    /// Tile value at (`row`, `col`), or `None` when out of bounds.
    pub fn tile(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Highest tile on the board, 0 when empty.
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            score: self.score,
            rows: self.cells.chunks(self.width).map(<[Tile]>::to_vec).collect(),
        }
    }

    /// Number of lines a move along `axis` touches.
    #[inline]
    pub(crate) fn line_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.height,
            Axis::Vertical => self.width,
        }
    }

    #[inline]
    fn line_len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Flat cell index of position `pos` in line `index` as seen from `dir`.
    #[inline]
    fn cell_index(&self, dir: Move, index: usize, pos: usize) -> usize {
        let axis = dir.axis();
        let p = if dir.is_reversed() { self.line_len(axis) - 1 - pos } else { pos };
        match axis {
            Axis::Horizontal => index * self.width + p,
            Axis::Vertical => p * self.width + index,
        }
    }

    /// Row (Left/Right) or column (Up/Down) `index`, oriented so that element
    /// 0 is the edge tiles slide toward. `None` when `index` is not a
    /// row/column along `dir`'s axis.
    ///
    /// ```
    /// use merge_2048::engine::{Board, Move};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let b = Board::from_cells(&[vec![2, 4], vec![8, 16]], 0.9, StdRng::seed_from_u64(0)).unwrap();
    /// assert_eq!(b.line(Move::Left, 1), Some(vec![8, 16]));
    /// assert_eq!(b.line(Move::Right, 1), Some(vec![16, 8]));
    /// assert_eq!(b.line(Move::Up, 0), Some(vec![2, 8]));
    /// assert_eq!(b.line(Move::Down, 0), Some(vec![8, 2]));
    /// assert_eq!(b.line(Move::Up, 2), None);
    /// ```
    pub fn line(&self, dir: Move, index: usize) -> Option<Vec<Tile>> {
        if index < self.line_count(dir.axis()) {
            Some(self.read_line(dir, index))
        } else {
            None
        }
    }

    /// [`Board::line`] for an index already known to be in range.
    pub(crate) fn read_line(&self, dir: Move, index: usize) -> Vec<Tile> {
        (0..self.line_len(dir.axis()))
            .map(|pos| self.cells[self.cell_index(dir, index, pos)])
            .collect()
    }

    /// Inverse of [`Board::line`]: overwrites every cell of the line.
    pub(crate) fn write_line(&mut self, dir: Move, index: usize, line: &[Tile]) {
        debug_assert_eq!(line.len(), self.line_len(dir.axis()));
        for (pos, &val) in line.iter().enumerate() {
            let idx = self.cell_index(dir, index, pos);
            self.cells[idx] = val;
        }
    }

    pub(crate) fn add_score(&mut self, points: Score) {
        self.score += points;
    }

    pub(crate) fn set_cell(&mut self, idx: usize, val: Tile) {
        debug_assert!(is_valid_tile(val));
        self.cells[idx] = val;
    }

    /// Flat indices of empty cells, row-major.
    pub(crate) fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(), f)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.width * 8);
        writeln!(f)?;
        for (r, row) in self.rows.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        v => format!("{v:^7}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[Vec<Tile>]) -> Board {
        Board::from_cells(rows, 0.9, StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn it_rejects_bad_dimensions_and_tiles() {
        let rng = || StdRng::seed_from_u64(0);
        assert!(matches!(Board::with_rng(0, 4, 0, 0.9, rng()), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(Board::with_rng(4, 0, 0, 0.9, rng()), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(Board::from_cells(&[], 0.9, rng()), Err(EngineError::InvalidArgument(_))));
        assert!(Board::from_cells(&[vec![2, 3]], 0.9, rng()).is_err());
        assert!(Board::from_cells(&[vec![1, 0]], 0.9, rng()).is_err());
        assert!(Board::from_cells(&[vec![2, 0], vec![2]], 0.9, rng()).is_err());
    }

    #[test]
    fn it_seeds_initial_tiles() {
        let b = Board::with_rng(3, 5, 4, 0.9, StdRng::seed_from_u64(3)).unwrap();
        assert_eq!((b.width(), b.height()), (3, 5));
        assert_eq!(b.count_empty(), 11);
        assert_eq!(b.score(), 0);
        assert!(b.snapshot().rows.iter().flatten().all(|&v| v == 0 || v == 2 || v == 4));
    }

    #[test]
    fn it_extracts_rectangular_lines() {
        let b = board(&[vec![2, 4, 8], vec![16, 32, 64]]);
        assert_eq!(b.line_count(Axis::Horizontal), 2);
        assert_eq!(b.line_count(Axis::Vertical), 3);
        assert_eq!(b.line(Move::Left, 0), Some(vec![2, 4, 8]));
        assert_eq!(b.line(Move::Right, 0), Some(vec![8, 4, 2]));
        assert_eq!(b.line(Move::Up, 2), Some(vec![8, 64]));
        assert_eq!(b.line(Move::Down, 2), Some(vec![64, 8]));
        assert_eq!(b.line(Move::Left, 2), None);
        assert_eq!(b.line(Move::Down, 3), None);
    }

    #[test]
    fn it_write_line_inverts_line() {
        let rows = vec![vec![2, 4, 8], vec![16, 32, 64]];
        for dir in Move::ALL {
            let mut b = board(&rows);
            for i in 0..b.line_count(dir.axis()) {
                let l = b.read_line(dir, i);
                b.write_line(dir, i, &l);
            }
            assert_eq!(b.snapshot().rows, rows, "{dir}");
        }
        let mut b = board(&rows);
        b.write_line(Move::Down, 1, &[128, 0]);
        assert_eq!(b.snapshot().rows, vec![vec![2, 0, 8], vec![16, 128, 64]]);
    }

    #[test]
    fn it_queries_tiles() {
        let b = board(&[vec![0, 4], vec![2048, 2]]);
        assert_eq!(b.tile(1, 0), Some(2048));
        assert_eq!(b.tile(2, 0), None);
        assert_eq!(b.highest_tile(), 2048);
        assert_eq!(b.count_empty(), 1);
        assert_eq!(b.empty_cells(), vec![0]);
    }

    #[test]
    fn it_displays_grid() {
        let b = board(&[vec![2, 0], vec![0, 1024]]);
        let s = b.to_string();
        assert!(s.contains("   2   |       "));
        assert!(s.contains("       | 1024  "));
        assert!(s.contains(&"-".repeat(16)));
    }
}
