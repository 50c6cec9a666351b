use rand::Rng;
use tracing::trace;

use super::state::Board;
use super::Tile;
use crate::error::EngineError;

/// Where a random tile landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub row: usize,
    pub col: usize,
    pub value: Tile,
}

impl Board {
    /// Put a 2 (probability `insertion_bias`) or a 4 into a uniformly chosen
    /// empty cell. Score is untouched.
    ///
    /// Returns `EngineError::NoEmptyCell` on a full board, leaving it as is.
    pub fn insert_random(&mut self) -> Result<Spawned, EngineError> {
        let empties = self.empty_cells();
        if empties.is_empty() {
            return Err(EngineError::NoEmptyCell);
        }
        let bias = self.insertion_bias();
        let idx = empties[self.rng.gen_range(0..empties.len())];
        let value = generate_random_tile(&mut self.rng, bias);
        self.set_cell(idx, value);
        let spawned = Spawned { row: idx / self.width(), col: idx % self.width(), value };
        trace!(row = spawned.row, col = spawned.col, value, "inserted tile");
        Ok(spawned)
    }
}

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R, bias: f64) -> Tile {
    if rng.gen::<f64>() < bias { 2 } else { 4 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn it_fills_the_board_then_refuses() {
        let mut b = Board::with_rng(3, 2, 0, 0.9, StdRng::seed_from_u64(11)).unwrap();
        for _ in 0..6 {
            let s = b.insert_random().unwrap();
            assert_eq!(b.tile(s.row, s.col), Some(s.value));
        }
        assert_eq!(b.count_empty(), 0);
        let before = b.snapshot();
        assert!(matches!(b.insert_random(), Err(EngineError::NoEmptyCell)));
        assert_eq!(b.snapshot(), before);
    }

    #[test]
    fn it_only_uses_empty_cells() {
        let mut b = Board::from_cells(
            &[vec![2, 4, 8], vec![16, 0, 32]],
            0.9,
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        let s = b.insert_random().unwrap();
        assert_eq!((s.row, s.col), (1, 1));
        assert_eq!(b.score(), 0);
    }

    #[test]
    fn it_respects_bias_extremes() {
        let mut twos = Board::with_rng(4, 4, 16, 1.0, StdRng::seed_from_u64(1)).unwrap();
        assert!(twos.snapshot().rows.iter().flatten().all(|&v| v == 2));
        assert!(twos.insert_random().is_err());
        let fours = Board::with_rng(4, 4, 16, 0.0, StdRng::seed_from_u64(1)).unwrap();
        assert!(fours.snapshot().rows.iter().flatten().all(|&v| v == 4));
    }

    #[test]
    fn it_is_reproducible_per_seed() {
        let a = Board::with_rng(5, 5, 6, 0.9, StdRng::seed_from_u64(99)).unwrap();
        let b = Board::with_rng(5, 5, 6, 0.9, StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
