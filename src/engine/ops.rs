use tracing::debug;

use super::direction::Move;
use super::line::{can_collapse, can_slide, collapse};
use super::state::{Board, Snapshot};
use super::{Score, Tile};
use crate::error::EngineError;

/// Every line of one move, collapsed but not yet written back.
struct Staged {
    lines: Vec<Vec<Tile>>,
    points: Score,
}

impl Board {
    /// True if at least one line along `dir`'s axis can slide or collapse.
    pub fn is_legal(&self, dir: Move) -> bool {
        (0..self.line_count(dir.axis())).any(|i| {
            let line = self.read_line(dir, i);
            can_slide(&line) || can_collapse(&line)
        })
    }

    /// The directions that would change the board, in `Move::ALL` order.
    ///
    /// An empty result means no move is possible; deciding that the game is
    /// over is left to the caller.
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL.into_iter().filter(|&d| self.is_legal(d)).collect()
    }

    fn stage(&self, dir: Move) -> Staged {
        let mut points = 0;
        let lines = (0..self.line_count(dir.axis()))
            .map(|i| {
                let c = collapse(&self.read_line(dir, i));
                points += c.points;
                c.line
            })
            .collect();
        Staged { lines, points }
    }

    /// The board `dir` would produce before the random tile is added, with
    /// the merge points already counted in `score`. `None` if illegal.
    pub fn preview(&self, dir: Move) -> Option<Snapshot> {
        if !self.is_legal(dir) {
            return None;
        }
        let mut next = self.clone();
        next.apply(dir, self.stage(dir));
        Some(next.snapshot())
    }

    fn apply(&mut self, dir: Move, staged: Staged) {
        for (i, line) in staged.lines.iter().enumerate() {
            self.write_line(dir, i, line);
        }
        self.add_score(staged.points);
    }

    /// Slide and merge every line toward `dir`, add the merge points to the
    /// score, then insert one random tile.
    ///
    /// Returns `Ok(false)` and leaves the board untouched when `dir` is not
    /// legal. `EngineError::NoEmptyCell` means the collapsed board would have
    /// no room for the new tile; the board is also left untouched then.
    ///
    /// ```
    /// use merge_2048::engine::{Board, Move};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut b = Board::from_cells(&[vec![2, 4], vec![8, 16]], 0.9, StdRng::seed_from_u64(0)).unwrap();
    /// assert!(b.legal_moves().is_empty());
    /// assert!(!b.make_move(Move::Up).unwrap());
    /// ```
    pub fn make_move(&mut self, dir: Move) -> Result<bool, EngineError> {
        if !self.is_legal(dir) {
            debug!(%dir, "move rejected");
            return Ok(false);
        }
        let staged = self.stage(dir);
        if !staged.lines.iter().flatten().any(|&v| v == 0) {
            return Err(EngineError::NoEmptyCell);
        }
        let points = staged.points;
        self.apply(dir, staged);
        self.insert_random()?;
        debug!(%dir, points, score = self.score(), "move accepted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(rows: &[Vec<Tile>]) -> Board {
        Board::from_cells(rows, 0.9, StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn it_reports_legal_moves() {
        let b = board(&[vec![2, 0], vec![0, 0]]);
        assert_eq!(b.legal_moves(), vec![Move::Down, Move::Right]);
        let b = board(&[vec![2, 2], vec![4, 8]]);
        assert_eq!(b.legal_moves(), vec![Move::Left, Move::Right]);
        let b = board(&[vec![2, 4], vec![8, 16]]);
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn it_previews_each_direction() {
        let b = board(&[
            vec![2, 0, 2, 4],
            vec![0, 4, 4, 4],
            vec![2, 0, 0, 2],
            vec![8, 8, 16, 16],
        ]);
        let left = b.preview(Move::Left).unwrap();
        assert_eq!(
            left.rows,
            vec![vec![4, 4, 0, 0], vec![8, 4, 0, 0], vec![4, 0, 0, 0], vec![16, 32, 0, 0]]
        );
        assert_eq!(left.score, 4 + 8 + 4 + 16 + 32);
        let right = b.preview(Move::Right).unwrap();
        assert_eq!(
            right.rows,
            vec![vec![0, 0, 4, 4], vec![0, 0, 4, 8], vec![0, 0, 0, 4], vec![0, 0, 16, 32]]
        );
        let up = b.preview(Move::Up).unwrap();
        assert_eq!(
            up.rows,
            vec![vec![4, 4, 2, 8], vec![8, 8, 4, 2], vec![0, 0, 16, 16], vec![0, 0, 0, 0]]
        );
        let down = b.preview(Move::Down).unwrap();
        assert_eq!(
            down.rows,
            vec![vec![0, 0, 0, 0], vec![0, 0, 2, 8], vec![4, 4, 4, 2], vec![8, 8, 16, 16]]
        );
    }

    #[test]
    fn it_preview_none_when_illegal() {
        let b = board(&[vec![2, 4, 8]]);
        assert!(b.preview(Move::Left).is_none());
        assert!(b.preview(Move::Up).is_none());
        assert!(b.preview(Move::Down).is_none());
    }

    #[test]
    fn it_moves_max_tiles_without_merging() {
        use crate::engine::MAX_TILE;
        let mut b = board(&[vec![MAX_TILE, MAX_TILE, 0]]);
        assert_eq!(b.legal_moves(), vec![Move::Right]);
        assert!(b.make_move(Move::Right).unwrap());
        assert_eq!(b.score(), 0);
        let rows = b.snapshot().rows;
        assert_eq!(&rows[0][1..], &[MAX_TILE, MAX_TILE]);
        assert!(rows[0][0] == 2 || rows[0][0] == 4);
        assert!(b.legal_moves().is_empty());
    }

    #[test]
    fn it_applies_move_then_inserts() {
        let mut b = board(&[vec![2, 2], vec![0, 2]]);
        assert!(b.make_move(Move::Left).unwrap());
        assert_eq!(b.score(), 4);
        let rows = b.snapshot().rows;
        assert_eq!(rows[0][0], 4);
        assert_eq!(rows[1][0], 2);
        assert_eq!(b.count_empty(), 1);
    }
}
