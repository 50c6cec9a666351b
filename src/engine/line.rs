//! Slide-left transform over a single oriented line.
//!
//! Every function here assumes index 0 is the edge tiles slide toward; the
//! board's line extractor reverses Right/Down lines before calling in.

use super::{Score, Tile, MAX_TILE};

/// Result of collapsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collapsed {
    /// Sum of the values of all tiles formed by merges.
    pub points: Score,
    /// The collapsed line, zero-padded to the input length.
    pub line: Vec<Tile>,
}

/// True if some nonzero tile sits after a gap, i.e. sliding would move it.
pub fn can_slide(line: &[Tile]) -> bool {
    let mut seen_zero = false;
    for &val in line {
        if val == 0 {
            seen_zero = true;
        } else if seen_zero {
            return true;
        }
    }
    false
}

/// True if two nonzero tiles are equal once gaps are closed.
///
/// Pairs of [`MAX_TILE`] do not count: they cannot merge.
pub fn can_collapse(line: &[Tile]) -> bool {
    let mut last_seen = 0;
    for &val in line {
        if val == 0 {
            continue;
        }
        if val == last_seen && val != MAX_TILE {
            return true;
        }
        last_seen = val;
    }
    false
}

/// Maximal runs of equal values in a zero-free sequence, as `(value, count)`.
fn runs(compacted: impl IntoIterator<Item = Tile>) -> Vec<(Tile, usize)> {
    let mut out: Vec<(Tile, usize)> = Vec::new();
    for val in compacted {
        match out.last_mut() {
            Some((v, c)) if *v == val => *c += 1,
            _ => out.push((val, 1)),
        }
    }
    out
}

/// Slide every tile toward index 0 and merge equal neighbours pairwise.
///
/// A run of `c` equal tiles `v` becomes `c / 2` tiles of `2v` followed by one
/// `v` when `c` is odd. Merged tiles never merge again in the same pass.
/// Runs of [`MAX_TILE`] only slide.
pub fn collapse(line: &[Tile]) -> Collapsed {
    let mut out = Vec::with_capacity(line.len());
    let mut points: Score = 0;
    for (v, c) in runs(line.iter().copied().filter(|&t| t != 0)) {
        if v == MAX_TILE {
            out.extend(std::iter::repeat(v).take(c));
            continue;
        }
        let merged = v * 2;
        let pairs = c / 2;
        out.extend(std::iter::repeat(merged).take(pairs));
        if c % 2 == 1 {
            out.push(v);
        }
        points += merged as Score * pairs as Score;
    }
    out.resize(line.len(), 0);
    Collapsed { points, line: out }
}
