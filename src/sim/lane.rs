//! The lane: a fixed row of single-occupancy cells
//!
//! Position 0 is the defended base, `WIDTH - 1` is where snowmen appear.
//! The lane has a compact glyph encoding that is also its shareable form.

use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::WIDTH;
use crate::error::GridParseError;

/// Occupant of a single lane slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Bullet fired by the defender, travels toward `WIDTH - 1`
    Projectile,
    /// Snowman, travels toward the base at index 0
    Adversary,
    /// Explosion left by a collision, gone after one tick
    Impact,
}

impl Cell {
    pub const EMPTY_GLYPH: char = '_';
    pub const PROJECTILE_GLYPH: char = '-';
    pub const ADVERSARY_GLYPH: char = '⛄';
    pub const IMPACT_GLYPH: char = '💥';

    /// Single-character glyph for this cell
    pub const fn glyph(self) -> char {
        match self {
            Cell::Empty => Self::EMPTY_GLYPH,
            Cell::Projectile => Self::PROJECTILE_GLYPH,
            Cell::Adversary => Self::ADVERSARY_GLYPH,
            Cell::Impact => Self::IMPACT_GLYPH,
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            Self::EMPTY_GLYPH => Some(Cell::Empty),
            Self::PROJECTILE_GLYPH => Some(Cell::Projectile),
            Self::ADVERSARY_GLYPH => Some(Cell::Adversary),
            Self::IMPACT_GLYPH => Some(Cell::Impact),
            _ => None,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A lane of exactly `WIDTH` cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    cells: [Cell; WIDTH],
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty()
    }
}

impl Grid {
    /// All-empty lane
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH],
        }
    }

    /// Build a lane from any number of cells, padding with `Empty` on the
    /// right or truncating to `WIDTH`
    pub fn from_cells(cells: &[Cell]) -> Self {
        let mut grid = Self::empty();
        for (slot, cell) in grid.cells.iter_mut().zip(cells) {
            *slot = *cell;
        }
        grid
    }

    /// Tolerant decode: pads, truncates, and reads unknown glyphs as `Empty`
    pub fn decode(encoded: &str) -> Self {
        let mut grid = Self::empty();
        for (index, glyph) in encoded.chars().take(WIDTH).enumerate() {
            grid.cells[index] = Cell::from_glyph(glyph).unwrap_or_else(|| {
                log::debug!("Unknown glyph {glyph:?} at cell {index}, reading as empty");
                Cell::Empty
            });
        }
        grid
    }

    /// Glyph string of exactly `WIDTH` characters
    pub fn encode(&self) -> String {
        self.cells.iter().map(|c| c.glyph()).collect()
    }

    pub fn cells(&self) -> &[Cell; WIDTH] {
        &self.cells
    }

    /// Cell at `index`, or `None` past the end of the lane
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Overwrite the cell at `index`. Out-of-range writes are ignored.
    pub fn set(&mut self, index: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(index) {
            *slot = cell;
        }
    }

    /// Write `cell` only if the slot is currently empty. Returns whether the
    /// write happened.
    pub fn place_if_empty(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) if slot.is_empty() => {
                *slot = cell;
                true
            }
            _ => false,
        }
    }

    pub fn count(&self, kind: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == kind).count()
    }

    /// Projectiles plus adversaries
    pub fn token_count(&self) -> usize {
        self.count(Cell::Projectile) + self.count(Cell::Adversary)
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|c| c.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

impl Index<usize> for Grid {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.cells[index]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Strict decode: still pads and truncates, but rejects unknown glyphs
/// within the first `WIDTH` characters
impl FromStr for Grid {
    type Err = GridParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = Self::empty();
        for (index, glyph) in s.chars().take(WIDTH).enumerate() {
            grid.cells[index] =
                Cell::from_glyph(glyph).ok_or(GridParseError::UnknownGlyph { index, glyph })?;
        }
        Ok(grid)
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Ok(Self::decode(&encoded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lane_encoding() {
        let encoded = Grid::empty().encode();
        assert_eq!(encoded.chars().count(), WIDTH);
        assert!(encoded.chars().all(|c| c == '_'));
    }

    #[test]
    fn test_decode_pads_short_input() {
        let grid = Grid::decode("-_⛄");
        assert_eq!(grid[0], Cell::Projectile);
        assert_eq!(grid[1], Cell::Empty);
        assert_eq!(grid[2], Cell::Adversary);
        assert!(grid.cells()[3..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_decode_truncates_long_input() {
        let long: String = std::iter::repeat('⛄').take(WIDTH + 7).collect();
        let grid = Grid::decode(&long);
        assert_eq!(grid.count(Cell::Adversary), WIDTH);
        assert_eq!(grid.encode().chars().count(), WIDTH);
    }

    #[test]
    fn test_tolerant_decode_reads_unknown_as_empty() {
        let grid = Grid::decode("x-?💥");
        assert_eq!(grid[0], Cell::Empty);
        assert_eq!(grid[1], Cell::Projectile);
        assert_eq!(grid[2], Cell::Empty);
        assert_eq!(grid[3], Cell::Impact);
    }

    #[test]
    fn test_strict_parse_rejects_unknown_glyph() {
        let err = "__x_".parse::<Grid>().unwrap_err();
        assert_eq!(err, GridParseError::UnknownGlyph { index: 2, glyph: 'x' });
    }

    #[test]
    fn test_strict_parse_ignores_glyphs_past_the_end() {
        let mut s: String = std::iter::repeat('_').take(WIDTH).collect();
        s.push('x');
        let grid: Grid = s.parse().unwrap();
        assert!(grid.is_clear());
    }

    #[test]
    fn test_encode_decode_preserves_every_kind() {
        let mut grid = Grid::empty();
        grid.set(0, Cell::Projectile);
        grid.set(7, Cell::Impact);
        grid.set(WIDTH - 1, Cell::Adversary);
        assert_eq!(Grid::decode(&grid.encode()), grid);
    }

    #[test]
    fn test_place_if_empty() {
        let mut grid = Grid::empty();
        assert!(grid.place_if_empty(3, Cell::Adversary));
        assert!(!grid.place_if_empty(3, Cell::Projectile));
        assert_eq!(grid[3], Cell::Adversary);
        assert!(!grid.place_if_empty(WIDTH, Cell::Projectile));
    }

    #[test]
    fn test_from_cells_pads() {
        let grid = Grid::from_cells(&[Cell::Adversary]);
        assert_eq!(grid[0], Cell::Adversary);
        assert_eq!(grid.token_count(), 1);
    }

    #[test]
    fn test_serde_uses_glyph_string() {
        let mut grid = Grid::empty();
        grid.set(1, Cell::Projectile);
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, format!("\"{}\"", grid.encode()));
        let back: Grid = serde_json::from_str("\"_-\"").unwrap();
        assert_eq!(back, grid);
    }
}
