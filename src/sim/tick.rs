//! Lane update rule
//!
//! Advances the lane by one step. Pure: the same lane always produces the
//! same outcome, and nothing outside the input is read or written.
//!
//! Resolution runs in two phases over a snapshot of the input lane:
//! 1. Every projectile claims `i + 1`, as an `Impact` if a snowman stood there
//!    (one point) or as a moved projectile otherwise.
//! 2. Every snowman moves to `i - 1` unless it reaches the base (one miss), is
//!    met by a projectile at `i - 1` (already scored in phase 1), or finds its
//!    target claimed in phase 1, in which case it is dropped.
//!
//! Projectile claims never collide with each other and neither do snowman
//! moves, so each target cell is written at most once and the result does
//! not depend on iteration order.

use super::lane::{Cell, Grid};
use crate::consts::WIDTH;

/// Result of advancing the lane one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub grid: Grid,
    /// Collisions resolved this step
    pub score_delta: u32,
    /// Snowmen that reached the base this step
    pub miss_delta: u32,
    /// Cells where an `Impact` was created this step (ascending)
    pub impacts: Vec<usize>,
}

/// Advance the lane by one step
pub fn advance(prev: &Grid) -> Advance {
    let had_adversary: [bool; WIDTH] = std::array::from_fn(|i| prev[i] == Cell::Adversary);
    let had_projectile: [bool; WIDTH] = std::array::from_fn(|i| prev[i] == Cell::Projectile);

    let mut next = Grid::empty();
    let mut score_delta = 0;
    let mut miss_delta = 0;
    let mut impacts = Vec::new();

    // Phase 1: projectile claims
    for i in (0..WIDTH).filter(|&i| had_projectile[i]) {
        let target = i + 1;
        if target >= WIDTH {
            // Leaves the lane
            continue;
        }
        if had_adversary[target] {
            next.set(target, Cell::Impact);
            impacts.push(target);
            score_delta += 1;
        } else {
            next.place_if_empty(target, Cell::Projectile);
        }
    }

    // Phase 2: snowman moves against the committed claims
    for i in (0..WIDTH).filter(|&i| had_adversary[i]) {
        let Some(target) = i.checked_sub(1) else {
            miss_delta += 1;
            continue;
        };
        if had_projectile[target] {
            // The projectile's own claim already placed the impact
            continue;
        }
        next.place_if_empty(target, Cell::Adversary);
    }

    Advance {
        grid: next,
        score_delta,
        miss_delta,
        impacts,
    }
}
