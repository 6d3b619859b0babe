//! Food placement: pick a uniformly random free cell, avoiding the cells
//! the snake occupies.

use crate::grid::Cell;
use rand::Rng;

/// Sampling cap before giving up on finding a free cell.
pub const MAX_ATTEMPTS: u32 = 100;

/// Choose a cell for a new piece of food.
///
/// Samples uniformly over the whole grid and resamples while the result
/// lands on an occupied cell, up to [`MAX_ATTEMPTS`] tries. Past the cap,
/// the last sample is accepted even if it overlaps `occupied`; on a
/// near-full grid this can put food on the snake's body. That degraded
/// acceptance is deliberate: stalling the game on a failed search would be
/// worse than a rare overlapping pellet.
pub fn place<R: Rng>(occupied: &[Cell], cells_wide: i32, cells_high: i32, rng: &mut R) -> Cell {
    let mut cell = sample(cells_wide, cells_high, rng);
    for _ in 1..MAX_ATTEMPTS {
        if !occupied.contains(&cell) {
            return cell;
        }
        cell = sample(cells_wide, cells_high, rng);
    }
    cell
}

fn sample<R: Rng>(cells_wide: i32, cells_high: i32, rng: &mut R) -> Cell {
    Cell::new(rng.gen_range(0..cells_wide), rng.gen_range(0..cells_high))
}
