use crate::grid::Sweep;
use crate::{Grid, Outcome, Rule, Stepper};

use std::ops::Range;
use std::time::{Duration, Instant};

/// Steps a grid on the calling thread.
#[derive(Clone, Debug, Default)]
pub struct SequentialStepper {
    rule: Rule,
    last: Duration,
}

impl SequentialStepper {
    pub fn new(rule: Rule) -> Self {
        SequentialStepper {
            rule,
            last: Duration::default(),
        }
    }

    /// Wall-clock time taken by the most recent step.
    pub fn last_duration(&self) -> Duration {
        self.last
    }
}

impl Stepper for SequentialStepper {
    fn step(&mut self, grid: &mut Grid) {
        let start = Instant::now();
        grid.grow_if_needed();
        let height = grid.height();
        // Sole access through `&mut Grid`, one pass over every row.
        unsafe { sweep_rows(&grid.sweep(), &self.rule, 0..height) };
        grid.advance();
        self.last = start.elapsed();
        log::trace!(
            "sequential step of {}x{} took {:?}",
            grid.width(),
            grid.height(),
            self.last
        );
    }

    fn rule(&self) -> &Rule {
        &self.rule
    }
}

/// Decide the next generation for every cell of `rows`.
///
/// # Safety
///
/// `rows` must lie inside the board, each row must be swept once per step, and no other thread
/// may write the next-generation cells of `rows` or the rows directly above and below them while
/// this runs.
#[inline]
pub(crate) unsafe fn sweep_rows(sweep: &Sweep<'_>, rule: &Rule, rows: Range<usize>) {
    debug_assert!(rows.end <= sweep.height);
    for y in rows {
        for x in 0..sweep.width {
            let cell = sweep.current(x, y);
            // The next buffer starts dead, so only cells that end up alive are written.
            let alive = match rule.apply(cell.neighbors()) {
                Outcome::Birth => true,
                Outcome::Survive => cell.is_alive(),
                Outcome::Death => false,
            };
            if alive {
                sweep.set_next_alive(x, y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blinker_oscillates() {
        let mut grid = Grid::from_fn(5, 5, |x, y| y == 2 && (1..=3).contains(&x));
        let horizontal = grid.clone();
        let mut stepper = SequentialStepper::new(Rule::conway());
        stepper.step(&mut grid);
        assert!((1..=3).all(|y| grid.is_alive(2, y)));
        assert_eq!(grid.population(), 3);
        stepper.step(&mut grid);
        assert_eq!(grid, horizontal);
        assert!(grid.counts_consistent());
    }

    #[test]
    fn block_is_still() {
        let mut grid = Grid::from_fn(4, 4, |x, y| (1..=2).contains(&x) && (1..=2).contains(&y));
        let mut stepper = SequentialStepper::new(Rule::conway());
        for _ in 0..5 {
            stepper.step(&mut grid);
        }
        assert_eq!((grid.width(), grid.height()), (4, 4));
        assert_eq!(grid.population(), 4);
        assert!(grid.is_alive(1, 1) && grid.is_alive(2, 2));
    }

    #[test]
    fn edge_births_grow_the_board() {
        // A vertical blinker on the left edge turns horizontal and needs the column beyond it.
        let mut grid = Grid::from_fn(3, 3, |x, _| x == 0);
        let mut stepper = SequentialStepper::new(Rule::conway());
        stepper.step(&mut grid);
        assert_eq!(grid.population(), 3);
        assert_eq!(grid.to_rows(), vec![vec![true, true, true]]);
        assert!(grid.counts_consistent());
    }

    #[test]
    fn seeds_keep_live_cells_on_a_birth_count() {
        // (2, 2) has two live neighbors, the birth count of B2/S; the lone pair beside it has one.
        let mut grid = Grid::from_fn(7, 7, |x, y| [(2, 2), (1, 2), (3, 2)].contains(&(x, y)));
        let mut stepper = SequentialStepper::new(Rule::seeds());
        assert_eq!(stepper.rule().apply(grid.neighbor_count(2, 2)), Outcome::Birth);
        stepper.step(&mut grid);
        assert!(grid.is_alive(2, 2));
        assert!(!grid.is_alive(1, 2) && !grid.is_alive(3, 2));
        assert!(grid.counts_consistent());
    }

    #[test]
    fn highlife_keeps_a_crowded_centre() {
        let mut grid = Grid::from_fn(9, 9, |x, y| {
            (x, y) == (4, 4) || [(3, 3), (4, 3), (5, 3), (3, 5), (4, 5), (5, 5)].contains(&(x, y))
        });
        let mut stepper = SequentialStepper::new(Rule::highlife());
        assert_eq!(grid.neighbor_count(4, 4), 6);
        stepper.step(&mut grid);
        assert_eq!((grid.width(), grid.height()), (9, 9));
        assert!(grid.is_alive(4, 4));
    }
}
