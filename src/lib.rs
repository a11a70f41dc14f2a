//! Lifegrid is a library for running outer-totalistic cellular automata on a growing grid.
//!
//! A [`Grid`] keeps two generations side by side, each cell packed together with its live
//! neighbor count, and widens itself whenever the population reaches an edge. A [`Rule`]
//! decides every cell's next state from that count, and a [`Stepper`] sweeps the board
//! either on the calling thread ([`SequentialStepper`]) or across a fixed worker pool
//! ([`ConcurrentStepper`]). Both steppers produce identical generations.

mod cell;
mod concurrent;
mod config;
mod error;
mod grid;
mod history;
mod moore;
mod rule;
mod sequential;
mod session;
mod timer;

pub use cell::*;
pub use concurrent::*;
pub use config::*;
pub use error::*;
pub use grid::*;
pub use history::*;
pub use moore::*;
pub use rule::*;
pub use sequential::*;
pub use session::*;
pub use timer::*;

/// Advances a [`Grid`] by one generation.
///
/// A stepper holds no board state of its own. Calls on the same grid must not overlap, and the
/// grid must not be edited while a step is in flight.
pub trait Stepper {
    /// Decide every cell of the next generation from the current one, then advance the grid.
    fn step(&mut self, grid: &mut Grid);

    /// The rule this stepper applies.
    fn rule(&self) -> &Rule;
}

impl<S: Stepper + ?Sized> Stepper for Box<S> {
    #[inline]
    fn step(&mut self, grid: &mut Grid) {
        (**self).step(grid)
    }

    #[inline]
    fn rule(&self) -> &Rule {
        (**self).rule()
    }
}
