use crate::{CycleDetector, Grid, Rule, StepTimer, Stepper, StepperConfig};

/// How a run of [`Session::run_until_settled`] ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// Every cell died.
    Extinct,
    /// The pattern repeated after `period` generations.
    Cycle { period: usize },
    /// The generation limit was reached first.
    Unsettled,
}

/// One simulation run: the starting generation, the live board and the stepper driving it.
#[derive(Debug)]
pub struct Session<S> {
    initial: Grid,
    grid: Grid,
    stepper: StepTimer<S>,
    generation: u64,
    cycles: CycleDetector,
}

impl<S: Stepper> Session<S> {
    pub fn new(grid: Grid, stepper: S) -> Self {
        Self::with_config(grid, stepper, &StepperConfig::default())
    }

    /// Like [`new`](Self::new), with the timer window taken from `config`.
    pub fn with_config(grid: Grid, stepper: S, config: &StepperConfig) -> Self {
        Session {
            initial: grid.deep_copy(),
            grid,
            stepper: StepTimer::with_config(stepper, config),
            generation: 0,
            cycles: CycleDetector::default(),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Generations stepped since the session started or was last reset.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rule(&self) -> &Rule {
        self.stepper.rule()
    }

    pub fn timer(&self) -> &StepTimer<S> {
        &self.stepper
    }

    pub fn steps_per_second(&self) -> Option<f64> {
        self.stepper.steps_per_second()
    }

    pub fn step(&mut self) {
        self.stepper.step(&mut self.grid);
        self.generation += 1;
    }

    pub fn run(&mut self, generations: u64) {
        for _ in 0..generations {
            self.step();
        }
    }

    /// Step until the population dies out, repeats, or `limit` generations have passed.
    pub fn run_until_settled(&mut self, limit: u64) -> Settlement {
        if self.grid.population() == 0 {
            return Settlement::Extinct;
        }
        self.cycles.observe(&self.grid);
        for _ in 0..limit {
            self.step();
            if self.grid.population() == 0 {
                log::info!("population died out at generation {}", self.generation);
                return Settlement::Extinct;
            }
            if let Some(period) = self.cycles.observe(&self.grid) {
                log::info!(
                    "period {} cycle reached at generation {}",
                    period,
                    self.generation
                );
                return Settlement::Cycle { period };
            }
        }
        Settlement::Unsettled
    }

    /// Edit the current generation, growing the board if the edit touches an edge.
    ///
    /// Growth to the left or top shifts the coordinates of every cell by one.
    pub fn edit(&mut self, alive: bool, x: usize, y: usize) {
        self.grid.edit_current(alive, x, y);
        self.grid.grow_if_needed();
        self.cycles.clear();
    }

    /// Go back to the starting generation.
    pub fn reset(&mut self) {
        self.grid = self.initial.deep_copy();
        self.generation = 0;
        self.cycles.clear();
        self.stepper.reset();
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
