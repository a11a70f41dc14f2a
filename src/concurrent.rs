use crate::grid::Sweep;
use crate::sequential::sweep_rows;
use crate::{Grid, Result, Rule, Stepper, StepperConfig};

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::fmt;
use std::ops::Range;
use std::sync::Barrier;
use std::time::{Duration, Instant};

/// Rows each worker sweeps before meeting the others at the barrier.
const SYNC_ROWS: usize = 2;

/// Fewest rows a worker is ever given, so every band has rows past the synchronized ones.
pub const MIN_BAND_ROWS: usize = 4;

/// Steps a grid by splitting its rows into bands, one per worker of a fixed thread pool.
///
/// Workers share both generations without locks. Writing a next-generation cell also touches
/// the counts in the rows just above and below it, so the first rows of a band overlap the
/// last rows of the band above. Every worker sweeps its first two rows, waits at a barrier
/// until all workers have done the same, and only then sweeps the rest. The overlapping
/// writes of neighboring bands therefore never run at the same time.
pub struct ConcurrentStepper {
    rule: Rule,
    pool: ThreadPool,
    last: Duration,
}

impl ConcurrentStepper {
    /// Start a stepper with one worker per available core.
    pub fn new(rule: Rule) -> Result<Self> {
        Self::with_config(rule, StepperConfig::default())
    }

    pub fn with_config(rule: Rule, config: StepperConfig) -> Result<Self> {
        config.validate()?;
        let threads = config.worker_threads();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("lifegrid-worker-{}", i))
            .build()?;
        log::debug!("started concurrent stepper with {} workers", threads);
        Ok(ConcurrentStepper {
            rule,
            pool,
            last: Duration::default(),
        })
    }

    /// Size of the worker pool.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Wall-clock time taken by the most recent step.
    pub fn last_duration(&self) -> Duration {
        self.last
    }
}

impl Stepper for ConcurrentStepper {
    fn step(&mut self, grid: &mut Grid) {
        let start = Instant::now();
        grid.grow_if_needed();
        let workers = worker_count(self.workers(), grid.height());
        let bands = row_bands(grid.height(), workers);
        let barrier = Barrier::new(workers);
        let sweep = grid.sweep();
        let rule = &self.rule;
        // Every pool thread gets exactly one broadcast job, so all band owners run at once
        // and none can starve waiting at the barrier.
        self.pool.broadcast(|ctx| {
            if let Some(rows) = bands.get(ctx.index()) {
                unsafe { sweep_band(&sweep, rule, rows.clone(), &barrier) }
            }
        });
        grid.advance();
        self.last = start.elapsed();
        log::trace!(
            "concurrent step of {}x{} on {} workers took {:?}",
            grid.width(),
            grid.height(),
            workers,
            self.last
        );
    }

    fn rule(&self) -> &Rule {
        &self.rule
    }
}

impl fmt::Debug for ConcurrentStepper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentStepper")
            .field("rule", &self.rule)
            .field("workers", &self.workers())
            .field("last", &self.last)
            .finish()
    }
}

/// Sweep one band, meeting every other worker at `barrier` after its first rows.
///
/// # Safety
///
/// Every band of the step must be swept by its own thread through the same `barrier`, which
/// must count exactly one party per band, and each band must be at least [`MIN_BAND_ROWS`]
/// tall unless it is the only one.
unsafe fn sweep_band(sweep: &Sweep<'_>, rule: &Rule, rows: Range<usize>, barrier: &Barrier) {
    let split = (rows.start + SYNC_ROWS).min(rows.end);
    sweep_rows(sweep, rule, rows.start..split);
    barrier.wait();
    sweep_rows(sweep, rule, split..rows.end);
}

/// Workers used for a board of `height` rows: never more than `available`, never fewer than
/// [`MIN_BAND_ROWS`] rows each, and always at least one.
pub fn worker_count(available: usize, height: usize) -> usize {
    (height / MIN_BAND_ROWS).min(available).max(1)
}

/// Split `height` rows into `workers` contiguous bands. The last band takes the remainder.
pub fn row_bands(height: usize, workers: usize) -> Vec<Range<usize>> {
    let band = height / workers;
    (0..workers)
        .map(|i| {
            let start = i * band;
            let end = if i + 1 == workers { height } else { start + band };
            start..end
        })
        .collect()
}
