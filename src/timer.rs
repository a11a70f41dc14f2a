use crate::{Grid, Rule, Stepper, StepperConfig};

use boolinator::Boolinator;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Wraps a [`Stepper`] and measures how fast it runs.
///
/// Keeps the completion time of the last few steps for a rolling generations-per-second
/// estimate. Timing never affects the generations produced.
#[derive(Debug)]
pub struct StepTimer<S> {
    inner: S,
    window: usize,
    finished: VecDeque<Instant>,
    last: Duration,
    total: Duration,
    steps: u64,
}

impl<S: Stepper> StepTimer<S> {
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, &StepperConfig::default())
    }

    /// Size the rate window from `config.timer_window`.
    pub fn with_config(inner: S, config: &StepperConfig) -> Self {
        Self::with_window(inner, config.timer_window)
    }

    /// Keep `window` timestamps. Fewer than two cannot give a rate and are raised to two.
    pub fn with_window(inner: S, window: usize) -> Self {
        let window = window.max(2);
        StepTimer {
            inner,
            window,
            finished: VecDeque::with_capacity(window),
            last: Duration::default(),
            total: Duration::default(),
            steps: 0,
        }
    }

    /// Number of completion timestamps kept for [`steps_per_second`](Self::steps_per_second).
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    /// Number of steps timed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Duration of the most recent step.
    pub fn last_duration(&self) -> Duration {
        self.last
    }

    /// Mean duration over every step timed so far.
    pub fn mean_duration(&self) -> Option<Duration> {
        (self.steps > 0).as_some_from(|| self.total.div_f64(self.steps as f64))
    }

    /// Steps per second across the timestamps in the window, once there are at least two.
    pub fn steps_per_second(&self) -> Option<f64> {
        let first = self.finished.front()?;
        let last = self.finished.back()?;
        let span = last.duration_since(*first).as_secs_f64();
        if self.finished.len() < 2 || span <= 0.0 {
            return None;
        }
        Some((self.finished.len() - 1) as f64 / span)
    }

    /// Forget all readings.
    pub fn reset(&mut self) {
        self.finished.clear();
        self.last = Duration::default();
        self.total = Duration::default();
        self.steps = 0;
    }
}

impl<S: Stepper> Stepper for StepTimer<S> {
    fn step(&mut self, grid: &mut Grid) {
        let start = Instant::now();
        self.inner.step(grid);
        let end = Instant::now();
        self.last = end - start;
        self.total += self.last;
        self.steps += 1;
        if self.finished.len() == self.window {
            self.finished.pop_front();
        }
        self.finished.push_back(end);
    }

    fn rule(&self) -> &Rule {
        self.inner.rule()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequentialStepper;

    #[test]
    fn counts_and_windows_steps() {
        let mut grid = Grid::from_fn(20, 20, |x, y| (x + y) % 3 == 0);
        let mut timer = StepTimer::with_window(SequentialStepper::new(Rule::conway()), 4);
        assert_eq!(timer.steps_per_second(), None);
        assert_eq!(timer.mean_duration(), None);
        for _ in 0..10 {
            timer.step(&mut grid);
        }
        assert_eq!(timer.steps(), 10);
        assert_eq!(timer.finished.len(), 4);
        assert!(timer.mean_duration().is_some());
        if let Some(rate) = timer.steps_per_second() {
            assert!(rate > 0.0);
        }
        timer.reset();
        assert_eq!(timer.steps(), 0);
        assert_eq!(timer.rule(), &Rule::conway());
    }

    #[test]
    fn mean_duration_past_u32_steps() {
        let mut timer = StepTimer::new(SequentialStepper::new(Rule::conway()));
        timer.steps = u64::from(u32::MAX) + 11;
        timer.total = Duration::from_secs(timer.steps);
        assert_eq!(timer.mean_duration(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn window_comes_from_config() {
        let config = StepperConfig {
            timer_window: 3,
            ..StepperConfig::default()
        };
        let mut grid = Grid::from_fn(8, 8, |x, y| y == 3 && (2..=4).contains(&x));
        let mut timer = StepTimer::with_config(SequentialStepper::new(Rule::conway()), &config);
        assert_eq!(timer.window(), 3);
        for _ in 0..6 {
            timer.step(&mut grid);
        }
        assert_eq!(timer.finished.len(), 3);
        assert_eq!(StepTimer::new(SequentialStepper::default()).window(), 32);
    }
}
