//! Tunables for grid growth and stepping.

use crate::{Error, Result};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Controls how a [`Grid`](crate::Grid) lays out and grows its backing storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct GridConfig {
    /// Dead cells allocated on every side of the board when it is created.
    pub initial_margin: usize,
    /// Once the board comes this close to the physical edge the storage is reallocated.
    pub growth_threshold: usize,
    /// Upper bound on physical cells per buffer. Growth stops instead of exceeding it.
    pub max_cells: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            initial_margin: 10,
            growth_threshold: 4,
            max_cells: 1 << 26,
        }
    }
}

impl GridConfig {
    pub fn validate(&self) -> Result<()> {
        if self.growth_threshold == 0 {
            return Err(Error::InvalidConfig(
                "growth_threshold must be at least 1".into(),
            ));
        }
        if self.initial_margin <= self.growth_threshold {
            return Err(Error::InvalidConfig(format!(
                "initial_margin ({}) must exceed growth_threshold ({})",
                self.initial_margin, self.growth_threshold
            )));
        }
        if self.max_cells == 0 {
            return Err(Error::InvalidConfig("max_cells must be positive".into()));
        }
        Ok(())
    }
}

/// Controls the worker pool and timing window of the steppers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct StepperConfig {
    /// Worker threads for the concurrent stepper. `None` uses the host's available parallelism.
    pub workers: Option<usize>,
    /// Number of step timestamps kept for the rolling steps-per-second estimate.
    pub timer_window: usize,
}

impl Default for StepperConfig {
    fn default() -> Self {
        StepperConfig {
            workers: None,
            timer_window: 32,
        }
    }
}

impl StepperConfig {
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(Error::InvalidConfig("workers must be at least 1".into()));
        }
        if self.timer_window < 2 {
            return Err(Error::InvalidConfig(
                "timer_window must hold at least two timestamps".into(),
            ));
        }
        Ok(())
    }

    /// The worker pool size this configuration asks for.
    pub fn worker_threads(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GridConfig::default().validate().is_ok());
        assert!(StepperConfig::default().validate().is_ok());
    }

    #[test]
    fn margin_must_exceed_threshold() {
        let config = GridConfig {
            initial_margin: 4,
            growth_threshold: 4,
            ..GridConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn zero_workers_rejected() {
        let config = StepperConfig {
            workers: Some(0),
            ..StepperConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(StepperConfig::default().worker_threads() >= 1);
    }
}
