// config.rs - Validated run settings

use std::time::Duration;

use crate::error::ConfigError;
use crate::patterns::Pattern;

/// Probability that a cell is alive when the grid is (re)seeded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedDensity(f64);

impl SeedDensity {
    pub const DEFAULT: f64 = 0.25;

    pub fn new(value: f64) -> Result<Self, ConfigError> {
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidDensity(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for SeedDensity {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Target time between pushed frames: `1 / max(1, fps)` seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameBudget(Duration);

impl FrameBudget {
    pub fn from_fps(fps: i64) -> Self {
        let fps = fps.max(1) as f64;
        Self(Duration::from_secs_f64(1.0 / fps))
    }

    pub fn duration(self) -> Duration {
        self.0
    }

    /// Time left to sleep after an iteration that took `elapsed`, if any.
    pub fn remaining(self, elapsed: Duration) -> Option<Duration> {
        self.0.checked_sub(elapsed).filter(|left| !left.is_zero())
    }
}

/// Everything the core needs from the command line.
#[derive(Clone, Debug)]
pub struct LifeSettings {
    pub density: SeedDensity,
    pub fps: i64,
    /// Starting pattern; reseeds are always random.
    pub pattern: Option<&'static Pattern>,
    pub rng_seed: Option<u64>,
}

impl LifeSettings {
    pub const DEFAULT_FPS: i64 = 30;

    pub fn new(density: f64, fps: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            density: SeedDensity::new(density)?,
            fps,
            pattern: None,
            rng_seed: None,
        })
    }

    pub fn frame_budget(&self) -> FrameBudget {
        FrameBudget::from_fps(self.fps)
    }
}

impl Default for LifeSettings {
    fn default() -> Self {
        Self {
            density: SeedDensity::default(),
            fps: Self::DEFAULT_FPS,
            pattern: None,
            rng_seed: None,
        }
    }
}
