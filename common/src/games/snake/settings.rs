use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{Validate, check_range};

pub const DEFAULT_ROWS: usize = 15;
pub const DEFAULT_COLUMNS: usize = 15;
pub const DEFAULT_BASE_TICK_INTERVAL_MS: u64 = 100;
pub const DEFAULT_POINTS_PER_SPEED_UP: u32 = 2;
pub const DEFAULT_SPEED_STEP: f64 = 0.1;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SnakeSettings {
    pub rows: usize,
    pub columns: usize,
    pub base_tick_interval_ms: u64,
    /// Every this many points the speed multiplier grows by `speed_step`.
    pub points_per_speed_up: u32,
    pub speed_step: f64,
}

impl SnakeSettings {
    pub fn with_size(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_interval_ms)
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            base_tick_interval_ms: DEFAULT_BASE_TICK_INTERVAL_MS,
            points_per_speed_up: DEFAULT_POINTS_PER_SPEED_UP,
            speed_step: DEFAULT_SPEED_STEP,
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        check_range("Rows", self.rows, 5..=100)?;
        check_range("Columns", self.columns, 5..=100)?;
        check_range("Base tick interval (ms)", self.base_tick_interval_ms, 20..=2000)?;
        check_range("Points per speed up", self.points_per_speed_up, 1..=1000)?;
        if !(self.speed_step > 0.0 && self.speed_step <= 1.0) {
            return Err(format!(
                "Speed step must be in (0, 1], got {}",
                self.speed_step
            ));
        }
        Ok(())
    }
}
