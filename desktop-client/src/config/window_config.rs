use serde::{Deserialize, Serialize};
use snake_common::config::{Validate, check_range};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Validate for WindowConfig {
    fn validate(&self) -> Result<(), String> {
        check_range("Window width", self.width, 200.0..=4000.0)?;
        check_range("Window height", self.height, 200.0..=4000.0)?;
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 560.0,
            height: 640.0,
        }
    }
}
