use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Validate;
use crate::identifiers::ComponentId;

use super::board::Board;

pub const DEFAULT_CONFIG_FILE: &str = "snake_engine.yaml";

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct EngineSettings {
    pub board_width: usize,
    pub board_height: usize,
    pub base_interval_ms: u64,
    pub render_floor_ms: u64,
    pub speed_increment: f64,
    pub required_components: Vec<String>,
}

impl EngineSettings {
    pub fn board(&self) -> Board {
        Board::new(self.board_width, self.board_height)
    }

    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    pub fn render_floor(&self) -> Duration {
        Duration::from_millis(self.render_floor_ms)
    }

    pub fn required_component_ids(&self) -> Vec<ComponentId> {
        self.required_components
            .iter()
            .map(|id| ComponentId::from(id.as_str()))
            .collect()
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            board_width: 15,
            board_height: 15,
            base_interval_ms: 400,
            render_floor_ms: 16,
            speed_increment: 0.1,
            required_components: vec![
                "snake".to_string(),
                "rat".to_string(),
                "canvas".to_string(),
            ],
        }
    }
}

impl Validate for EngineSettings {
    fn validate(&self) -> Result<(), String> {
        if !(2..=100).contains(&self.board_width) {
            return Err(format!(
                "board_width must be between 2 and 100, got {}",
                self.board_width
            ));
        }
        if !(2..=100).contains(&self.board_height) {
            return Err(format!(
                "board_height must be between 2 and 100, got {}",
                self.board_height
            ));
        }
        if self.base_interval_ms == 0 {
            return Err("base_interval_ms must be greater than 0".to_string());
        }
        if self.render_floor_ms == 0 {
            return Err("render_floor_ms must be greater than 0".to_string());
        }
        if !self.speed_increment.is_finite() || self.speed_increment <= 0.0 {
            return Err("speed_increment must be a positive number".to_string());
        }
        if self.required_components.iter().any(|id| id.trim().is_empty()) {
            return Err("required_components must not contain empty ids".to_string());
        }
        Ok(())
    }
}
