use clap::Parser;

use crate::error::ConfigError;
use crate::movement::MoveParams;
use crate::session::SessionConfig;

pub const MIN_RENDER_HEIGHT: usize = 60;

/// First-person maze explorer
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Maze width in cells for the first stage
    #[arg(long, default_value = "5")]
    pub maze_width: usize,

    /// Maze height in cells for the first stage
    #[arg(long, default_value = "5")]
    pub maze_height: usize,

    /// Seed for reproducible mazes
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Horizontal field of view in degrees
    #[arg(long, default_value = "66")]
    pub fov: f32,

    /// Height of the internal framebuffer, width follows the window aspect
    #[arg(long, default_value = "240")]
    pub render_height: usize,

    /// Walking speed in grid units per second
    #[arg(long, default_value = "2.5")]
    pub move_speed: f32,

    /// Keyboard turn rate in radians per second
    #[arg(long, default_value = "2.5")]
    pub turn_speed: f32,

    /// Radians of turn per pixel of mouse motion
    #[arg(long, default_value = "0.003")]
    pub mouse_sensitivity: f32,

    /// Start in the top-down map view
    #[arg(long)]
    pub map: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maze_width == 0 || self.maze_height == 0 {
            return Err(ConfigError::ZeroMazeDimension);
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov));
        }
        if self.render_height < MIN_RENDER_HEIGHT {
            return Err(ConfigError::RenderHeight {
                min: MIN_RENDER_HEIGHT,
                actual: self.render_height,
            });
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            base_width: self.maze_width,
            base_height: self.maze_height,
            seed: self.seed,
            fov: self.fov.to_radians(),
            movement: MoveParams {
                move_speed: self.move_speed,
                turn_speed: self.turn_speed,
                ..MoveParams::default()
            },
        }
    }
}
