use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::camera::Pose;
use crate::error::MazeError;
use crate::grid::{Grid, Tile};
use crate::input::Intent;
use crate::maze::generate;
use crate::minimap::draw_map;
use crate::movement::{MoveParams, integrate};
use crate::projector::render_columns;
use crate::renderer::draw_columns;

/// Lattice cells added per axis on every new stage
pub const STAGE_GROWTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub base_width: usize,
    pub base_height: usize,
    pub seed: Option<u64>,
    pub fov: f32, // radians
    pub movement: MoveParams,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_width: 5,
            base_height: 5,
            seed: None,
            fov: 66f32.to_radians(),
            movement: MoveParams::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    FirstPerson,
    Map,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::FirstPerson => ViewMode::Map,
            ViewMode::Map => ViewMode::FirstPerson,
        }
    }
}

/// Lattice size of a 1-based stage
#[inline]
pub fn stage_size(base_width: usize, base_height: usize, stage: u32) -> (usize, usize) {
    let grow = STAGE_GROWTH * stage.saturating_sub(1) as usize;
    (base_width + grow, base_height + grow)
}

/// All mutable game state: the current stage, its grid and the player pose.
///
/// A frame is `update` then `render`, so the projector always sees the pose
/// produced in the same tick. Reaching the exit replaces grid and pose at once.
pub struct Session {
    config: SessionConfig,
    rng: StdRng,
    stage: u32,
    grid: Grid,
    pose: Pose,
    mode: ViewMode,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, MazeError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let (grid, pose) = build_stage(&config, 1, &mut rng)?;
        info!(
            "Stage 1: {}x{} maze ({})",
            config.base_width,
            config.base_height,
            config.seed.map_or("random seed".to_string(), |s| format!("seed {s}"))
        );
        Ok(Self {
            config,
            rng,
            stage: 1,
            grid,
            pose,
            mode: ViewMode::default(),
        })
    }

    pub fn stage(&self) -> u32 {
        self.stage
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        debug!("View mode: {:?}", self.mode);
    }

    /// Applies one frame of input, then advances the stage if the exit was
    /// reached. Returns true when a new stage began.
    pub fn update(&mut self, intent: &Intent, dt: f32) -> Result<bool, MazeError> {
        integrate(&mut self.pose, intent, &self.grid, dt, &self.config.movement);

        let [x, y] = self.pose.pos;
        if self.grid.cell_at(x, y) != Some(self.grid.landmarks().exit) {
            return Ok(false);
        }
        self.next_stage()?;
        Ok(true)
    }

    pub fn next_stage(&mut self) -> Result<(), MazeError> {
        let stage = self.stage + 1;
        let (grid, pose) = build_stage(&self.config, stage, &mut self.rng)?;
        self.grid = grid;
        self.pose = pose;
        self.stage = stage;
        info!(
            "Stage {stage}: {}x{} maze",
            (self.grid.width() - 1) / 2,
            (self.grid.height() - 1) / 2
        );
        Ok(())
    }

    /// Draws the current mode into a `width x height` framebuffer
    pub fn render(&self, buf: &mut [u32], width: usize, height: usize) {
        match self.mode {
            ViewMode::FirstPerson => {
                let columns = render_columns(&self.pose, &self.grid, self.config.fov, width, height);
                draw_columns(buf, width, height, &columns);
            }
            ViewMode::Map => draw_map(buf, width, height, &self.grid, &self.pose),
        }
    }
}

fn build_stage<R: Rng + ?Sized>(config: &SessionConfig, stage: u32, rng: &mut R) -> Result<(Grid, Pose), MazeError> {
    let (w, h) = stage_size(config.base_width, config.base_height, stage);
    let lattice = generate(w, h, rng)?;
    debug!("Stage {stage}: carved {} passages", lattice.passage_count());
    let grid = Grid::from_lattice(&lattice);

    // face along the corridor leaving the start tile
    let start = grid.landmarks().start;
    let angle = if grid.tile(start.0 + 1, start.1) == Some(Tile::Open) {
        0.0
    } else {
        std::f32::consts::FRAC_PI_2
    };
    Ok((grid, Pose::at_tile(start, angle)))
}
