use crate::grid::{Grid, Tile};

// Stand-in for |1/dir| on an axis the ray never moves along
const NO_CROSSING: f32 = 1e30;
// Replaces an exactly-zero direction component in the distance formula
const DIR_EPSILON: f32 = 1e-6;

/// Which family of grid lines the ray crossed last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    X, // stepped along X, hit a face of constant x
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayHit {
    Wall { distance: f32, side: Side },
    /// Left the grid without meeting a wall
    Void,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayResult {
    pub hit: RayHit,
    pub start_seen: bool,
    pub exit_seen: bool,
    pub steps: usize,
}

impl RayResult {
    fn void(steps: usize) -> Self {
        Self {
            hit: RayHit::Void,
            start_seen: false,
            exit_seen: false,
            steps,
        }
    }

    /// Perpendicular distance to the wall, if one was hit
    #[inline]
    pub fn distance(&self) -> Option<f32> {
        match self.hit {
            RayHit::Wall { distance, .. } => Some(distance),
            RayHit::Void => None,
        }
    }
}

/// Walks one ray through the grid with a DDA until it enters a wall tile.
///
/// Landmark flags latch as soon as the ray passes through the start or exit
/// tile, even when the wall it finally hits lies far behind it. The origin tile
/// counts as passed through.
pub fn cast(origin_x: f32, origin_y: f32, angle: f32, grid: &Grid) -> RayResult {
    if !(origin_x >= 0.0 && origin_y >= 0.0) {
        return RayResult::void(0);
    }
    let mut map_x = origin_x.floor() as i64;
    let mut map_y = origin_y.floor() as i64;
    let Some(origin_tile) = grid.tile(map_x as usize, map_y as usize) else {
        return RayResult::void(0);
    };

    let landmarks = grid.landmarks();
    let mut start_seen = false;
    let mut exit_seen = false;
    let mut note_landmark = |x: i64, y: i64| {
        let cell = (x as usize, y as usize);
        start_seen |= cell == landmarks.start;
        exit_seen |= cell == landmarks.exit;
    };
    if origin_tile == Tile::Open {
        note_landmark(map_x, map_y);
    }

    let dir_x = angle.cos();
    let dir_y = angle.sin();

    // length of ray from one x or y grid line to the next
    let delta_x = if dir_x == 0.0 { NO_CROSSING } else { (1.0 / dir_x).abs() };
    let delta_y = if dir_y == 0.0 { NO_CROSSING } else { (1.0 / dir_y).abs() };

    let (step_x, mut side_x) = if dir_x < 0.0 {
        (-1, (origin_x - map_x as f32) * delta_x)
    } else {
        (1, (map_x as f32 + 1.0 - origin_x) * delta_x)
    };
    let (step_y, mut side_y) = if dir_y < 0.0 {
        (-1, (origin_y - map_y as f32) * delta_y)
    } else {
        (1, (map_y as f32 + 1.0 - origin_y) * delta_y)
    };

    let mut steps = 0;
    let side = loop {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            Side::X
        } else {
            side_y += delta_y;
            map_y += step_y;
            Side::Y
        };
        steps += 1;

        if map_x < 0 || map_y < 0 {
            return RayResult::void(steps);
        }
        match grid.tile(map_x as usize, map_y as usize) {
            None => return RayResult::void(steps),
            Some(Tile::Wall) => break side,
            Some(Tile::Open) => note_landmark(map_x, map_y),
        }
    };

    let distance = match side {
        Side::X => {
            let dx = if dir_x == 0.0 { DIR_EPSILON } else { dir_x };
            (map_x as f32 - origin_x + (1 - step_x) as f32 / 2.0) / dx
        }
        Side::Y => {
            let dy = if dir_y == 0.0 { DIR_EPSILON } else { dir_y };
            (map_y as f32 - origin_y + (1 - step_y) as f32 / 2.0) / dy
        }
    };

    RayResult {
        hit: RayHit::Wall {
            distance: distance.max(0.0),
            side,
        },
        start_seen,
        exit_seen,
        steps,
    }
}
