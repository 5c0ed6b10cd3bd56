use std::f32::consts::TAU;

/// Viewer position and heading in continuous grid coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub pos: [f32; 2], // (x, y), one unit per grid tile
    angle: f32,        // radians in [0, 2pi), 0 faces +X, increasing towards +Y
}

impl Pose {
    pub fn new(pos: [f32; 2], angle: f32) -> Self {
        Self {
            pos,
            angle: normalize_angle(angle),
        }
    }

    /// Centered in grid tile (x, y)
    pub fn at_tile(tile: (usize, usize), angle: f32) -> Self {
        Self::new([tile.0 as f32 + 0.5, tile.1 as f32 + 0.5], angle)
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn turn(&mut self, delta: f32) {
        self.angle = normalize_angle(self.angle + delta);
    }

    #[inline]
    pub fn forward(&self) -> [f32; 2] {
        [self.angle.cos(), self.angle.sin()]
    }

    /// Perpendicular to `forward`, pointing to the right-hand side of the screen
    #[inline]
    pub fn right(&self) -> [f32; 2] {
        let [c, s] = self.forward();
        [-s, c]
    }
}

/// Wraps any finite angle into [0, 2pi); non-finite input collapses to 0
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}
