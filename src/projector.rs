use crate::camera::Pose;
use crate::caster::{RayHit, RayResult, Side, cast};
use crate::grid::Grid;

const WALL_BRIGHT_X: f32 = 220.0;
const WALL_BRIGHT_Y: f32 = 180.0;
const WALL_MIN: f32 = 40.0;
const WALL_MAX: f32 = 255.0;

const FLOOR_BRIGHT: f32 = 200.0;
const FLOOR_MIN: f32 = 30.0;
const FLOOR_MAX: f32 = 220.0;

// brightness lost per grid unit of corrected distance
const FALLOFF: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    fn gray(level: f32) -> Self {
        let v = level as u8;
        Self::new(v, v, v)
    }

    /// Scales each channel of `self` by `level / 255`
    #[inline]
    fn tinted(self, level: f32) -> Self {
        let k = level / 255.0;
        let ch = |c: u8| (c as f32 * k) as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }
}

const EXIT_TINT: Rgb = Rgb::new(255, 70, 60);
const START_TINT: Rgb = Rgb::new(70, 110, 255);

/// Half-open pixel row range `[top, bottom)` in one color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub top: usize,
    pub bottom: usize,
    pub color: Rgb,
}

/// Everything needed to paint one screen column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnCommand {
    pub x: usize,
    pub wall: Option<Span>,
    pub floor: Option<Span>,
    /// Fisheye-corrected distance, None when the ray saw only void
    pub depth: Option<f32>,
}

#[inline]
pub fn wall_shade(side: Side, corrected: f32) -> Rgb {
    let base = match side {
        Side::X => WALL_BRIGHT_X,
        Side::Y => WALL_BRIGHT_Y,
    };
    Rgb::gray((base - corrected * FALLOFF).clamp(WALL_MIN, WALL_MAX))
}

/// Floor tint for a column whose ray crossed a landmark; the exit wins ties
#[inline]
pub fn floor_shade(result: &RayResult, corrected: f32) -> Option<Rgb> {
    let tint = if result.exit_seen {
        EXIT_TINT
    } else if result.start_seen {
        START_TINT
    } else {
        return None;
    };
    Some(tint.tinted((FLOOR_BRIGHT - corrected * FALLOFF).clamp(FLOOR_MIN, FLOOR_MAX)))
}

/// Vertical extent of a wall at `corrected` distance, clipped to the screen
fn wall_rows(corrected: f32, screen_height: usize) -> (usize, usize) {
    let h = screen_height as f32;
    let column_height = if corrected > 0.0 { h / corrected } else { f32::INFINITY };
    let mid = 0.5 * h;
    let top = (mid - 0.5 * column_height).clamp(0.0, h);
    let bottom = (mid + 0.5 * column_height).clamp(0.0, h);
    (top.floor() as usize, bottom.ceil() as usize)
}

/// Casts one ray per screen column and turns the hits into draw commands.
///
/// Rays sweep uniformly from `angle - fov/2` on the left edge towards
/// `angle + fov/2`. Distances are multiplied by the cosine of the ray's offset
/// from the view direction so flat walls stay flat.
pub fn render_columns(
    pose: &Pose,
    grid: &Grid,
    fov: f32,
    screen_width: usize,
    screen_height: usize,
) -> Vec<ColumnCommand> {
    let mut columns = Vec::with_capacity(screen_width);
    if screen_width == 0 {
        return columns;
    }

    let [px, py] = pose.pos;
    let left = pose.angle() - 0.5 * fov;

    for x in 0..screen_width {
        let ray_angle = left + (x as f32 / screen_width as f32) * fov;
        let result = cast(px, py, ray_angle, grid);

        let RayHit::Wall { distance, side } = result.hit else {
            columns.push(ColumnCommand {
                x,
                wall: None,
                floor: None,
                depth: None,
            });
            continue;
        };

        let corrected = distance * (ray_angle - pose.angle()).cos();
        let (top, bottom) = wall_rows(corrected, screen_height);
        let wall = (top < bottom).then(|| Span {
            top,
            bottom,
            color: wall_shade(side, corrected),
        });

        let floor_top = bottom.max(screen_height / 2);
        let floor = floor_shade(&result, corrected)
            .filter(|_| floor_top < screen_height)
            .map(|color| Span {
                top: floor_top,
                bottom: screen_height,
                color,
            });

        columns.push(ColumnCommand {
            x,
            wall,
            floor,
            depth: Some(corrected),
        });
    }

    columns
}
