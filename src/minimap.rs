use crate::camera::Pose;
use crate::grid::{Grid, Tile};
use crate::projector::Rgb;
use crate::renderer::pack_rgb;

const BACKGROUND: Rgb = Rgb::new(10, 10, 10);
const WALL: Rgb = Rgb::new(190, 190, 190);
const OPEN: Rgb = Rgb::new(35, 35, 35);
const START: Rgb = Rgb::new(60, 100, 240);
const EXIT: Rgb = Rgb::new(240, 60, 50);
const PLAYER: Rgb = Rgb::new(250, 220, 40);

/// Top-down view of the whole grid, scaled to fit and centered
pub fn draw_map(buf: &mut [u32], width: usize, height: usize, grid: &Grid, pose: &Pose) {
    buf[..width * height].fill(pack_rgb(BACKGROUND));

    let tile = (width / grid.width()).min(height / grid.height()).max(1);
    let off_x = width.saturating_sub(tile * grid.width()) / 2;
    let off_y = height.saturating_sub(tile * grid.height()) / 2;
    let landmarks = grid.landmarks();

    for gy in 0..grid.height() {
        for gx in 0..grid.width() {
            let color = if (gx, gy) == landmarks.exit {
                EXIT
            } else if (gx, gy) == landmarks.start {
                START
            } else if grid.tile(gx, gy) == Some(Tile::Open) {
                OPEN
            } else {
                WALL
            };
            fill_rect(buf, width, height, off_x + gx * tile, off_y + gy * tile, tile, tile, color);
        }
    }

    // player dot plus a short heading tick
    let to_screen = |p: [f32; 2]| {
        (
            off_x as f32 + p[0] * tile as f32,
            off_y as f32 + p[1] * tile as f32,
        )
    };
    let (px, py) = to_screen(pose.pos);
    let dot = (tile / 2).max(2);
    let half = dot as f32 / 2.0;
    fill_rect(
        buf,
        width,
        height,
        (px - half).max(0.0) as usize,
        (py - half).max(0.0) as usize,
        dot,
        dot,
        PLAYER,
    );

    let [fx, fy] = pose.forward();
    let reach = tile as f32;
    let samples = (reach as usize).max(1);
    let color = pack_rgb(PLAYER);
    for s in 0..=samples {
        let t = s as f32 / samples as f32 * reach;
        let (x, y) = (px + fx * t, py + fy * t);
        if x >= 0.0 && y >= 0.0 && (x as usize) < width && (y as usize) < height {
            buf[y as usize * width + x as usize] = color;
        }
    }
}

fn fill_rect(
    buf: &mut [u32],
    width: usize,
    height: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
    color: Rgb,
) {
    let packed = pack_rgb(color);
    let x1 = (x0 + w).min(width);
    let y1 = (y0 + h).min(height);
    if x0 >= x1 {
        return;
    }
    for y in y0..y1 {
        buf[y * width + x0..y * width + x1].fill(packed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_map_marks_landmarks() {
        let lattice = generate(2, 2, &mut StdRng::seed_from_u64(4)).unwrap();
        let grid = Grid::from_lattice(&lattice);
        // 5x5 grid drawn at 10px per tile
        let (w, h) = (50, 50);
        let mut buf = vec![0u32; w * h];
        // park the player on the exit so the start tile stays unobstructed
        let pose = Pose::at_tile(grid.landmarks().exit, 0.0);
        draw_map(&mut buf, w, h, &grid, &pose);

        assert_eq!(buf[0], pack_rgb(WALL));
        assert_eq!(buf[12 * w + 12], pack_rgb(START));
        // exit corner away from the player dot
        assert_eq!(buf[31 * w + 31], pack_rgb(EXIT));
        assert_eq!(buf[35 * w + 35], pack_rgb(PLAYER));
    }

    #[test]
    fn test_map_centers_small_grid() {
        let lattice = generate(1, 1, &mut StdRng::seed_from_u64(0)).unwrap();
        let grid = Grid::from_lattice(&lattice);
        let (w, h) = (40, 30);
        let mut buf = vec![0u32; w * h];
        draw_map(&mut buf, w, h, &grid, &Pose::at_tile((1, 1), 0.0));
        // 3 tiles of 10px, centered horizontally
        assert_eq!(buf[0], pack_rgb(BACKGROUND));
        assert_eq!(buf[5], pack_rgb(WALL));
        assert_eq!(buf[w - 1], pack_rgb(BACKGROUND));
    }
}
