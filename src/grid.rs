use crate::maze::{Direction, Lattice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Open,
}

/// Start and exit cells, in grid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landmarks {
    pub start: (usize, usize),
    pub exit: (usize, usize),
}

/// Occupancy grid of `(2W+1) x (2H+1)` tiles expanded from a maze lattice.
///
/// Interior cells sit at odd coordinates, the tiles between them are the
/// boundaries. The outer ring is always `Tile::Wall`, which is what lets a ray
/// cast from inside the grid terminate.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    landmarks: Landmarks,
}

impl Grid {
    pub fn from_lattice(lattice: &Lattice) -> Self {
        let width = 2 * lattice.width() + 1;
        let height = 2 * lattice.height() + 1;
        let mut tiles = vec![Tile::Wall; width * height];

        for y in 0..lattice.height() {
            for x in 0..lattice.width() {
                let gx = 2 * x + 1;
                let gy = 2 * y + 1;
                tiles[gy * width + gx] = Tile::Open;

                let walls = &lattice.cell(x, y).walls;
                for dir in Direction::ALL {
                    if walls.has(dir) {
                        continue;
                    }
                    let (dx, dy) = dir.offset();
                    // a carved wall always has a neighbor, so this stays in range
                    let bx = gx.wrapping_add_signed(dx);
                    let by = gy.wrapping_add_signed(dy);
                    tiles[by * width + bx] = Tile::Open;
                }
            }
        }

        let landmarks = Landmarks {
            start: (1, 1),
            exit: (width - 2, height - 2),
        };

        Self {
            width,
            height,
            tiles,
            landmarks,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn landmarks(&self) -> Landmarks {
        self.landmarks
    }

    #[inline]
    pub fn tile(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    /// Integer lookup; anything outside the grid blocks
    #[inline]
    pub fn is_wall_at(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 {
            return true;
        }
        !matches!(self.tile(x as usize, y as usize), Some(Tile::Open))
    }

    /// Occupancy query in continuous grid coordinates
    #[inline]
    pub fn is_wall(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return true;
        }
        self.is_wall_at(x.floor() as i64, y.floor() as i64)
    }

    /// Grid cell containing a continuous position, if inside the grid
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (cx, cy) = (x.floor() as usize, y.floor() as usize);
        self.tile(cx, cy).map(|_| (cx, cy))
    }
}
