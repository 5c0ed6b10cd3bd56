use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::MazeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    #[inline]
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }
}

/// Boundary flags of a single cell, `true` = wall present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            north: true,
            south: true,
            west: true,
            east: true,
        }
    }
}

impl Walls {
    #[inline]
    pub fn has(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::West => self.west,
            Direction::East => self.east,
        }
    }

    #[inline]
    fn remove(&mut self, dir: Direction) {
        match dir {
            Direction::North => self.north = false,
            Direction::South => self.south = false,
            Direction::West => self.west = false,
            Direction::East => self.east = false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub walls: Walls,
    pub visited: bool, // only meaningful while carving
}

/// Rectangular lattice of maze cells, row-major
#[derive(Debug, Clone)]
pub struct Lattice {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Lattice {
    fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        // The derived grid must be addressable too
        let grid_cells = width
            .checked_mul(2)
            .and_then(|w| w.checked_add(1))
            .zip(height.checked_mul(2).and_then(|h| h.checked_add(1)))
            .and_then(|(gw, gh)| gw.checked_mul(gh));
        if grid_cells.is_none() {
            return Err(MazeError::TooLarge { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y * self.width + x]
    }

    /// Neighbor of (x, y) in `dir`, or None when it would leave the lattice
    pub fn neighbor(&self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = dir.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    /// Number of carved passages between adjacent cells
    pub fn passage_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let walls = &self.cell(x, y).walls;
                // count each shared boundary once, from its west/north owner
                if x + 1 < self.width && !walls.east {
                    count += 1;
                }
                if y + 1 < self.height && !walls.south {
                    count += 1;
                }
            }
        }
        count
    }

    fn carve_between(&mut self, (x, y): (usize, usize), (nx, ny): (usize, usize), dir: Direction) {
        let w = self.width;
        self.cells[y * w + x].walls.remove(dir);
        self.cells[ny * w + nx].walls.remove(dir.opposite());
    }
}

struct Frame {
    cell: (usize, usize),
    order: [Direction; 4],
    next: usize,
}

impl Frame {
    fn enter<R: Rng + ?Sized>(cell: (usize, usize), rng: &mut R) -> Self {
        let mut order = Direction::ALL;
        order.shuffle(rng);
        Self {
            cell,
            order,
            next: 0,
        }
    }
}

/// Builds a perfect maze by randomized depth-first carving from (0, 0).
///
/// Carving keeps its own stack of frames instead of recursing, so the depth
/// can reach `width * height` without touching the thread stack. Every cell
/// ends up visited and exactly `width * height - 1` passages are opened.
pub fn generate<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Lattice, MazeError> {
    let mut lattice = Lattice::new(width, height)?;

    lattice.cells[0].visited = true;
    let mut stack = vec![Frame::enter((0, 0), rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.order.len() {
            stack.pop();
            continue;
        }
        let dir = frame.order[frame.next];
        frame.next += 1;
        let here = frame.cell;

        let Some(there) = lattice.neighbor(here.0, here.1, dir) else {
            continue;
        };
        let idx = there.1 * lattice.width + there.0;
        if lattice.cells[idx].visited {
            continue;
        }

        lattice.carve_between(here, there, dir);
        lattice.cells[idx].visited = true;
        stack.push(Frame::enter(there, rng));
    }

    Ok(lattice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;

    fn reachable(lattice: &Lattice) -> usize {
        let mut seen = vec![false; lattice.width() * lattice.height()];
        let mut queue = VecDeque::from([(0usize, 0usize)]);
        seen[0] = true;
        let mut count = 0;
        while let Some((x, y)) = queue.pop_front() {
            count += 1;
            for dir in Direction::ALL {
                if lattice.cell(x, y).walls.has(dir) {
                    continue;
                }
                if let Some((nx, ny)) = lattice.neighbor(x, y, dir) {
                    let i = ny * lattice.width() + nx;
                    if !seen[i] {
                        seen[i] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        count
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate(0, 4, &mut rng).unwrap_err(),
            MazeError::InvalidDimensions { width: 0, height: 4 }
        );
        assert!(generate(4, 0, &mut rng).is_err());
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate(usize::MAX, 2, &mut rng).unwrap_err();
        assert!(matches!(err, MazeError::TooLarge { .. }));
    }

    #[test]
    fn test_single_cell_keeps_all_walls() {
        let mut rng = StdRng::seed_from_u64(7);
        let lattice = generate(1, 1, &mut rng).unwrap();
        assert_eq!(lattice.passage_count(), 0);
        assert_eq!(lattice.cell(0, 0).walls, Walls::default());
        assert!(lattice.cell(0, 0).visited);
    }

    #[test]
    fn test_single_row_is_a_corridor() {
        let mut rng = StdRng::seed_from_u64(3);
        let lattice = generate(6, 1, &mut rng).unwrap();
        assert_eq!(lattice.passage_count(), 5);
        for x in 0..5 {
            assert!(!lattice.cell(x, 0).walls.east);
            assert!(!lattice.cell(x + 1, 0).walls.west);
        }
        assert!(lattice.cell(5, 0).walls.east);
    }

    #[test]
    fn test_eight_by_eight_is_perfect() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let lattice = generate(8, 8, &mut rng).unwrap();
        assert_eq!(lattice.passage_count(), 63);
        assert_eq!(reachable(&lattice), 64);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = generate(12, 9, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(12, 9, &mut StdRng::seed_from_u64(42)).unwrap();
        for y in 0..9 {
            for x in 0..12 {
                assert_eq!(a.cell(x, y).walls, b.cell(x, y).walls);
            }
        }
    }

    #[test]
    fn test_large_maze_does_not_recurse() {
        let mut rng = StdRng::seed_from_u64(99);
        let lattice = generate(300, 300, &mut rng).unwrap();
        assert_eq!(lattice.passage_count(), 300 * 300 - 1);
    }
}
