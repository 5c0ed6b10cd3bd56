use std::collections::VecDeque;

use maze_caster::camera::{Pose, normalize_angle};
use maze_caster::caster::{RayHit, cast};
use maze_caster::grid::{Grid, Tile};
use maze_caster::maze::{Direction, Lattice, generate};
use maze_caster::projector::render_columns;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn lattice(w: usize, h: usize, seed: u64) -> Lattice {
    generate(w, h, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn flood_fill(lattice: &Lattice) -> usize {
    let (w, h) = (lattice.width(), lattice.height());
    let mut seen = vec![false; w * h];
    let mut queue = VecDeque::from([(0, 0)]);
    seen[0] = true;
    let mut count = 0;
    while let Some((x, y)) = queue.pop_front() {
        count += 1;
        for dir in Direction::ALL {
            if lattice.cell(x, y).walls.has(dir) {
                continue;
            }
            let (nx, ny) = lattice
                .neighbor(x, y, dir)
                .expect("an open wall always leads to a neighbor");
            if !seen[ny * w + nx] {
                seen[ny * w + nx] = true;
                queue.push_back((nx, ny));
            }
        }
    }
    count
}

proptest! {
    #[test]
    fn maze_is_a_spanning_tree(w in 1usize..24, h in 1usize..24, seed in any::<u64>()) {
        let l = lattice(w, h, seed);
        prop_assert_eq!(l.passage_count(), w * h - 1);
        prop_assert_eq!(flood_fill(&l), w * h);
    }

    #[test]
    fn walls_agree_between_neighbors(w in 1usize..20, h in 1usize..20, seed in any::<u64>()) {
        let l = lattice(w, h, seed);
        for y in 0..h {
            for x in 0..w {
                for dir in Direction::ALL {
                    match l.neighbor(x, y, dir) {
                        Some((nx, ny)) => prop_assert_eq!(
                            l.cell(x, y).walls.has(dir),
                            l.cell(nx, ny).walls.has(dir.opposite())
                        ),
                        // the outer boundary is never carved
                        None => prop_assert!(l.cell(x, y).walls.has(dir)),
                    }
                }
            }
        }
    }

    #[test]
    fn grid_border_is_solid(w in 1usize..20, h in 1usize..20, seed in any::<u64>()) {
        let g = Grid::from_lattice(&lattice(w, h, seed));
        prop_assert_eq!((g.width(), g.height()), (2 * w + 1, 2 * h + 1));
        for x in 0..g.width() {
            prop_assert_eq!(g.tile(x, 0), Some(Tile::Wall));
            prop_assert_eq!(g.tile(x, g.height() - 1), Some(Tile::Wall));
        }
        for y in 0..g.height() {
            prop_assert_eq!(g.tile(0, y), Some(Tile::Wall));
            prop_assert_eq!(g.tile(g.width() - 1, y), Some(Tile::Wall));
        }
    }

    #[test]
    fn rays_terminate_inside_the_grid(
        w in 1usize..16,
        h in 1usize..16,
        seed in any::<u64>(),
        fx in 0.001f32..0.999,
        fy in 0.001f32..0.999,
        angle in -10.0f32..10.0,
    ) {
        let g = Grid::from_lattice(&lattice(w, h, seed));
        let x = 1.0 + fx * (g.width() - 2) as f32;
        let y = 1.0 + fy * (g.height() - 2) as f32;
        let r = cast(x, y, angle, &g);
        prop_assert!(r.steps <= g.width() + g.height());
        match r.hit {
            RayHit::Wall { distance, .. } => {
                prop_assert!(distance.is_finite());
                prop_assert!(distance >= 0.0);
            }
            RayHit::Void => prop_assert!(!r.start_seen && !r.exit_seen),
        }
    }

    #[test]
    fn open_tile_rays_always_hit(w in 1usize..12, h in 1usize..12, seed in any::<u64>(), angle in 0.0f32..6.3) {
        let g = Grid::from_lattice(&lattice(w, h, seed));
        let start = g.landmarks().start;
        let r = cast(start.0 as f32 + 0.5, start.1 as f32 + 0.5, angle, &g);
        prop_assert!(r.distance().is_some());
        prop_assert!(r.start_seen);
    }

    #[test]
    fn normalized_angles_stay_in_range(a in -1000.0f32..1000.0) {
        let n = normalize_angle(a);
        prop_assert!((0.0..std::f32::consts::TAU).contains(&n));
        prop_assert!((n.sin() - a.sin()).abs() < 1e-2);
    }

    #[test]
    fn projected_spans_stay_on_screen(
        seed in any::<u64>(),
        angle in 0.0f32..6.3,
        sw in 1usize..200,
        sh in 1usize..200,
    ) {
        let g = Grid::from_lattice(&lattice(6, 6, seed));
        let pose = Pose::at_tile(g.landmarks().start, angle);
        for col in render_columns(&pose, &g, 1.2, sw, sh) {
            for span in [col.wall, col.floor].into_iter().flatten() {
                prop_assert!(span.top < span.bottom);
                prop_assert!(span.bottom <= sh);
            }
        }
    }
}
