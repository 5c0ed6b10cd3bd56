use crate::camera::Pose;
use crate::grid::Grid;
use crate::input::Intent;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveParams {
    pub move_speed: f32, // grid units per second
    pub turn_speed: f32, // radians per second
    pub radius: f32,     // how close the player may get to a wall
}

impl Default for MoveParams {
    fn default() -> Self {
        Self {
            move_speed: 2.5,
            turn_speed: 2.5,
            radius: 0.2,
        }
    }
}

/// Advances `pose` by one frame of `intent`, sliding along walls.
///
/// The X and Y components are resolved separately, X first, so running into a
/// wall at an angle keeps the motion parallel to it.
pub fn integrate(pose: &mut Pose, intent: &Intent, grid: &Grid, dt: f32, params: &MoveParams) {
    let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;

    let turn = axis(intent.turn_left, intent.turn_right);
    pose.turn(turn * params.turn_speed * dt + intent.look_delta);

    let mut fwd = axis(intent.backward, intent.forward);
    let mut strafe = axis(intent.strafe_left, intent.strafe_right);
    if fwd == 0.0 && strafe == 0.0 {
        return;
    }
    // Normalize diagonal speed
    let inv = 1.0 / (fwd * fwd + strafe * strafe).sqrt();
    fwd *= inv;
    strafe *= inv;

    let dir_fwd = pose.forward();
    let dir_right = pose.right();
    let step = params.move_speed * dt;
    let dx = (dir_fwd[0] * fwd + dir_right[0] * strafe) * step;
    let dy = (dir_fwd[1] * fwd + dir_right[1] * strafe) * step;

    let [x, y] = pose.pos;
    let new_x = x + dx;
    if !grid.is_wall(new_x + params.radius * dx.signum(), y) {
        pose.pos[0] = new_x;
    }
    let x = pose.pos[0];
    let new_y = y + dy;
    if !grid.is_wall(x, new_y + params.radius * dy.signum()) {
        pose.pos[1] = new_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::generate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    fn corridor() -> Grid {
        // 3x1 lattice: open row y=1 from x=1 to x=5
        Grid::from_lattice(&generate(3, 1, &mut StdRng::seed_from_u64(0)).unwrap())
    }

    fn forward() -> Intent {
        Intent {
            forward: true,
            ..Intent::default()
        }
    }

    #[test]
    fn test_moves_forward_in_open_space() {
        let grid = corridor();
        let mut pose = Pose::new([1.5, 1.5], 0.0);
        integrate(&mut pose, &forward(), &grid, 0.4, &MoveParams::default());
        assert!((pose.pos[0] - 2.5).abs() < 1e-5);
        assert!((pose.pos[1] - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_blocked_by_wall() {
        let grid = corridor();
        let mut pose = Pose::new([5.5, 1.5], 0.0);
        integrate(&mut pose, &forward(), &grid, 0.2, &MoveParams::default());
        // 6.0 + radius lands inside the border wall
        assert_eq!(pose.pos, [5.5, 1.5]);
    }

    #[test]
    fn test_slides_along_wall() {
        let grid = corridor();
        // heading diagonally into the north wall of the corridor
        let mut pose = Pose::new([2.5, 1.5], -FRAC_PI_4);
        integrate(&mut pose, &forward(), &grid, 0.05, &MoveParams::default());
        assert!(pose.pos[0] > 2.5, "x should still advance");
        assert!(pose.pos[1] < 1.5 && pose.pos[1] > 1.0, "y moves until blocked");

        let before = pose.pos[1];
        for _ in 0..10 {
            integrate(&mut pose, &forward(), &grid, 0.2, &MoveParams::default());
        }
        assert!(pose.pos[1] <= before);
        assert!(!grid.is_wall(pose.pos[0], pose.pos[1]));
        assert!(pose.pos[1] - 0.2 >= 1.0);
    }

    #[test]
    fn test_turning_and_look_delta() {
        let grid = corridor();
        let mut pose = Pose::new([1.5, 1.5], 0.0);
        let intent = Intent {
            turn_right: true,
            look_delta: 0.5,
            ..Intent::default()
        };
        let params = MoveParams {
            turn_speed: FRAC_PI_2,
            ..MoveParams::default()
        };
        integrate(&mut pose, &intent, &grid, 1.0, &params);
        assert!((pose.angle() - (FRAC_PI_2 + 0.5)).abs() < 1e-5);
        assert_eq!(pose.pos, [1.5, 1.5]);
    }

    #[test]
    fn test_out_of_bounds_cannot_move_further() {
        let grid = corridor();
        let mut pose = Pose::new([-3.0, 1.5], std::f32::consts::PI);
        integrate(&mut pose, &forward(), &grid, 0.5, &MoveParams::default());
        assert_eq!(pose.pos[0], -3.0);
    }
}
