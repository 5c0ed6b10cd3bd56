use std::collections::HashSet;

use winit::keyboard::KeyCode;

/// What the player asked for during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub look_delta: f32, // radians, positive turns right
}

const FORWARD: &[KeyCode] = &[KeyCode::KeyW, KeyCode::ArrowUp];
const BACKWARD: &[KeyCode] = &[KeyCode::KeyS, KeyCode::ArrowDown];
const STRAFE_LEFT: &[KeyCode] = &[KeyCode::KeyA];
const STRAFE_RIGHT: &[KeyCode] = &[KeyCode::KeyD];
const TURN_LEFT: &[KeyCode] = &[KeyCode::ArrowLeft, KeyCode::KeyQ];
const TURN_RIGHT: &[KeyCode] = &[KeyCode::ArrowRight, KeyCode::KeyE];

pub const TOGGLE_MAP: &[KeyCode] = &[KeyCode::KeyM, KeyCode::Tab];
pub const QUIT: &[KeyCode] = &[KeyCode::Escape];

impl Intent {
    pub fn from_keys(keys_down: &HashSet<KeyCode>, look_delta: f32) -> Self {
        let any = |codes: &[KeyCode]| codes.iter().any(|c| keys_down.contains(c));
        Self {
            forward: any(FORWARD),
            backward: any(BACKWARD),
            strafe_left: any(STRAFE_LEFT),
            strafe_right: any(STRAFE_RIGHT),
            turn_left: any(TURN_LEFT),
            turn_right: any(TURN_RIGHT),
            look_delta,
        }
    }
}
