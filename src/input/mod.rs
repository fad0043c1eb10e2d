//! Per-frame input sampling.
//!
//! Device state (keys, touches, mouse) is read once at the start of the room
//! frame into [`MoveInput`] and [`FrameActions`]; every later system in the
//! frame consumes those snapshots instead of the raw devices.

pub mod joystick;
pub mod systems;

use bevy::prelude::*;

pub use joystick::{JoystickReading, VirtualJoystick};

use crate::game_state::{AppState, RoomSet};
use joystick::{cleanup_joystick_overlay, setup_joystick_overlay, track_joystick_touches, update_joystick_overlay};
use systems::{sample_frame_actions, sample_move_input, toggle_fullscreen};

/// Joystick axes at or below this magnitude are ignored.
pub const JOYSTICK_DEADZONE: f32 = 0.1;

/// Movement keys held this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }
}

/// Movement input sampled once per frame. `joystick` is `None` until the
/// touch joystick has been enabled.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct MoveInput {
    pub keys: HeldKeys,
    pub joystick: Option<JoystickReading>,
}

/// Discrete actions requested this frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameActions {
    /// `E` was pressed.
    pub interact: bool,
    /// Viewport position of a left click or a tap away from the joystick.
    pub pointer: Option<Vec2>,
    /// The pointer came from a touch tap.
    pub tap: bool,
    /// A system already handled the pointer this frame.
    pub pointer_consumed: bool,
    pub back: bool,
}

impl FrameActions {
    /// A tap nothing else claimed doubles as the interact action.
    pub fn wants_interaction(&self) -> bool {
        self.interact || (self.tap && self.pointer.is_some() && !self.pointer_consumed)
    }
}

/// When set, movement input reads as idle (e.g. while a painting is shown).
#[derive(Resource, Debug, Default)]
pub struct MovementLocked(pub bool);

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MoveInput>()
            .init_resource::<FrameActions>()
            .init_resource::<MovementLocked>()
            .init_resource::<VirtualJoystick>()
            .add_systems(Update, toggle_fullscreen)
            .add_systems(OnEnter(AppState::InGame), setup_joystick_overlay)
            .add_systems(OnExit(AppState::InGame), cleanup_joystick_overlay)
            .add_systems(
                Update,
                (track_joystick_touches, sample_move_input, sample_frame_actions)
                    .chain()
                    .in_set(RoomSet::Input),
            )
            .add_systems(Update, update_joystick_overlay.in_set(RoomSet::Present));
    }
}
