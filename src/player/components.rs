use bevy::prelude::*;

use crate::collision::Aabb;
use crate::sprite::{AnimationClock, FrameRange, SpriteSheet};

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Direction the player sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    /// Towards the camera.
    #[default]
    Front,
    Back,
    Left,
    Right,
}

/// Movement state of the player.
#[derive(Component, Debug, Clone)]
pub struct PlayerController {
    pub facing: Facing,
    /// Whether any movement input was live this frame.
    pub moving: bool,
    pub speed: f32,
    pub half_extents: Vec3,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self {
            facing: Facing::Front,
            moving: false,
            speed: PLAYER_SPEED,
            half_extents: PLAYER_HALF_EXTENTS,
        }
    }
}

impl PlayerController {
    /// Collision box around `position`, rebuilt on demand so it never lags.
    pub fn bounds(&self, position: Vec3) -> Aabb {
        Aabb::from_center_half_extents(position, self.half_extents)
    }

    pub fn clip(&self) -> (FrameRange, f32) {
        player_clip(self.facing, self.moving)
    }
}

/// Frame clock of the player sprite.
#[derive(Component, Debug, Clone)]
pub struct PlayerAnimation {
    pub clock: AnimationClock,
}

impl Default for PlayerAnimation {
    fn default() -> Self {
        let (range, seconds) = player_clip(Facing::Front, false);
        Self {
            clock: AnimationClock::new(range, seconds),
        }
    }
}

/// Walk or idle frames for a facing.
pub fn player_clip(facing: Facing, moving: bool) -> (FrameRange, f32) {
    let range = match (moving, facing) {
        (false, Facing::Front) => FrameRange::new(8, 10),
        (true, Facing::Front) => FrameRange::new(12, 15),
        (false, Facing::Right) => FrameRange::new(16, 18),
        (true, Facing::Right) => FrameRange::new(20, 23),
        (true, Facing::Left) => FrameRange::new(24, 27),
        (false, Facing::Left) => FrameRange::new(28, 30),
        (true, Facing::Back) => FrameRange::new(32, 35),
        (false, Facing::Back) => FrameRange::new(36, 38),
    };
    let seconds = if moving {
        PLAYER_WALK_FRAME_SECONDS
    } else {
        PLAYER_IDLE_FRAME_SECONDS
    };
    (range, seconds)
}

// Player movement constants
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 1.0, 0.25);

// Sprite constants
pub const PLAYER_SHEET: SpriteSheet = SpriteSheet::new(4, 10);
pub const PLAYER_SHEET_PATH: &str = "characters/player-sheet.png";
pub const PLAYER_SPRITE_SIZE: Vec2 = Vec2::new(36.0 / 64.0 * 2.0, 2.0);
pub const PLAYER_WALK_FRAME_SECONDS: f32 = 0.15;
pub const PLAYER_IDLE_FRAME_SECONDS: f32 = 0.4;
