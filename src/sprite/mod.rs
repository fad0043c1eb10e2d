pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{sprite_material, AnimationClock, FrameRange, SpriteFrame, SpriteSheet};

use crate::game_state::{AppState, RoomSet};
use systems::apply_sprite_frames;

pub struct SpritePlugin;

impl Plugin for SpritePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            apply_sprite_frames
                .in_set(RoomSet::Present)
                .run_if(in_state(AppState::InGame)),
        );
    }
}
