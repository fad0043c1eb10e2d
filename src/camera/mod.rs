pub mod systems;

use bevy::prelude::*;

pub use systems::ChaseCamera;

use crate::game_state::RoomSet;
use systems::follow_player;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, follow_player.in_set(RoomSet::Camera));
    }
}
