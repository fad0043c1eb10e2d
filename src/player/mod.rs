pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{
    Player, PlayerAnimation, PlayerController, PLAYER_SHEET, PLAYER_SHEET_PATH, PLAYER_SPRITE_SIZE,
};

use crate::game_state::RoomSet;
use systems::{animate_player, move_player};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (move_player, animate_player).chain().in_set(RoomSet::Player),
        );
    }
}
