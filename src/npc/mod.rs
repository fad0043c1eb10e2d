pub mod brain;
pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use brain::CatBrain;
pub use components::{CatGlow, LumiCat, CAT_SHEET, CAT_SHEET_PATH, CAT_SPRITE_SIZE};

use crate::game_state::RoomSet;
use systems::{apply_cat_glow, update_cat};

pub struct NpcPlugin;

impl Plugin for NpcPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, update_cat.in_set(RoomSet::Npc))
            .add_systems(Update, apply_cat_glow.in_set(RoomSet::Present));
    }
}
