use bevy::prelude::*;

use crate::sprite::SpriteSheet;

/// Marker for the wandering cat.
#[derive(Component)]
pub struct LumiCat;

/// Emissive intensity of the cat's material.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CatGlow(pub f32);

pub const CAT_SHEET: SpriteSheet = SpriteSheet::new(6, 5);
pub const CAT_SHEET_PATH: &str = "characters/lumicat-sheet.png";
pub const CAT_SPRITE_SIZE: Vec2 = Vec2::new(36.0 / 64.0 * 2.0, 2.0);
