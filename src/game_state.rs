use bevy::prelude::*;

/// Main application states controlling game flow.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    MainMenu,
    InGame,
}

/// Ordered stages of one room frame.
///
/// Configured as a chain in `main`, so within a frame the player moves
/// before the cat, the camera follows the settled player, and proximity
/// is evaluated last against final positions.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomSet {
    Input,
    Player,
    Npc,
    Camera,
    Interaction,
    Present,
}

/// Marker for every entity that belongs to the room and must be torn down
/// when returning to the menu.
#[derive(Component)]
pub struct RoomEntity;
