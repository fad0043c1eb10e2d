mod camera;
mod collision;
mod game_state;
mod input;
mod layout;
mod menu;
mod npc;
mod player;
mod sprite;
mod world;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::PresentMode,
};

use camera::CameraPlugin;
use game_state::{AppState, RoomSet};
use input::InputPlugin;
use layout::LayoutPlugin;
use menu::MenuPlugin;
use npc::NpcPlugin;
use player::PlayerPlugin;
use sprite::SpritePlugin;
use world::WorldPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Lumi Room".to_string(),
                        present_mode: PresentMode::AutoNoVsync,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ))
        .init_state::<AppState>()
        .configure_sets(
            Update,
            (
                RoomSet::Input,
                RoomSet::Player,
                RoomSet::Npc,
                RoomSet::Camera,
                RoomSet::Interaction,
                RoomSet::Present,
            )
                .chain()
                .run_if(in_state(AppState::InGame)),
        )
        .add_plugins((
            LayoutPlugin,
            InputPlugin,
            MenuPlugin,
            WorldPlugin,
            PlayerPlugin,
            NpcPlugin,
            CameraPlugin,
            SpritePlugin,
        ))
        .run();
}
