pub mod components;
pub mod notification;
pub mod styles;
pub mod systems;

use bevy::prelude::*;

pub use components::MenuAudio;
pub use notification::NotificationEvent;

use crate::game_state::{AppState, RoomSet};
use crate::world::close_painting_on_escape;
use notification::{display_notifications, setup_notification_ui, update_notifications};
use systems::*;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MenuAudio>()
            .add_event::<NotificationEvent>()
            .add_systems(Startup, setup_notification_ui)
            .add_systems(Update, (display_notifications, update_notifications))
            // Main menu
            .add_systems(OnEnter(AppState::MainMenu), setup_main_menu)
            .add_systems(OnExit(AppState::MainMenu), cleanup_main_menu)
            .add_systems(
                Update,
                (
                    button_interaction,
                    update_hover_message,
                    animate_menu_background,
                    handle_start_click,
                    handle_resume_click,
                    handle_settings_click,
                    handle_mute_click,
                )
                    .run_if(in_state(AppState::MainMenu)),
            )
            // Back to the menu from the room
            .add_systems(
                Update,
                return_to_menu
                    .in_set(RoomSet::Interaction)
                    .after(close_painting_on_escape),
            );
    }
}
