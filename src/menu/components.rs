use bevy::prelude::*;

use crate::sprite::AnimationClock;

/// Marker for the menu camera.
#[derive(Component)]
pub struct MenuCamera;

/// Marker for the main menu root UI node.
#[derive(Component)]
pub struct MainMenuRoot;

#[derive(Component)]
pub struct StartButton;

/// Opens the résumé link.
#[derive(Component)]
pub struct ResumeButton;

#[derive(Component)]
pub struct SettingsButton;

#[derive(Component)]
pub struct MuteButton;

/// Text inside the mute button.
#[derive(Component)]
pub struct MuteLabel;

/// Line shown under the buttons while one is hovered.
#[derive(Component)]
pub struct HoverMessage;

/// What the hover line says for a button.
#[derive(Component)]
pub struct HoverText(pub &'static str);

/// Animated pixel-art backdrop.
#[derive(Component)]
pub struct MenuBackground {
    pub clock: AnimationClock,
}

/// Marker for the looping menu track.
#[derive(Component)]
pub struct MenuMusic;

/// Whether the menu music is muted. Survives leaving and re-entering the
/// menu.
#[derive(Resource, Debug, Default)]
pub struct MenuAudio {
    pub muted: bool,
}

/// Marker for the notification container in the top-left.
#[derive(Component)]
pub struct NotificationRoot;

/// Marker for a notification text element with remaining display time.
#[derive(Component)]
pub struct NotificationText(pub f32);
