use std::process::Command;

use bevy::asset::LoadState;
use bevy::prelude::*;

use super::components::{InteractionEffect, RoomMusic};
use super::interaction::InteractionEvent;
use crate::game_state::RoomEntity;
use crate::menu::NotificationEvent;

/// Platform command that opens `url` in the default browser.
fn opener(url: &str) -> Command {
    #[cfg(target_os = "windows")]
    {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", "", url]);
        command
    }
    #[cfg(target_os = "macos")]
    {
        let mut command = Command::new("open");
        command.arg(url);
        command
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        let mut command = Command::new("xdg-open");
        command.arg(url);
        command
    }
}

pub fn open_link(url: &str) -> std::io::Result<()> {
    opener(url).spawn().map(|_| ())
}

/// Opens `url` and reports the outcome as a notification.
pub fn open_link_with_notice(url: &str, notifications: &mut EventWriter<NotificationEvent>) {
    match open_link(url) {
        Ok(()) => {
            info!("Opened {url}");
            notifications.send(NotificationEvent(format!("Opening {url}")));
        }
        Err(err) => {
            warn!("Could not open {url}: {err}");
            notifications.send(NotificationEvent("Could not open link".to_string()));
        }
    }
}

pub fn run_interaction_effects(
    mut commands: Commands,
    mut events: EventReader<InteractionEvent>,
    asset_server: Res<AssetServer>,
    music_query: Query<(Entity, &AudioPlayer, Option<&AudioSink>), With<RoomMusic>>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    for event in events.read() {
        match &event.effect {
            InteractionEffect::ToggleMusic { track } => match music_query.get_single() {
                Ok((_, _, Some(sink))) => {
                    sink.toggle();
                    info!("Music {}", if sink.is_paused() { "paused" } else { "resumed" });
                }
                Ok((entity, player, None)) => {
                    // No sink yet: either still loading or never will be.
                    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&player.0) {
                        error!("Failed to load {track}: {err}");
                        commands.entity(entity).despawn_recursive();
                    }
                }
                Err(_) => {
                    info!("Starting {track}");
                    commands.spawn((
                        RoomMusic,
                        RoomEntity,
                        AudioPlayer::<AudioSource>::new(asset_server.load(track.clone())),
                        PlaybackSettings::LOOP,
                    ));
                }
            },
            InteractionEffect::OpenLink { url } => {
                open_link_with_notice(url, &mut notifications);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn toggle_music(app: &mut App, track: &str) {
        app.world_mut().send_event(InteractionEvent {
            target: "record player".to_string(),
            effect: InteractionEffect::ToggleMusic {
                track: track.to_string(),
            },
        });
        app.update();
    }

    fn music_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&RoomMusic>().iter(world).count()
    }

    #[test]
    fn failed_track_is_dropped_so_the_next_use_retries() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<AudioSource>()
            .add_event::<InteractionEvent>()
            .add_event::<NotificationEvent>()
            .add_systems(Update, run_interaction_effects);

        let track = "sounds/does-not-exist.ogg";
        let server = app.world().resource::<AssetServer>().clone();
        let handle: Handle<AudioSource> = server.load(track);
        let music = app
            .world_mut()
            .spawn((RoomMusic, AudioPlayer::new(handle.clone())))
            .id();
        for _ in 0..500 {
            app.update();
            if matches!(server.get_load_state(&handle), Some(LoadState::Failed(_))) {
                break;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(matches!(
            server.get_load_state(&handle),
            Some(LoadState::Failed(_))
        ));

        toggle_music(&mut app, track);
        assert!(!app.world().entities().contains(music));
        assert_eq!(music_count(&mut app), 0);

        toggle_music(&mut app, track);
        assert_eq!(music_count(&mut app), 1);
    }

    #[test]
    fn opener_passes_the_url_through() {
        let command = opener("https://example.com/cv.pdf");
        assert!(command
            .get_args()
            .any(|arg| arg == "https://example.com/cv.pdf"));
    }
}
