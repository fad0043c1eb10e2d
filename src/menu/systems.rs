use bevy::audio::Volume;
use bevy::prelude::*;

use super::components::*;
use super::notification::NotificationEvent;
use super::styles::*;
use crate::game_state::AppState;
use crate::input::FrameActions;
use crate::layout::RoomLayout;
use crate::sprite::{AnimationClock, FrameRange};
use crate::world::{open_link_with_notice, PaintingViewer};

pub const MENU_MUSIC_VOLUME: f32 = 0.2;
const MENU_MUSIC_PATH: &str = "sounds/menu.ogg";
const BACKGROUND_PATH: &str = "ui/menu-background.png";
const BACKGROUND_FRAME_SIZE: UVec2 = UVec2::new(320, 180);
const BACKGROUND_FRAMES: u32 = 10;
const BACKGROUND_FRAME_SECONDS: f32 = 0.1;

fn mute_label(muted: bool) -> &'static str {
    if muted {
        "Unmute"
    } else {
        "Mute"
    }
}

fn spawn_menu_button(parent: &mut ChildBuilder, marker: impl Component, label: &str, hover: &'static str) {
    parent
        .spawn((
            marker,
            Button,
            HoverText(hover),
            button_style(),
            BackgroundColor(NORMAL_BUTTON),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(label),
                button_text_style(),
                TextColor(BUTTON_TEXT_COLOR),
            ));
        });
}

pub fn setup_main_menu(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    audio: Res<MenuAudio>,
) {
    // Spawn menu camera for UI rendering
    commands.spawn((MenuCamera, Camera2d));

    let layout = layouts.add(TextureAtlasLayout::from_grid(
        BACKGROUND_FRAME_SIZE,
        1,
        BACKGROUND_FRAMES,
        None,
        None,
    ));
    let clock = AnimationClock::new(
        FrameRange::new(0, BACKGROUND_FRAMES as usize - 1),
        BACKGROUND_FRAME_SECONDS,
    );

    commands
        .spawn((
            MainMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.04, 0.1)),
        ))
        .with_children(|parent| {
            // Background
            parent.spawn((
                MenuBackground { clock },
                ImageNode::from_atlas_image(
                    asset_server.load(BACKGROUND_PATH),
                    TextureAtlas { layout, index: 0 },
                ),
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                ZIndex(-1),
            ));

            // Title
            parent.spawn((
                Text::new("Lumi Room"),
                title_text_style(),
                TextColor(TITLE_TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            spawn_menu_button(parent, StartButton, "Start", "Step into the room");
            spawn_menu_button(parent, ResumeButton, "Resume", "Open my résumé");
            spawn_menu_button(parent, SettingsButton, "Settings", "Tweak the experience");

            parent.spawn((
                HoverMessage,
                Text::new(""),
                hover_text_style(),
                TextColor(HOVER_TEXT_COLOR),
                Node {
                    margin: UiRect::top(Val::Px(24.0)),
                    min_height: Val::Px(24.0),
                    ..default()
                },
            ));

            parent
                .spawn((
                    MuteButton,
                    Button,
                    mute_button_style(),
                    BackgroundColor(NORMAL_BUTTON),
                ))
                .with_children(|parent| {
                    parent.spawn((
                        MuteLabel,
                        Text::new(mute_label(audio.muted)),
                        hover_text_style(),
                        TextColor(BUTTON_TEXT_COLOR),
                    ));
                });
        });

    let volume = if audio.muted { 0.0 } else { MENU_MUSIC_VOLUME };
    commands.spawn((
        MenuMusic,
        AudioPlayer::<AudioSource>::new(asset_server.load(MENU_MUSIC_PATH)),
        PlaybackSettings {
            volume: Volume::new(volume),
            ..PlaybackSettings::LOOP
        },
    ));
    info!("Main menu ready");
}

pub fn cleanup_main_menu(
    mut commands: Commands,
    query: Query<Entity, Or<(With<MainMenuRoot>, With<MenuCamera>, With<MenuMusic>)>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

pub fn animate_menu_background(
    time: Res<Time>,
    mut query: Query<(&mut MenuBackground, &mut ImageNode)>,
) {
    for (mut background, mut image) in query.iter_mut() {
        let Some(index) = background.clock.tick(time.delta_secs()) else {
            continue;
        };
        if let Some(atlas) = image.texture_atlas.as_mut() {
            atlas.index = index;
        }
    }
}

pub fn button_interaction(
    mut interaction_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, mut color) in interaction_query.iter_mut() {
        match *interaction {
            Interaction::Pressed => {
                *color = PRESSED_BUTTON.into();
            }
            Interaction::Hovered => {
                *color = HOVERED_BUTTON.into();
            }
            Interaction::None => {
                *color = NORMAL_BUTTON.into();
            }
        }
    }
}

pub fn update_hover_message(
    interaction_query: Query<(&Interaction, &HoverText), Changed<Interaction>>,
    mut message_query: Query<&mut Text, With<HoverMessage>>,
) {
    let Ok(mut message) = message_query.get_single_mut() else {
        return;
    };
    for (interaction, hover) in interaction_query.iter() {
        match *interaction {
            Interaction::Hovered | Interaction::Pressed => message.0 = hover.0.to_string(),
            Interaction::None => message.0.clear(),
        }
    }
}

pub fn handle_start_click(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<StartButton>)>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            info!("Entering the room");
            next_state.set(AppState::InGame);
        }
    }
}

pub fn handle_resume_click(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<ResumeButton>)>,
    layout: Res<RoomLayout>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            open_link_with_notice(&layout.links.resume, &mut notifications);
        }
    }
}

pub fn handle_settings_click(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<SettingsButton>)>,
    mut notifications: EventWriter<NotificationEvent>,
) {
    for interaction in interaction_query.iter() {
        if *interaction == Interaction::Pressed {
            notifications.send(NotificationEvent("Settings coming soon!".to_string()));
        }
    }
}

pub fn handle_mute_click(
    interaction_query: Query<&Interaction, (Changed<Interaction>, With<MuteButton>)>,
    mut audio: ResMut<MenuAudio>,
    sinks: Query<&AudioSink, With<MenuMusic>>,
    mut labels: Query<&mut Text, With<MuteLabel>>,
) {
    for interaction in interaction_query.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        audio.muted = !audio.muted;
        let volume = if audio.muted { 0.0 } else { MENU_MUSIC_VOLUME };
        for sink in sinks.iter() {
            sink.set_volume(volume);
        }
        for mut label in labels.iter_mut() {
            label.0 = mute_label(audio.muted).to_string();
        }
        info!("Menu music {}", if audio.muted { "muted" } else { "unmuted" });
    }
}

/// Escape leaves the room unless it is closing a painting.
pub fn return_to_menu(
    actions: Res<FrameActions>,
    viewer: Res<PaintingViewer>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if actions.back && !viewer.is_open() {
        info!("Returning to menu");
        next_state.set(AppState::MainMenu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_in_room_requests_the_menu() {
        let mut app = App::new();
        app.init_resource::<NextState<AppState>>()
            .init_resource::<PaintingViewer>()
            .insert_resource(FrameActions {
                back: true,
                ..default()
            })
            .add_systems(Update, return_to_menu);
        app.update();

        let next = app.world().resource::<NextState<AppState>>();
        assert!(matches!(*next, NextState::Pending(AppState::MainMenu)));
    }

    #[test]
    fn escape_with_painting_open_stays_in_room() {
        let mut app = App::new();
        app.init_resource::<NextState<AppState>>()
            .insert_resource(PaintingViewer {
                showing: Some(Handle::default()),
            })
            .insert_resource(FrameActions {
                back: true,
                ..default()
            })
            .add_systems(Update, return_to_menu);
        app.update();

        let next = app.world().resource::<NextState<AppState>>();
        assert!(matches!(*next, NextState::Unchanged));
    }

    #[test]
    fn settings_button_posts_a_notification() {
        let mut app = App::new();
        app.add_event::<NotificationEvent>()
            .add_systems(Update, handle_settings_click);
        app.world_mut().spawn((SettingsButton, Interaction::Pressed));
        app.update();

        let events = app.world().resource::<Events<NotificationEvent>>();
        let texts: Vec<_> = events
            .iter_current_update_events()
            .map(|e| e.0.as_str())
            .collect();
        assert_eq!(texts, ["Settings coming soon!"]);
    }

    #[test]
    fn mute_flips_state_and_label() {
        let mut app = App::new();
        app.init_resource::<MenuAudio>()
            .add_systems(Update, handle_mute_click);
        app.world_mut().spawn((MuteButton, Interaction::Pressed));
        app.world_mut().spawn((MuteLabel, Text::new("Mute")));
        app.update();

        assert!(app.world().resource::<MenuAudio>().muted);
        let world = app.world_mut();
        let label = world.query_filtered::<&Text, With<MuteLabel>>().single(world);
        assert_eq!(label.0, "Unmute");
    }

    #[test]
    fn hovering_shows_the_button_hint() {
        let mut app = App::new();
        app.add_systems(Update, update_hover_message);
        app.world_mut()
            .spawn((HoverText("Step into the room"), Interaction::Hovered));
        app.world_mut().spawn((HoverMessage, Text::new("")));
        app.update();

        let world = app.world_mut();
        let text = world.query_filtered::<&Text, With<HoverMessage>>().single(world);
        assert_eq!(text.0, "Step into the room");
    }
}
