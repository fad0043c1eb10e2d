use bevy::prelude::*;

use super::components::{NotificationRoot, NotificationText};

/// Event to display a notification message.
#[derive(Event)]
pub struct NotificationEvent(pub String);

/// Duration in seconds for notifications to display.
pub const NOTIFICATION_DURATION: f32 = 3.0;

/// Spawns the notification column once; it outlives menu and room, and is
/// drawn by whichever camera is active.
pub fn setup_notification_ui(mut commands: Commands) {
    commands.spawn((
        NotificationRoot,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            top: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(8.0),
            ..default()
        },
        GlobalZIndex(200),
    ));
}

/// Spawns notification text when events are received.
pub fn display_notifications(
    mut commands: Commands,
    mut events: EventReader<NotificationEvent>,
    root_query: Query<Entity, With<NotificationRoot>>,
) {
    let Ok(root) = root_query.get_single() else {
        return;
    };

    for event in events.read() {
        commands.entity(root).with_children(|parent| {
            parent.spawn((
                NotificationText(NOTIFICATION_DURATION),
                Text::new(&event.0),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
                Node {
                    padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                    ..default()
                },
            ));
        });
    }
}

/// Updates notification timers and removes expired notifications.
pub fn update_notifications(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut NotificationText)>,
) {
    for (entity, mut notification) in query.iter_mut() {
        notification.0 -= time.delta_secs();
        if notification.0 <= 0.0 {
            commands.entity(entity).despawn_recursive();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default())
            .add_event::<NotificationEvent>()
            .add_systems(Startup, setup_notification_ui)
            .add_systems(Update, (display_notifications, update_notifications).chain());
        app
    }

    fn notification_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query::<&NotificationText>().iter(world).count()
    }

    #[test]
    fn notifications_expire_after_their_duration() {
        let mut app = app();
        app.update();
        app.world_mut()
            .send_event(NotificationEvent("Opening link".to_string()));
        app.update();
        assert_eq!(notification_count(&mut app), 1);

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(NOTIFICATION_DURATION + 0.1));
        app.update();
        assert_eq!(notification_count(&mut app), 0);
    }
}
