use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Furthest the stick travels from the base centre, in logical pixels.
pub const JOYSTICK_MAX_DISTANCE: f32 = 60.0;
/// Radius of the touchable base.
pub const JOYSTICK_BASE_RADIUS: f32 = 75.0;
const JOYSTICK_STICK_RADIUS: f32 = 32.5;
const JOYSTICK_BOTTOM_MARGIN: f32 = 40.0;

/// Normalised stick deflection. `y` grows downward on screen.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct JoystickReading {
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

/// On-screen joystick driven by touches.
#[derive(Resource, Debug, Default)]
pub struct VirtualJoystick {
    /// Set once any touch has been seen; the overlay only shows after that.
    pub enabled: bool,
    touch: Option<u64>,
    center: Vec2,
    deflection: Vec2,
}

/// Caps `delta` at `max_distance` and scales it into [-1, 1] per axis.
pub fn normalize_drag(delta: Vec2, max_distance: f32) -> Vec2 {
    delta.clamp_length_max(max_distance) / max_distance
}

/// Centre of the joystick base for a window of `size` (top-left origin).
pub fn base_center(size: Vec2) -> Vec2 {
    Vec2::new(
        size.x / 2.0,
        size.y - JOYSTICK_BOTTOM_MARGIN - JOYSTICK_BASE_RADIUS,
    )
}

impl VirtualJoystick {
    /// Claims touch `id` if it starts inside the base centred at `center`.
    pub fn press(&mut self, id: u64, position: Vec2, center: Vec2) -> bool {
        self.enabled = true;
        if self.touch.is_some() || position.distance(center) > JOYSTICK_BASE_RADIUS {
            return false;
        }
        self.touch = Some(id);
        self.center = center;
        self.deflection = Vec2::ZERO;
        true
    }

    pub fn drag(&mut self, id: u64, position: Vec2) {
        if self.touch == Some(id) {
            self.deflection = normalize_drag(position - self.center, JOYSTICK_MAX_DISTANCE);
        }
    }

    pub fn release(&mut self, id: u64) {
        if self.touch == Some(id) {
            self.touch = None;
            self.deflection = Vec2::ZERO;
        }
    }

    pub fn owns(&self, id: u64) -> bool {
        self.touch == Some(id)
    }

    pub fn reading(&self) -> JoystickReading {
        JoystickReading {
            x: self.deflection.x,
            y: self.deflection.y,
            active: self.touch.is_some(),
        }
    }
}

/// Marker for the joystick base node.
#[derive(Component)]
pub struct JoystickBase;

/// Marker for the movable stick node.
#[derive(Component)]
pub struct JoystickStick;

pub fn track_joystick_touches(
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut joystick: ResMut<VirtualJoystick>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let center = base_center(Vec2::new(window.width(), window.height()));

    for touch in touches.iter_just_pressed() {
        joystick.press(touch.id(), touch.position(), center);
    }
    for touch in touches.iter() {
        joystick.drag(touch.id(), touch.position());
    }
    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        joystick.release(touch.id());
    }
}

pub fn setup_joystick_overlay(mut commands: Commands) {
    let diameter = JOYSTICK_BASE_RADIUS * 2.0;
    let stick = JOYSTICK_STICK_RADIUS * 2.0;

    commands
        .spawn((
            JoystickBase,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(diameter),
                height: Val::Px(diameter),
                bottom: Val::Px(JOYSTICK_BOTTOM_MARGIN),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-JOYSTICK_BASE_RADIUS)),
                border: UiRect::all(Val::Px(4.0)),
                ..default()
            },
            BorderRadius::MAX,
            BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.4)),
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.15)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                JoystickStick,
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(stick),
                    height: Val::Px(stick),
                    left: Val::Px(JOYSTICK_BASE_RADIUS - JOYSTICK_STICK_RADIUS - 4.0),
                    top: Val::Px(JOYSTICK_BASE_RADIUS - JOYSTICK_STICK_RADIUS - 4.0),
                    ..default()
                },
                BorderRadius::MAX,
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.7)),
            ));
        });
}

pub fn update_joystick_overlay(
    joystick: Res<VirtualJoystick>,
    mut base_query: Query<&mut Visibility, With<JoystickBase>>,
    mut stick_query: Query<&mut Node, With<JoystickStick>>,
) {
    if !joystick.is_changed() {
        return;
    }

    for mut visibility in base_query.iter_mut() {
        *visibility = if joystick.enabled {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }

    let reading = joystick.reading();
    let rest = JOYSTICK_BASE_RADIUS - JOYSTICK_STICK_RADIUS - 4.0;
    for mut node in stick_query.iter_mut() {
        node.left = Val::Px(rest + reading.x * JOYSTICK_MAX_DISTANCE);
        node.top = Val::Px(rest + reading.y * JOYSTICK_MAX_DISTANCE);
    }
}

pub fn cleanup_joystick_overlay(mut commands: Commands, query: Query<Entity, With<JoystickBase>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec2 = Vec2::new(400.0, 485.0);

    #[test]
    fn small_drag_scales_linearly() {
        let v = normalize_drag(Vec2::new(30.0, -15.0), JOYSTICK_MAX_DISTANCE);
        assert!((v - Vec2::new(0.5, -0.25)).length() < 1e-6);
    }

    #[test]
    fn long_drag_is_capped_to_unit_length() {
        let v = normalize_drag(Vec2::new(300.0, 400.0), JOYSTICK_MAX_DISTANCE);
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert!((v - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn touch_outside_base_is_not_claimed() {
        let mut stick = VirtualJoystick::default();
        assert!(!stick.press(1, CENTER + Vec2::new(200.0, 0.0), CENTER));
        assert!(stick.enabled);
        assert!(!stick.reading().active);
    }

    #[test]
    fn drag_and_release_cycle() {
        let mut stick = VirtualJoystick::default();
        assert!(stick.press(3, CENTER, CENTER));
        stick.drag(3, CENTER + Vec2::new(-120.0, 0.0));
        let reading = stick.reading();
        assert!(reading.active);
        assert!((reading.x + 1.0).abs() < 1e-6);

        // other fingers do not move the stick
        stick.drag(4, CENTER + Vec2::new(60.0, 60.0));
        assert!((stick.reading().x + 1.0).abs() < 1e-6);

        stick.release(3);
        assert_eq!(stick.reading(), JoystickReading::default());
    }
}
