use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use super::joystick::VirtualJoystick;
use super::{FrameActions, HeldKeys, MoveInput, MovementLocked};

pub fn sample_move_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    joystick: Res<VirtualJoystick>,
    locked: Res<MovementLocked>,
    mut input: ResMut<MoveInput>,
) {
    if locked.0 {
        *input = MoveInput::default();
        return;
    }

    input.keys = HeldKeys {
        forward: keyboard_input.pressed(KeyCode::KeyW),
        back: keyboard_input.pressed(KeyCode::KeyS),
        left: keyboard_input.pressed(KeyCode::KeyA),
        right: keyboard_input.pressed(KeyCode::KeyD),
    };
    input.joystick = joystick.enabled.then(|| joystick.reading());
}

pub fn sample_frame_actions(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    joystick: Res<VirtualJoystick>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut actions: ResMut<FrameActions>,
) {
    let mut pointer = None;
    let mut tap = false;

    if mouse_input.just_pressed(MouseButton::Left) {
        pointer = windows.get_single().ok().and_then(|w| w.cursor_position());
    }
    if let Some(touch) = touches
        .iter_just_pressed()
        .find(|touch| !joystick.owns(touch.id()))
    {
        pointer = Some(touch.position());
        tap = true;
    }

    *actions = FrameActions {
        interact: keyboard_input.just_pressed(KeyCode::KeyE),
        pointer,
        tap,
        pointer_consumed: false,
        back: keyboard_input.just_pressed(KeyCode::Escape),
    };
}

pub fn toggle_fullscreen(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keyboard_input.just_pressed(KeyCode::KeyF) {
        return;
    }
    let Ok(mut window) = windows.get_single_mut() else {
        return;
    };

    window.mode = match window.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    };
    info!("Window mode set to {:?}", window.mode);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<VirtualJoystick>()
            .init_resource::<MovementLocked>()
            .init_resource::<MoveInput>()
            .add_systems(Update, sample_move_input);
        app
    }

    #[test]
    fn held_keys_are_sampled() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyD);
        app.update();

        let input = app.world().resource::<MoveInput>();
        assert!(input.keys.right);
        assert!(!input.keys.forward);
        assert_eq!(input.joystick, None);
    }

    #[test]
    fn locked_movement_reads_idle() {
        let mut app = app();
        app.world_mut().resource_mut::<MovementLocked>().0 = true;
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyW);
        app.update();

        assert_eq!(*app.world().resource::<MoveInput>(), MoveInput::default());
    }

    #[test]
    fn untouched_taps_request_interaction() {
        let actions = FrameActions {
            pointer: Some(Vec2::ONE),
            tap: true,
            ..default()
        };
        assert!(actions.wants_interaction());

        let consumed = FrameActions {
            pointer_consumed: true,
            ..actions
        };
        assert!(!consumed.wants_interaction());
    }
}
