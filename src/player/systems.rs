use bevy::prelude::*;

use super::components::{Facing, Player, PlayerAnimation, PlayerController};
use crate::collision::{Aabb, CollisionWorld, MoveRules};
use crate::input::{JoystickReading, MoveInput, JOYSTICK_DEADZONE};
use crate::sprite::SpriteFrame;

/// Outcome of one frame of player movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedMove {
    pub position: Vec3,
    /// Facing requested by the input, if any source produced movement.
    pub facing: Option<Facing>,
    pub moving: bool,
    /// The move hit a collider and was dropped.
    pub blocked: bool,
}

/// Facing for a live joystick reading; the dominant axis decides.
fn stick_facing(stick: &JoystickReading, x_live: bool, y_live: bool) -> Facing {
    let horizontal = x_live && (!y_live || stick.x.abs() >= stick.y.abs());
    match (horizontal, stick.x > 0.0, stick.y > 0.0) {
        (true, true, _) => Facing::Right,
        (true, false, _) => Facing::Left,
        (false, _, true) => Facing::Front,
        (false, _, false) => Facing::Back,
    }
}

/// Computes where the player ends up this frame.
///
/// Keyboard is evaluated before the joystick, so a live stick overrides the
/// keyboard's facing. A collision cancels the whole move; otherwise the
/// result is clamped into the room boundary per axis.
pub fn plan_move(
    position: Vec3,
    controller: &PlayerController,
    input: &MoveInput,
    delta: f32,
    world: &CollisionWorld,
) -> PlannedMove {
    let step = controller.speed * delta;
    let mut displacement = Vec3::ZERO;
    let mut facing = None;

    let keys = input.keys;
    if keys.forward {
        displacement.z -= step;
        facing = Some(Facing::Back);
    }
    if keys.back {
        displacement.z += step;
        facing = Some(Facing::Front);
    }
    if keys.left {
        displacement.x -= step;
        facing = Some(Facing::Left);
    }
    if keys.right {
        displacement.x += step;
        facing = Some(Facing::Right);
    }
    let mut moving = keys.any();

    if let Some(stick) = input.joystick.filter(|stick| stick.active) {
        let x_live = stick.x.abs() > JOYSTICK_DEADZONE;
        let y_live = stick.y.abs() > JOYSTICK_DEADZONE;
        if x_live {
            displacement.x += stick.x * step;
        }
        if y_live {
            displacement.z += stick.y * step;
        }
        if x_live || y_live {
            facing = Some(stick_facing(&stick, x_live, y_live));
            moving = true;
        }
    }

    let current: Aabb = controller.bounds(position);
    let check = world.try_move(&current, displacement, MoveRules::default());
    if !check.accepted() {
        return PlannedMove {
            position,
            facing,
            moving,
            blocked: true,
        };
    }

    let mut next = position + displacement;
    if let Some(boundary) = world.boundary() {
        next = boundary.clamp(next);
    }

    PlannedMove {
        position: next,
        facing,
        moving,
        blocked: false,
    }
}

pub fn move_player(
    time: Res<Time>,
    input: Res<MoveInput>,
    world: Res<CollisionWorld>,
    mut query: Query<(&mut Transform, &mut PlayerController), With<Player>>,
) {
    let Ok((mut transform, mut controller)) = query.get_single_mut() else {
        return;
    };

    let planned = plan_move(
        transform.translation,
        &controller,
        &input,
        time.delta_secs(),
        &world,
    );

    transform.translation = planned.position;
    if let Some(facing) = planned.facing {
        controller.facing = facing;
    }
    controller.moving = planned.moving;
}

pub fn animate_player(
    time: Res<Time>,
    mut query: Query<(&PlayerController, &mut PlayerAnimation, &mut SpriteFrame), With<Player>>,
) {
    for (controller, mut animation, mut frame) in query.iter_mut() {
        let (range, seconds) = controller.clip();
        if animation.clock.switch_to(range, seconds) {
            frame.set_if_neq(SpriteFrame(animation.clock.frame()));
        }
        if let Some(next) = animation.clock.tick(time.delta_secs()) {
            frame.set_if_neq(SpriteFrame(next));
        }
    }
}
