use bevy::prelude::*;

use crate::collision::RoomBoundary;
use crate::player::Player;

/// Chase camera rig: keeps `offset` from the player, clamped to `bounds`.
#[derive(Component, Debug, Clone)]
pub struct ChaseCamera {
    pub offset: Vec3,
    pub bounds: Option<RoomBoundary>,
}

/// Camera position for a target, clamped on X and Z.
pub fn follow_position(target: Vec3, offset: Vec3, bounds: Option<&RoomBoundary>) -> Vec3 {
    let desired = target + offset;
    match bounds {
        Some(bounds) => bounds.clamp(desired),
        None => desired,
    }
}

pub fn follow_player(
    player_query: Query<&Transform, (With<Player>, Without<ChaseCamera>)>,
    mut camera_query: Query<(&mut Transform, &ChaseCamera), Without<Player>>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let target = player.translation;

    for (mut transform, rig) in camera_query.iter_mut() {
        transform.translation = follow_position(target, rig.offset, rig.bounds.as_ref());
        transform.look_at(target, Vec3::Y);
    }
}
