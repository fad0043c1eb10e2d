use bevy::prelude::*;

use super::brain::CatBrain;
use super::components::{CatGlow, LumiCat};
use crate::collision::CollisionWorld;
use crate::player::{Player, PlayerController};
use crate::sprite::SpriteFrame;

pub fn update_cat(
    time: Res<Time>,
    world: Res<CollisionWorld>,
    player_query: Query<(&Transform, &PlayerController), (With<Player>, Without<LumiCat>)>,
    mut cat_query: Query<
        (&mut Transform, &mut CatBrain, &mut SpriteFrame, &mut CatGlow),
        (With<LumiCat>, Without<Player>),
    >,
) {
    let player_box = player_query
        .get_single()
        .ok()
        .map(|(transform, controller)| controller.bounds(transform.translation));
    let mut rng = rand::thread_rng();

    for (mut transform, mut brain, mut frame, mut glow) in cat_query.iter_mut() {
        let step = brain.step(
            time.delta_secs(),
            transform.translation,
            &world,
            player_box,
            &mut rng,
        );

        transform.translation = step.position;
        if let Some(sign) = brain.mirror_sign() {
            transform.scale.x = transform.scale.x.abs() * sign;
        }
        if let Some(next) = step.frame {
            frame.set_if_neq(SpriteFrame(next));
        }
        glow.set_if_neq(CatGlow(brain.state().glow()));
    }
}

pub fn apply_cat_glow(
    query: Query<(&CatGlow, &MeshMaterial3d<StandardMaterial>), Changed<CatGlow>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (glow, material_handle) in query.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.emissive = LinearRgba::WHITE * glow.0;
        }
    }
}
