use bevy::prelude::*;

use super::components::{SpriteFrame, SpriteSheet};

/// Pushes changed frames into each actor's own material.
pub fn apply_sprite_frames(
    query: Query<
        (&SpriteFrame, &SpriteSheet, &MeshMaterial3d<StandardMaterial>),
        Changed<SpriteFrame>,
    >,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (frame, sheet, material_handle) in query.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.uv_transform = sheet.uv_transform(frame.0);
        }
    }
}
