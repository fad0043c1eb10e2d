use bevy::prelude::*;

use super::components::{ModelRegistry, PromptGlyph, PromptPulse};
use super::interaction::{ArmedTarget, InteractionTargets};
use super::paintings::{spawn_paintings, PaintingViewer};
use super::props::spawn_props;
use crate::camera::systems::follow_position;
use crate::camera::ChaseCamera;
use crate::collision::CollisionWorld;
use crate::game_state::RoomEntity;
use crate::input::MovementLocked;
use crate::layout::RoomLayout;
use crate::npc::{CatBrain, CatGlow, LumiCat, CAT_SHEET, CAT_SHEET_PATH, CAT_SPRITE_SIZE};
use crate::player::{
    Player, PlayerAnimation, PlayerController, PLAYER_SHEET, PLAYER_SHEET_PATH, PLAYER_SPRITE_SIZE,
};
use crate::sprite::{sprite_material, SpriteFrame};

pub const WALL_THICKNESS: f32 = 0.2;
const PROMPT_SIZE: f32 = 0.6;
const PROMPT_PATH: &str = "ui/e-key.png";
const PROMPT_PRESSED_PATH: &str = "ui/e-key-pressed.png";

#[allow(clippy::too_many_arguments)]
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    layout: Res<RoomLayout>,
    mut world: ResMut<CollisionWorld>,
    mut targets: ResMut<InteractionTargets>,
    mut registry: ResMut<ModelRegistry>,
) {
    *world = CollisionWorld::new(Some(layout.boundary));
    targets.0 = layout.interactions.iter().map(Into::into).collect();
    registry.clear();

    let size = layout.room.size;
    let height = layout.room.height;
    let [r, g, b] = layout.room.wall_color;

    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.36, 0.3),
        perceptual_roughness: 0.9,
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(r, g, b),
        ..default()
    });

    // Floor
    commands.spawn((
        RoomEntity,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
        MeshMaterial3d(floor_material),
        Transform::default(),
    ));

    // Back wall; the front stays open towards the camera
    commands.spawn((
        RoomEntity,
        Mesh3d(meshes.add(Cuboid::new(size, height, WALL_THICKNESS))),
        MeshMaterial3d(wall_material.clone()),
        Transform::from_xyz(0.0, height / 2.0, -size / 2.0),
    ));

    for side in [-1.0, 1.0] {
        commands.spawn((
            RoomEntity,
            Mesh3d(meshes.add(Cuboid::new(WALL_THICKNESS, height, size))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_xyz(side * size / 2.0, height / 2.0, 0.0),
        ));
    }

    commands.spawn((
        RoomEntity,
        DirectionalLight {
            illuminance: 4_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        RoomEntity,
        PointLight {
            shadows_enabled: false,
            intensity: 2_000_000.0,
            range: size,
            ..default()
        },
        Transform::from_xyz(0.0, height - 0.5, 0.0),
    ));

    // Player
    let player_spawn = Vec3::from(layout.player_spawn);
    let animation = PlayerAnimation::default();
    let first_frame = animation.clock.frame();
    commands.spawn((
        Player,
        PlayerController::default(),
        animation,
        PLAYER_SHEET,
        SpriteFrame(first_frame),
        RoomEntity,
        Mesh3d(meshes.add(Rectangle::from_size(PLAYER_SPRITE_SIZE))),
        MeshMaterial3d(materials.add(sprite_material(
            asset_server.load(PLAYER_SHEET_PATH),
            &PLAYER_SHEET,
            first_frame,
        ))),
        Transform::from_translation(player_spawn),
    ));

    // Cat
    let brain = CatBrain::default();
    let cat_frame = brain.frame();
    let glow = CatGlow(brain.state().glow());
    commands.spawn((
        LumiCat,
        brain,
        glow,
        CAT_SHEET,
        SpriteFrame(cat_frame),
        RoomEntity,
        Mesh3d(meshes.add(Rectangle::from_size(CAT_SPRITE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            emissive: LinearRgba::WHITE * glow.0,
            ..sprite_material(asset_server.load(CAT_SHEET_PATH), &CAT_SHEET, cat_frame)
        })),
        Transform::from_translation(Vec3::from(layout.cat_spawn)),
    ));

    let offset = Vec3::from(layout.camera.offset);
    let bounds = layout.camera.bounds;
    commands.spawn((
        RoomEntity,
        Camera3d::default(),
        ChaseCamera { offset, bounds },
        Transform::from_translation(follow_position(player_spawn, offset, bounds.as_ref()))
            .looking_at(player_spawn, Vec3::Y),
    ));

    // Interaction prompt
    let prompt_material = |path: &'static str| StandardMaterial {
        base_color_texture: Some(asset_server.load(path)),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    };
    let plain = materials.add(prompt_material(PROMPT_PATH));
    let pressed = materials.add(prompt_material(PROMPT_PRESSED_PATH));
    commands.spawn((
        PromptGlyph,
        PromptPulse::new(plain.clone(), pressed),
        RoomEntity,
        Mesh3d(meshes.add(Rectangle::new(PROMPT_SIZE, PROMPT_SIZE))),
        MeshMaterial3d(plain),
        Transform::default(),
        Visibility::Hidden,
    ));

    spawn_props(&mut commands, &asset_server, &mut world, &layout.props);
    spawn_paintings(
        &mut commands,
        &mut meshes,
        &mut materials,
        &asset_server,
        &layout.paintings,
    );

    info!(
        "Room ready: {} props, {} paintings, {} interactions",
        layout.props.len(),
        layout.paintings.len(),
        targets.0.len()
    );
}

/// Tears the room down when leaving the game.
#[allow(clippy::too_many_arguments)]
pub fn cleanup_room(
    mut commands: Commands,
    query: Query<Entity, With<RoomEntity>>,
    mut world: ResMut<CollisionWorld>,
    mut targets: ResMut<InteractionTargets>,
    mut registry: ResMut<ModelRegistry>,
    mut armed: ResMut<ArmedTarget>,
    mut viewer: ResMut<PaintingViewer>,
    mut locked: ResMut<MovementLocked>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    *world = CollisionWorld::default();
    targets.0.clear();
    registry.clear();
    *armed = ArmedTarget::default();
    viewer.showing = None;
    locked.0 = false;
    info!("Room torn down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::Aabb;

    #[test]
    fn cleanup_resets_room_state() {
        let mut app = App::new();
        let mut world = CollisionWorld::default();
        world.add(None, Aabb::new(Vec3::ZERO, Vec3::ONE));
        app.insert_resource(world)
            .init_resource::<InteractionTargets>()
            .init_resource::<ModelRegistry>()
            .insert_resource(ArmedTarget(Some(0)))
            .insert_resource(PaintingViewer {
                showing: Some(Handle::default()),
            })
            .insert_resource(MovementLocked(true))
            .add_systems(Update, cleanup_room);
        app.world_mut().spawn((RoomEntity, Transform::default()));
        let survivor = app.world_mut().spawn(Transform::default()).id();
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&RoomEntity>().iter(world).count(), 0);
        assert!(world.entities().contains(survivor));
        assert!(world.resource::<CollisionWorld>().colliders().is_empty());
        assert_eq!(world.resource::<ArmedTarget>().0, None);
        assert!(!world.resource::<PaintingViewer>().is_open());
        assert!(!world.resource::<MovementLocked>().0);
    }
}
