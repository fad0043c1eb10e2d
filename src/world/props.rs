use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::render::primitives::Aabb as MeshBounds;

use super::components::{ModelRegistry, PendingCollider, Prop, PropLoaded};
use crate::collision::{Aabb, CollisionWorld};
use crate::game_state::RoomEntity;
use crate::layout::{ColliderSpec, PropSpec};

/// Child meshes whose name (or parent's name) contains this are collision
/// proxies rather than visible geometry.
const COLLIDER_MESH_TAG: &str = "collider";

/// World box of a prop's explicit collider, or `None` if it has none.
pub fn box_collider(spec: &PropSpec) -> Option<Aabb> {
    match &spec.collider {
        ColliderSpec::Box { size, offset } => Some(Aabb::from_yawed_box(
            Vec3::from(spec.position) + Vec3::from(*offset),
            Vec3::from(*size),
            spec.yaw_degrees.to_radians(),
        )),
        _ => None,
    }
}

/// World box enclosing a mesh's local bounds.
pub fn mesh_world_box(bounds: &MeshBounds, transform: &GlobalTransform) -> Aabb {
    let center = Vec3::from(bounds.center);
    let half = Vec3::from(bounds.half_extents);
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);

    for corner in 0..8 {
        let sign = Vec3::new(
            if corner & 1 == 0 { -1.0 } else { 1.0 },
            if corner & 2 == 0 { -1.0 } else { 1.0 },
            if corner & 4 == 0 { -1.0 } else { 1.0 },
        );
        let point = transform.transform_point(center + half * sign);
        min = min.min(point);
        max = max.max(point);
    }
    Aabb::new(min, max)
}

/// Collider for a model from its mesh boxes. Meshes tagged as colliders
/// take precedence; without any, the whole model's geometry is used.
pub fn collider_from_meshes(meshes: &[(Aabb, bool)]) -> Option<Aabb> {
    let tagged = meshes.iter().filter(|(_, tagged)| *tagged).map(|(b, _)| *b);
    if let Some(bounds) = tagged.reduce(|a, b| a.union(&b)) {
        return Some(bounds);
    }
    meshes.iter().map(|(b, _)| *b).reduce(|a, b| a.union(&b))
}

fn is_collider_name(name: Option<&Name>) -> bool {
    name.is_some_and(|n| n.as_str().to_lowercase().contains(COLLIDER_MESH_TAG))
}

pub fn spawn_props(
    commands: &mut Commands,
    asset_server: &AssetServer,
    world: &mut CollisionWorld,
    specs: &[PropSpec],
) {
    for spec in specs {
        let source = asset_server.load::<Gltf>(spec.path.clone()).untyped();
        let scene: Handle<Scene> =
            asset_server.load(GltfAssetLabel::Scene(0).from_asset(spec.path.clone()));

        let entity = commands
            .spawn((
                Prop {
                    path: spec.path.clone(),
                    source,
                },
                SceneRoot(scene),
                spec.transform(),
                RoomEntity,
            ))
            .id();

        match &spec.collider {
            ColliderSpec::None => {}
            ColliderSpec::Auto => {
                commands.entity(entity).insert(PendingCollider);
            }
            ColliderSpec::Box { .. } => {
                if let Some(bounds) = box_collider(spec) {
                    world.add(Some(entity), bounds);
                }
            }
        }
    }
    info!("Loading {} props", specs.len());
}

/// Records finished props in the registry and drops the ones that failed.
pub fn watch_prop_loads(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut registry: ResMut<ModelRegistry>,
    mut world: ResMut<CollisionWorld>,
    query: Query<(Entity, &Prop), Without<PropLoaded>>,
) {
    for (entity, prop) in query.iter() {
        match asset_server.get_load_state(prop.source.id()) {
            Some(LoadState::Loaded) => {
                info!("Loaded {}", prop.path);
                registry.insert(prop.path.clone(), entity);
                commands.entity(entity).insert(PropLoaded);
            }
            Some(LoadState::Failed(err)) => {
                error!("Failed to load {}: {err}", prop.path);
                world.remove_owned_by(entity);
                registry.remove(&prop.path);
                commands.entity(entity).despawn_recursive();
            }
            _ => {}
        }
    }
}

pub fn resolve_auto_colliders(
    mut commands: Commands,
    mut world: ResMut<CollisionWorld>,
    props: Query<(Entity, &Prop), (With<PendingCollider>, With<PropLoaded>)>,
    children: Query<&Children>,
    meshes: Query<(&MeshBounds, &GlobalTransform, Option<&Name>, Option<&Parent>)>,
    names: Query<&Name>,
    mut visibility: Query<&mut Visibility>,
) {
    for (entity, prop) in props.iter() {
        let mut boxes = Vec::new();
        for child in children.iter_descendants(entity) {
            let Ok((bounds, transform, name, parent)) = meshes.get(child) else {
                continue;
            };
            let tagged = is_collider_name(name)
                || is_collider_name(parent.and_then(|p| names.get(p.get()).ok()));
            if tagged {
                if let Ok(mut vis) = visibility.get_mut(child) {
                    *vis = Visibility::Hidden;
                }
            }
            boxes.push((mesh_world_box(bounds, transform), tagged));
        }

        // Scene not instantiated yet.
        let Some(bounds) = collider_from_meshes(&boxes) else {
            continue;
        };
        debug!("Collider for {}: {:?}", prop.path, bounds);
        world.add(Some(entity), bounds);
        commands.entity(entity).remove::<PendingCollider>();
    }
}
