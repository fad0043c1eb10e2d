use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::camera::ChaseCamera;
use crate::collision::Aabb;
use crate::game_state::RoomEntity;
use crate::input::{FrameActions, MovementLocked};
use crate::layout::PaintingSpec;

/// Thickness used when picking paintings with a ray.
const PAINTING_DEPTH: f32 = 0.05;

/// A framed image hung on a wall.
#[derive(Component, Debug)]
pub struct Painting {
    pub image: Handle<Image>,
    pub height: f32,
    pub yaw: f32,
}

/// The painting is still square and waits for its image to learn the
/// aspect ratio.
#[derive(Component)]
pub struct NeedsAspect;

/// Full-screen overlay showing the selected painting.
#[derive(Component)]
pub struct PaintingOverlay;

#[derive(Resource, Debug, Default)]
pub struct PaintingViewer {
    pub showing: Option<Handle<Image>>,
}

impl PaintingViewer {
    pub fn is_open(&self) -> bool {
        self.showing.is_some()
    }
}

/// Width of a painting `height` tall showing an image of `size` pixels.
pub fn fitted_width(height: f32, size: Vec2) -> f32 {
    if size.y <= 0.0 {
        return height;
    }
    height * size.x / size.y
}

/// World box of a painting quad, given the quad's transform.
pub fn painting_bounds(transform: &Transform, yaw: f32) -> Aabb {
    let size = Vec3::new(transform.scale.x, transform.scale.y, PAINTING_DEPTH);
    Aabb::from_yawed_box(transform.translation, size, yaw)
}

/// Closest painting along the ray, if any.
pub fn nearest_hit<T: Copy>(
    origin: Vec3,
    direction: Vec3,
    candidates: impl IntoIterator<Item = (T, Aabb)>,
) -> Option<T> {
    candidates
        .into_iter()
        .filter_map(|(item, bounds)| bounds.ray_entry(origin, direction).map(|t| (item, t)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(item, _)| item)
}

pub fn spawn_paintings(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    specs: &[PaintingSpec],
) {
    let quad = meshes.add(Rectangle::new(1.0, 1.0));

    for spec in specs {
        let image: Handle<Image> = asset_server.load(spec.image.clone());
        let yaw = spec.yaw_degrees.to_radians();
        let material = materials.add(StandardMaterial {
            base_color_texture: Some(image.clone()),
            unlit: true,
            ..default()
        });

        commands.spawn((
            Painting {
                image,
                height: spec.height,
                yaw,
            },
            NeedsAspect,
            RoomEntity,
            Mesh3d(quad.clone()),
            MeshMaterial3d(material),
            Transform::from_translation(Vec3::from(spec.position))
                .with_rotation(Quat::from_rotation_y(yaw))
                .with_scale(Vec3::new(spec.height, spec.height, 1.0)),
        ));
    }
}

pub fn fit_painting_aspect(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut query: Query<(Entity, &Painting, &mut Transform), With<NeedsAspect>>,
) {
    for (entity, painting, mut transform) in query.iter_mut() {
        match asset_server.get_load_state(&painting.image) {
            Some(LoadState::Failed(err)) => {
                error!("Painting failed to load: {err}");
                commands.entity(entity).despawn_recursive();
            }
            Some(LoadState::Loaded) => {
                let Some(image) = images.get(&painting.image) else {
                    continue;
                };
                transform.scale.x = fitted_width(painting.height, image.size_f32());
                commands.entity(entity).remove::<NeedsAspect>();
            }
            _ => {}
        }
    }
}

/// Opens the painting under the pointer, or closes the one already shown.
pub fn pick_painting(
    mut actions: ResMut<FrameActions>,
    mut viewer: ResMut<PaintingViewer>,
    camera_query: Query<(&Camera, &GlobalTransform), With<ChaseCamera>>,
    paintings: Query<(&Painting, &Transform)>,
) {
    let Some(pointer) = actions.pointer else {
        return;
    };

    if viewer.is_open() {
        viewer.showing = None;
        actions.pointer_consumed = true;
        return;
    }

    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, pointer) else {
        return;
    };

    let hit = nearest_hit(
        ray.origin,
        *ray.direction,
        paintings
            .iter()
            .map(|(painting, transform)| (painting, painting_bounds(transform, painting.yaw))),
    );
    if let Some(painting) = hit {
        info!("Showing painting");
        viewer.showing = Some(painting.image.clone());
        actions.pointer_consumed = true;
    }
}

pub fn close_painting_on_escape(
    mut actions: ResMut<FrameActions>,
    mut viewer: ResMut<PaintingViewer>,
) {
    if actions.back && viewer.is_open() {
        viewer.showing = None;
        actions.back = false;
    }
}

pub fn sync_painting_overlay(
    mut commands: Commands,
    viewer: Res<PaintingViewer>,
    mut locked: ResMut<MovementLocked>,
    overlay_query: Query<Entity, With<PaintingOverlay>>,
) {
    if !viewer.is_changed() {
        return;
    }

    for entity in overlay_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    locked.0 = viewer.is_open();

    let Some(image) = viewer.showing.clone() else {
        return;
    };
    commands
        .spawn((
            PaintingOverlay,
            RoomEntity,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.85)),
            GlobalZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                ImageNode::new(image),
                Node {
                    max_width: Val::Percent(90.0),
                    max_height: Val::Percent(90.0),
                    ..default()
                },
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_follows_image_aspect() {
        assert!((fitted_width(2.0, Vec2::new(1600.0, 800.0)) - 4.0).abs() < 1e-6);
        assert_eq!(fitted_width(2.0, Vec2::ZERO), 2.0);
    }

    #[test]
    fn bounds_cover_the_scaled_quad() {
        let transform = Transform::from_xyz(0.0, 2.0, -9.9).with_scale(Vec3::new(3.0, 2.0, 1.0));
        let bounds = painting_bounds(&transform, 0.0);
        assert!((bounds.min.x + 1.5).abs() < 1e-6);
        assert!((bounds.max.y - 3.0).abs() < 1e-6);
    }

    #[test]
    fn ray_picks_the_closest_painting() {
        let near = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::splat(0.5));
        let far = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -9.0), Vec3::splat(0.5));
        let off = Aabb::from_center_half_extents(Vec3::new(4.0, 0.0, -2.0), Vec3::splat(0.5));
        let hit = nearest_hit(Vec3::ZERO, Vec3::NEG_Z, [("far", far), ("off", off), ("near", near)]);
        assert_eq!(hit, Some("near"));
    }

    #[test]
    fn ray_missing_everything_hits_nothing() {
        let wall = Aabb::from_center_half_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::splat(0.5));
        assert_eq!(nearest_hit(Vec3::ZERO, Vec3::Z, [(1, wall)]), None);
    }

    #[test]
    fn escape_closes_the_viewer_and_is_consumed() {
        let mut app = App::new();
        app.insert_resource(PaintingViewer {
            showing: Some(Handle::default()),
        })
        .insert_resource(FrameActions {
            back: true,
            ..default()
        })
        .add_systems(Update, close_painting_on_escape);
        app.update();

        assert!(!app.world().resource::<PaintingViewer>().is_open());
        assert!(!app.world().resource::<FrameActions>().back);
    }

    #[test]
    fn open_viewer_locks_movement() {
        let mut app = App::new();
        app.insert_resource(PaintingViewer {
            showing: Some(Handle::default()),
        })
        .init_resource::<MovementLocked>()
        .add_systems(Update, sync_painting_overlay);
        app.update();

        assert!(app.world().resource::<MovementLocked>().0);
        let world = app.world_mut();
        assert_eq!(world.query::<&PaintingOverlay>().iter(world).count(), 1);
    }
}
