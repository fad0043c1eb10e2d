use bevy::prelude::*;

use super::components::{InteractionEffect, ModelRegistry, PromptGlyph, PromptPulse};
use super::paintings::PaintingViewer;
use crate::input::FrameActions;
use crate::layout::InteractionSpec;
use crate::player::Player;

/// Height of the prompt glyph above the active target.
pub const PROMPT_HEIGHT: f32 = 1.5;

/// A fixed spot in the room the player can use when close enough.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionTarget {
    pub name: String,
    pub position: Vec3,
    pub radius: f32,
    pub effect: InteractionEffect,
    /// Model that must be present for the target to be offered.
    pub requires: Option<String>,
}

impl From<&InteractionSpec> for InteractionTarget {
    fn from(spec: &InteractionSpec) -> Self {
        Self {
            name: spec.name.clone(),
            position: Vec3::from(spec.position),
            radius: spec.radius,
            effect: spec.effect.clone(),
            requires: spec.requires.clone(),
        }
    }
}

/// Targets in registration order.
#[derive(Resource, Debug, Default)]
pub struct InteractionTargets(pub Vec<InteractionTarget>);

/// Index of the target whose effect the next interact action fires.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct ArmedTarget(pub Option<usize>);

#[derive(Event, Debug, Clone)]
pub struct InteractionEvent {
    pub target: String,
    pub effect: InteractionEffect,
}

/// Distance on the floor plane, ignoring height.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    a.xz().distance(b.xz())
}

/// Nearest target strictly inside its own radius. Ties keep the earlier
/// target.
pub fn nearest_in_range(
    player: Vec3,
    targets: &[InteractionTarget],
    available: impl Fn(&InteractionTarget) -> bool,
) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, target) in targets.iter().enumerate() {
        if !available(target) {
            continue;
        }
        let distance = planar_distance(player, target.position);
        if distance >= target.radius {
            continue;
        }
        if best.map_or(true, |(_, nearest)| distance < nearest) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

pub fn update_proximity(
    targets: Res<InteractionTargets>,
    registry: Res<ModelRegistry>,
    mut armed: ResMut<ArmedTarget>,
    player_query: Query<&Transform, (With<Player>, Without<PromptGlyph>)>,
    mut prompt_query: Query<(&mut Transform, &mut Visibility), (With<PromptGlyph>, Without<Player>)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };

    let active = nearest_in_range(player.translation, &targets.0, |target| {
        target
            .requires
            .as_deref()
            .map_or(true, |path| registry.contains(path))
    });
    armed.set_if_neq(ArmedTarget(active));

    let Ok((mut transform, mut visibility)) = prompt_query.get_single_mut() else {
        return;
    };
    match active {
        Some(index) => {
            transform.translation = targets.0[index].position + Vec3::Y * PROMPT_HEIGHT;
            visibility.set_if_neq(Visibility::Visible);
        }
        None => {
            visibility.set_if_neq(Visibility::Hidden);
        }
    }
}

/// Pulses the prompt glyph and keeps it turned towards the camera.
pub fn animate_prompt(
    time: Res<Time>,
    camera_query: Query<&GlobalTransform, With<Camera3d>>,
    mut prompt_query: Query<
        (&mut PromptPulse, &mut MeshMaterial3d<StandardMaterial>, &mut Transform),
        With<PromptGlyph>,
    >,
) {
    let camera = camera_query.get_single().ok().map(|c| c.translation());

    for (mut pulse, mut material, mut transform) in prompt_query.iter_mut() {
        if pulse.tick(time.delta_secs()) {
            material.0 = pulse.current().clone();
        }
        if let Some(camera) = camera {
            // Quads face +Z, so aim -Z away from the camera.
            let toward = Vec3::new(camera.x, transform.translation.y, camera.z);
            if toward != transform.translation {
                let away = transform.translation * 2.0 - toward;
                transform.look_at(away, Vec3::Y);
            }
        }
    }
}

pub fn fire_interaction(
    actions: Res<FrameActions>,
    armed: Res<ArmedTarget>,
    viewer: Res<PaintingViewer>,
    targets: Res<InteractionTargets>,
    mut events: EventWriter<InteractionEvent>,
) {
    if viewer.is_open() || !actions.wants_interaction() {
        return;
    }
    let Some(target) = armed.0.and_then(|index| targets.0.get(index)) else {
        return;
    };

    info!("Interacting with {}", target.name);
    events.send(InteractionEvent {
        target: target.name.clone(),
        effect: target.effect.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, x: f32, radius: f32) -> InteractionTarget {
        InteractionTarget {
            name: name.to_string(),
            position: Vec3::new(x, 0.0, 0.0),
            radius,
            effect: InteractionEffect::OpenLink {
                url: format!("https://example.com/{name}"),
            },
            requires: None,
        }
    }

    #[test]
    fn planar_distance_ignores_height() {
        let d = planar_distance(Vec3::new(0.0, 5.0, 0.0), Vec3::new(3.0, -2.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn nearest_target_in_range_wins() {
        let targets = vec![
            target("table", 1.8, 2.0),
            target("desk", 2.2, 2.5),
            target("record", -0.9, 2.5),
        ];
        assert_eq!(nearest_in_range(Vec3::ZERO, &targets, |_| true), Some(2));
    }

    #[test]
    fn radius_boundary_is_exclusive() {
        let targets = vec![target("table", 2.0, 2.0)];
        assert_eq!(nearest_in_range(Vec3::ZERO, &targets, |_| true), None);
    }

    #[test]
    fn ties_keep_first_registered() {
        let targets = vec![target("left", -1.0, 2.0), target("right", 1.0, 2.0)];
        assert_eq!(nearest_in_range(Vec3::ZERO, &targets, |_| true), Some(0));
    }

    #[test]
    fn unavailable_targets_are_skipped() {
        let targets = vec![target("record", 0.5, 2.0), target("desk", 1.5, 2.0)];
        let picked = nearest_in_range(Vec3::ZERO, &targets, |t| t.name != "record");
        assert_eq!(picked, Some(1));
    }

    #[test]
    fn nothing_in_range_disarms() {
        let targets = vec![target("desk", 8.0, 2.0)];
        assert_eq!(nearest_in_range(Vec3::ZERO, &targets, |_| true), None);
    }

    fn proximity_app(targets: Vec<InteractionTarget>) -> App {
        let mut app = App::new();
        app.insert_resource(InteractionTargets(targets))
            .init_resource::<ModelRegistry>()
            .init_resource::<ArmedTarget>()
            .add_systems(Update, update_proximity);
        app.world_mut().spawn((Player, Transform::default()));
        app.world_mut()
            .spawn((PromptGlyph, Transform::default(), Visibility::Hidden));
        app
    }

    #[test]
    fn prompt_floats_above_armed_target() {
        let mut app = proximity_app(vec![target("desk", 1.0, 2.0)]);
        app.update();

        assert_eq!(app.world().resource::<ArmedTarget>().0, Some(0));
        let world = app.world_mut();
        let (transform, visibility) = world
            .query_filtered::<(&Transform, &Visibility), With<PromptGlyph>>()
            .single(world);
        assert_eq!(transform.translation, Vec3::new(1.0, PROMPT_HEIGHT, 0.0));
        assert_eq!(*visibility, Visibility::Visible);
    }

    #[test]
    fn missing_model_hides_its_target() {
        let mut record = target("record", 1.0, 2.0);
        record.requires = Some("models/record-player.glb".to_string());
        let mut app = proximity_app(vec![record]);
        app.update();

        assert_eq!(app.world().resource::<ArmedTarget>().0, None);
        let world = app.world_mut();
        let visibility = world
            .query_filtered::<&Visibility, With<PromptGlyph>>()
            .single(world);
        assert_eq!(*visibility, Visibility::Hidden);
    }

    #[test]
    fn interact_fires_only_the_armed_effect() {
        let mut app = App::new();
        app.insert_resource(InteractionTargets(vec![
            target("desk", 1.0, 2.0),
            target("table", 5.0, 2.0),
        ]))
        .insert_resource(ArmedTarget(Some(1)))
        .init_resource::<PaintingViewer>()
        .insert_resource(FrameActions {
            interact: true,
            ..default()
        })
        .add_event::<InteractionEvent>()
        .add_systems(Update, fire_interaction);
        app.update();

        let events = app.world().resource::<Events<InteractionEvent>>();
        let fired: Vec<_> = events.iter_current_update_events().collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].target, "table");
    }
}
