//! The furnished room: geometry, props, paintings and interaction targets.

pub mod components;
pub mod effects;
pub mod interaction;
pub mod paintings;
pub mod props;
pub mod setup;

use bevy::prelude::*;

pub use components::{InteractionEffect, ModelRegistry};
pub use effects::open_link_with_notice;
pub use interaction::{ArmedTarget, InteractionEvent, InteractionTargets};
pub use paintings::{close_painting_on_escape, PaintingViewer};

use crate::collision::CollisionWorld;
use crate::game_state::{AppState, RoomSet};
use effects::run_interaction_effects;
use interaction::{animate_prompt, fire_interaction, update_proximity};
use paintings::{fit_painting_aspect, pick_painting, sync_painting_overlay};
use props::{resolve_auto_colliders, watch_prop_loads};
use setup::{cleanup_room, setup_world};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CollisionWorld>()
            .init_resource::<ModelRegistry>()
            .init_resource::<InteractionTargets>()
            .init_resource::<ArmedTarget>()
            .init_resource::<PaintingViewer>()
            .add_event::<InteractionEvent>()
            .add_systems(OnEnter(AppState::InGame), setup_world)
            .add_systems(OnExit(AppState::InGame), cleanup_room)
            .add_systems(
                Update,
                (watch_prop_loads, resolve_auto_colliders, fit_painting_aspect)
                    .chain()
                    .before(RoomSet::Input)
                    .run_if(in_state(AppState::InGame)),
            )
            .add_systems(
                Update,
                (
                    pick_painting,
                    close_painting_on_escape,
                    update_proximity,
                    fire_interaction,
                    run_interaction_effects,
                )
                    .chain()
                    .in_set(RoomSet::Interaction),
            )
            .add_systems(
                Update,
                (sync_painting_overlay, animate_prompt).in_set(RoomSet::Present),
            );
    }
}
