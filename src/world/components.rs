use bevy::asset::UntypedHandle;
use bevy::prelude::*;
use bevy::utils::HashMap;
use serde::Deserialize;

/// What using an interaction target does.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InteractionEffect {
    /// Starts a looping track on first use, then pauses and resumes it.
    ToggleMusic { track: String },
    OpenLink { url: String },
}

/// A furniture model placed in the room.
#[derive(Component)]
pub struct Prop {
    pub path: String,
    /// The model file itself. Loader errors only reach this handle, never
    /// the scene label taken from it.
    pub source: UntypedHandle,
}

/// Set once the prop's scene finished loading.
#[derive(Component)]
pub struct PropLoaded;

/// The prop's collider is derived from its meshes once they exist.
#[derive(Component)]
pub struct PendingCollider;

/// Loaded props by asset path.
#[derive(Resource, Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Entity>,
}

impl ModelRegistry {
    pub fn insert(&mut self, path: impl Into<String>, entity: Entity) {
        self.models.insert(path.into(), entity);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.models.contains_key(path)
    }

    pub fn remove(&mut self, path: &str) -> Option<Entity> {
        self.models.remove(path)
    }

    pub fn clear(&mut self) {
        self.models.clear();
    }
}

/// Marker for the floating "E" prompt.
#[derive(Component)]
pub struct PromptGlyph;

/// Seconds between prompt texture swaps.
pub const PROMPT_PULSE_SECONDS: f32 = 0.5;

/// Alternates the prompt between its two textures on a fixed interval.
#[derive(Component, Debug)]
pub struct PromptPulse {
    timer: f32,
    alternate: bool,
    pub plain: Handle<StandardMaterial>,
    pub pressed: Handle<StandardMaterial>,
}

impl PromptPulse {
    pub fn new(plain: Handle<StandardMaterial>, pressed: Handle<StandardMaterial>) -> Self {
        Self {
            timer: 0.0,
            alternate: false,
            plain,
            pressed,
        }
    }

    /// Returns `true` when the glyph swapped this tick.
    pub fn tick(&mut self, delta: f32) -> bool {
        self.timer += delta;
        if self.timer < PROMPT_PULSE_SECONDS {
            return false;
        }
        self.timer = 0.0;
        self.alternate = !self.alternate;
        true
    }

    pub fn showing_pressed(&self) -> bool {
        self.alternate
    }

    pub fn current(&self) -> &Handle<StandardMaterial> {
        if self.alternate {
            &self.pressed
        } else {
            &self.plain
        }
    }
}

/// Marker for the entity playing the record player's track.
#[derive(Component)]
pub struct RoomMusic;
