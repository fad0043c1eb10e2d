//! Room layout loaded from JSON.
//!
//! The layout is read from `assets/room.json` at startup. A copy of that file
//! is compiled in, so a missing or broken file on disk still yields a room.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::collision::RoomBoundary;
use crate::world::InteractionEffect;

pub const LAYOUT_PATH: &str = "assets/room.json";
const EMBEDDED_LAYOUT: &str = include_str!("../assets/room.json");

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("failed to read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("layout is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid layout: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomShape {
    pub size: f32,
    pub height: f32,
    pub wall_color: [f32; 3],
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraRig {
    pub offset: [f32; 3],
    pub bounds: Option<RoomBoundary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Links {
    pub resume: String,
}

/// How a prop blocks movement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColliderSpec {
    /// Decorative; actors walk through it.
    None,
    /// Derived from the model's meshes once it has spawned.
    #[default]
    Auto,
    /// Invisible box of `size` centred at the prop position plus `offset`,
    /// turned with the prop's yaw.
    Box {
        size: [f32; 3],
        #[serde(default)]
        offset: [f32; 3],
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropSpec {
    pub path: String,
    pub position: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub yaw_degrees: f32,
    #[serde(default)]
    pub roll_degrees: f32,
    #[serde(default)]
    pub collider: ColliderSpec,
}

impl PropSpec {
    pub fn transform(&self) -> Transform {
        Transform {
            translation: Vec3::from(self.position),
            rotation: Quat::from_euler(
                EulerRot::YXZ,
                self.yaw_degrees.to_radians(),
                0.0,
                self.roll_degrees.to_radians(),
            ),
            scale: Vec3::from(self.scale),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaintingSpec {
    pub image: String,
    pub position: [f32; 3],
    #[serde(default)]
    pub yaw_degrees: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionSpec {
    pub name: String,
    pub position: [f32; 3],
    pub radius: f32,
    pub effect: InteractionEffect,
    /// Model path that must have loaded for the interaction to be offered.
    #[serde(default)]
    pub requires: Option<String>,
}

#[derive(Resource, Debug, Clone, Deserialize)]
pub struct RoomLayout {
    pub room: RoomShape,
    pub boundary: RoomBoundary,
    pub camera: CameraRig,
    pub player_spawn: [f32; 3],
    pub cat_spawn: [f32; 3],
    pub links: Links,
    #[serde(default)]
    pub props: Vec<PropSpec>,
    #[serde(default)]
    pub paintings: Vec<PaintingSpec>,
    #[serde(default)]
    pub interactions: Vec<InteractionSpec>,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn check_boundary(name: &str, b: &RoomBoundary) -> Result<(), LayoutError> {
    if b.min_x >= b.max_x || b.min_z >= b.max_z {
        return Err(LayoutError::Invalid(format!("{name} has min >= max")));
    }
    Ok(())
}

impl RoomLayout {
    pub fn from_json(text: &str) -> Result<Self, LayoutError> {
        let layout: RoomLayout = serde_json::from_str(text)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Layout compiled into the binary.
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_LAYOUT).expect("embedded room layout is valid")
    }

    fn validate(&self) -> Result<(), LayoutError> {
        check_boundary("boundary", &self.boundary)?;
        if let Some(bounds) = &self.camera.bounds {
            check_boundary("camera bounds", bounds)?;
        }
        if let Some(target) = self.interactions.iter().find(|t| t.radius <= 0.0) {
            return Err(LayoutError::Invalid(format!(
                "interaction '{}' needs a positive radius",
                target.name
            )));
        }
        if let Some(painting) = self.paintings.iter().find(|p| p.height <= 0.0) {
            return Err(LayoutError::Invalid(format!(
                "painting '{}' needs a positive height",
                painting.image
            )));
        }
        Ok(())
    }
}

/// Reads the room layout before any room system runs.
pub struct LayoutPlugin;

impl Plugin for LayoutPlugin {
    fn build(&self, app: &mut App) {
        let layout = match RoomLayout::load(Path::new(LAYOUT_PATH)) {
            Ok(layout) => {
                info!("Room layout loaded from {}", LAYOUT_PATH);
                layout
            }
            Err(LayoutError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!("No {} on disk, using built-in room layout", LAYOUT_PATH);
                RoomLayout::embedded()
            }
            Err(err) => {
                error!("{err}; falling back to built-in room layout");
                RoomLayout::embedded()
            }
        };
        app.insert_resource(layout);
    }
}
