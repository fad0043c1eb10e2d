//! Axis-aligned collision for actors walking around the room.
//!
//! Everything here is plain data: colliders are registered once while the
//! room loads, and actors ask for a proposed move to be checked against
//! them each frame. Nothing resolves overlaps that already exist; only a
//! proposed translation is ever tested.

mod aabb;
mod world;

pub use aabb::Aabb;
pub use world::{Blocker, CollisionWorld, MoveRules, RoomBoundary};
