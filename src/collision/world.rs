use bevy::prelude::*;
use serde::Deserialize;

use super::aabb::Aabb;

/// Rectangular walkable area of the room on the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RoomBoundary {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl RoomBoundary {
    /// Clamps X and Z independently; Y is untouched.
    pub fn clamp(&self, position: Vec3) -> Vec3 {
        Vec3::new(
            position.x.clamp(self.min_x, self.max_x),
            position.y,
            position.z.clamp(self.min_z, self.max_z),
        )
    }

    pub fn contains_box(&self, bounds: &Aabb) -> bool {
        bounds.min.x >= self.min_x
            && bounds.max.x <= self.max_x
            && bounds.min.z >= self.min_z
            && bounds.max.z <= self.max_z
    }
}

/// Static obstacle registered while the room loads.
#[derive(Debug, Clone)]
pub struct Collider {
    pub owner: Option<Entity>,
    pub bounds: Aabb,
}

/// What stopped a proposed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    Wall,
    /// Index into the collider list.
    Object(usize),
    Player,
}

/// Which extra checks a mover wants on top of the static colliders.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveRules {
    pub reject_outside_boundary: bool,
    pub player: Option<Aabb>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveCheck {
    pub resolved: Aabb,
    pub blocked: Option<Blocker>,
}

impl MoveCheck {
    pub fn accepted(&self) -> bool {
        self.blocked.is_none()
    }
}

/// Room boundary plus every static collider in the room.
#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionWorld {
    boundary: Option<RoomBoundary>,
    colliders: Vec<Collider>,
}

impl CollisionWorld {
    pub fn new(boundary: Option<RoomBoundary>) -> Self {
        Self {
            boundary,
            colliders: Vec::new(),
        }
    }

    pub fn boundary(&self) -> Option<&RoomBoundary> {
        self.boundary.as_ref()
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn add(&mut self, owner: Option<Entity>, bounds: Aabb) {
        self.colliders.push(Collider { owner, bounds });
    }

    /// Drops every collider belonging to `owner`.
    pub fn remove_owned_by(&mut self, owner: Entity) {
        self.colliders.retain(|c| c.owner != Some(owner));
    }

    /// First registered collider overlapping `bounds`.
    pub fn first_hit(&self, bounds: &Aabb) -> Option<usize> {
        self.colliders
            .iter()
            .position(|collider| collider.bounds.intersects(bounds))
    }

    /// Checks `current` translated by `delta`.
    ///
    /// Order: room boundary (when requested), static colliders, then the
    /// player box. The first failing check wins.
    pub fn try_move(&self, current: &Aabb, delta: Vec3, rules: MoveRules) -> MoveCheck {
        let resolved = current.translated(delta);

        let blocked = if rules.reject_outside_boundary
            && self.boundary.is_some_and(|b| !b.contains_box(&resolved))
        {
            Some(Blocker::Wall)
        } else if let Some(index) = self.first_hit(&resolved) {
            Some(Blocker::Object(index))
        } else if rules.player.is_some_and(|p| p.intersects(&resolved)) {
            Some(Blocker::Player)
        } else {
            None
        };

        MoveCheck { resolved, blocked }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> RoomBoundary {
        RoomBoundary {
            min_x: -9.5,
            max_x: 9.5,
            min_z: -9.5,
            max_z: 9.5,
        }
    }

    fn actor_at(x: f32, z: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, 1.0, z), Vec3::new(0.5, 1.0, 0.5))
    }

    #[test]
    fn clamp_is_per_axis() {
        let p = boundary().clamp(Vec3::new(12.0, 3.0, -2.0));
        assert_eq!(p, Vec3::new(9.5, 3.0, -2.0));
    }

    #[test]
    fn free_move_is_accepted() {
        let world = CollisionWorld::new(Some(boundary()));
        let check = world.try_move(&actor_at(0.0, 0.0), Vec3::X, MoveRules::default());
        assert!(check.accepted());
        assert_eq!(check.resolved, actor_at(1.0, 0.0));
    }

    #[test]
    fn boundary_only_rejects_when_requested() {
        let world = CollisionWorld::new(Some(boundary()));
        let current = actor_at(8.8, 0.0);
        let loose = world.try_move(&current, Vec3::X, MoveRules::default());
        assert!(loose.accepted());

        let strict = MoveRules {
            reject_outside_boundary: true,
            player: None,
        };
        assert_eq!(world.try_move(&current, Vec3::X, strict).blocked, Some(Blocker::Wall));
    }

    #[test]
    fn first_registered_collider_wins() {
        let mut world = CollisionWorld::new(None);
        world.add(None, actor_at(5.0, 0.0));
        world.add(None, actor_at(5.2, 0.0));
        let check = world.try_move(&actor_at(3.0, 0.0), Vec3::new(1.5, 0.0, 0.0), MoveRules::default());
        assert_eq!(check.blocked, Some(Blocker::Object(0)));
    }

    #[test]
    fn objects_take_precedence_over_player() {
        let mut world = CollisionWorld::new(None);
        world.add(None, actor_at(2.0, 0.0));
        let rules = MoveRules {
            reject_outside_boundary: false,
            player: Some(actor_at(2.0, 0.0)),
        };
        let check = world.try_move(&actor_at(0.0, 0.0), Vec3::new(1.2, 0.0, 0.0), rules);
        assert_eq!(check.blocked, Some(Blocker::Object(0)));
    }

    #[test]
    fn player_box_is_reported() {
        let world = CollisionWorld::new(Some(boundary()));
        let rules = MoveRules {
            reject_outside_boundary: true,
            player: Some(actor_at(1.5, 0.0)),
        };
        let check = world.try_move(&actor_at(0.0, 0.0), Vec3::new(0.6, 0.0, 0.0), rules);
        assert_eq!(check.blocked, Some(Blocker::Player));
    }

    #[test]
    fn removing_owner_drops_its_colliders() {
        let mut world = CollisionWorld::new(None);
        let owner = Entity::from_raw(7);
        world.add(Some(owner), actor_at(2.0, 0.0));
        world.add(None, actor_at(-2.0, 0.0));
        world.remove_owned_by(owner);
        assert_eq!(world.colliders().len(), 1);
        assert_eq!(world.first_hit(&actor_at(2.0, 0.0)), None);
    }
}
