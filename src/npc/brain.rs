//! Wandering behaviour of the room cat.
//!
//! The brain is a small state machine (`idle`, `sleep`, `walk`, `attack`)
//! advanced once per frame by [`CatBrain::step`]. Randomness enters only
//! through [`BehaviorRoll`], drawn when the behaviour timer runs out.

use bevy::prelude::*;
use rand::Rng;

use crate::collision::{Aabb, Blocker, CollisionWorld, MoveRules};
use crate::sprite::{AnimationClock, FrameRange};

pub const CAT_SPEED: f32 = 1.0;
pub const CAT_FRAME_SECONDS: f32 = 0.15;
pub const CAT_HALF_EXTENTS: Vec3 = Vec3::new(0.5, 0.6, 0.5);
pub const MAX_ATTACK_PLAYS: u32 = 2;
pub const CAT_GLOW: f32 = 0.2;
pub const CAT_ATTACK_GLOW: f32 = 1.1;

const SLEEP_CHANCE: f32 = 0.25;
const IDLE_CHANCE: f32 = 0.55;
const MIN_BEHAVIOR_SECONDS: f32 = 3.0;
const BEHAVIOR_SPREAD_SECONDS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatState {
    Idle,
    Sleep,
    Walk,
    Attack,
}

impl CatState {
    pub fn frames(self) -> FrameRange {
        match self {
            CatState::Idle => FrameRange::new(0, 11),
            CatState::Sleep => FrameRange::new(12, 16),
            CatState::Walk => FrameRange::new(17, 23),
            CatState::Attack => FrameRange::new(24, 25),
        }
    }

    pub fn glow(self) -> f32 {
        match self {
            CatState::Attack => CAT_ATTACK_GLOW,
            _ => CAT_GLOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAxis {
    X,
    Z,
}

impl WalkAxis {
    fn unit(self) -> Vec3 {
        match self {
            WalkAxis::X => Vec3::X,
            WalkAxis::Z => Vec3::Z,
        }
    }
}

/// Uniform samples in [0, 1) consumed by one behaviour change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorRoll {
    pub state: f32,
    pub direction: f32,
    pub axis: f32,
    pub duration: f32,
}

impl BehaviorRoll {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            state: rng.gen(),
            direction: rng.gen(),
            axis: rng.gen(),
            duration: rng.gen(),
        }
    }
}

/// Result of one brain step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatStep {
    pub position: Vec3,
    /// Frame to display, when it changed.
    pub frame: Option<usize>,
}

#[derive(Component, Debug, Clone)]
pub struct CatBrain {
    state: CatState,
    clock: AnimationClock,
    /// +1 or -1 along `axis`.
    direction: f32,
    axis: WalkAxis,
    behavior_timer: f32,
    attack_timer: f32,
    attack_count: u32,
    frame_dirty: bool,
}

impl Default for CatBrain {
    fn default() -> Self {
        Self {
            state: CatState::Walk,
            clock: AnimationClock::new(CatState::Walk.frames(), CAT_FRAME_SECONDS),
            direction: -1.0,
            axis: WalkAxis::X,
            behavior_timer: 0.0,
            attack_timer: 0.0,
            attack_count: 0,
            frame_dirty: false,
        }
    }
}

impl CatBrain {
    pub fn state(&self) -> CatState {
        self.state
    }

    pub fn frame(&self) -> usize {
        self.clock.frame()
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn attack_count(&self) -> u32 {
        self.attack_count
    }

    /// Hitbox centred on `position`, independent of the sprite's size.
    pub fn hitbox(&self, position: Vec3) -> Aabb {
        Aabb::from_center_half_extents(position, CAT_HALF_EXTENTS)
    }

    /// Horizontal scale sign that makes the sprite face its travel direction.
    /// Only defined while walking along X; the sheet is drawn facing left.
    pub fn mirror_sign(&self) -> Option<f32> {
        (self.axis == WalkAxis::X).then_some(-self.direction)
    }

    fn change_state(&mut self, next: CatState) {
        if self.state == next {
            return;
        }
        debug!("Cat {:?} -> {:?}", self.state, next);
        self.state = next;
        self.clock.switch_to(next.frames(), CAT_FRAME_SECONDS);
        self.frame_dirty = true;
        if next == CatState::Attack {
            self.enter_attack();
        }
    }

    /// Every entry into `attack`, including a replay, counts as one play.
    fn enter_attack(&mut self) {
        self.attack_count += 1;
        self.attack_timer = 0.0;
        self.clock.restart();
        self.frame_dirty = true;
    }

    /// Applies a behaviour change and re-arms the behaviour timer.
    pub fn apply_roll(&mut self, roll: BehaviorRoll) {
        if roll.state < SLEEP_CHANCE {
            self.change_state(CatState::Sleep);
            // a fresh nap starts a new encounter
            self.attack_count = 0;
        } else if roll.state < IDLE_CHANCE {
            self.change_state(CatState::Idle);
        } else {
            self.change_state(CatState::Walk);
            self.direction = if roll.direction > 0.5 { 1.0 } else { -1.0 };
            self.axis = if roll.axis > 0.3 { WalkAxis::X } else { WalkAxis::Z };
        }
        self.behavior_timer = MIN_BEHAVIOR_SECONDS + roll.duration * BEHAVIOR_SPREAD_SECONDS;
    }

    /// Advances the brain by `delta` seconds.
    ///
    /// `player` is the player's current box; touching it only matters while
    /// asleep, where it wakes the cat into an attack.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        delta: f32,
        position: Vec3,
        world: &CollisionWorld,
        player: Option<Aabb>,
        rng: &mut R,
    ) -> CatStep {
        self.behavior_timer -= delta;
        if self.behavior_timer <= 0.0 && self.state != CatState::Attack {
            self.apply_roll(BehaviorRoll::sample(rng));
        }

        let mut position = position;
        let hitbox = self.hitbox(position);

        match self.state {
            CatState::Walk => {
                let offset = self.axis.unit() * self.direction * CAT_SPEED * delta;
                let rules = MoveRules {
                    reject_outside_boundary: true,
                    player,
                };
                match world.try_move(&hitbox, offset, rules).blocked {
                    Some(Blocker::Wall) | Some(Blocker::Object(_)) => {
                        self.direction = -self.direction;
                        self.change_state(CatState::Idle);
                    }
                    // bumping the player while awake is harmless
                    Some(Blocker::Player) | None => position += offset,
                }
            }
            CatState::Sleep => {
                if player.is_some_and(|p| p.intersects(&hitbox))
                    && self.attack_count < MAX_ATTACK_PLAYS
                {
                    self.change_state(CatState::Attack);
                }
            }
            CatState::Attack => {
                self.attack_timer += delta;
                let duration = CAT_FRAME_SECONDS * CatState::Attack.frames().len() as f32;
                if self.attack_timer >= duration {
                    if self.attack_count >= MAX_ATTACK_PLAYS {
                        self.change_state(CatState::Walk);
                    } else {
                        self.enter_attack();
                    }
                }
            }
            CatState::Idle => {}
        }

        let frame = if std::mem::take(&mut self.frame_dirty) {
            Some(self.clock.frame())
        } else {
            self.clock.tick(delta)
        };

        CatStep { position, frame }
    }
}
