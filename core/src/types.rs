use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ── Primitives ──────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }

    pub fn distance(self, other: Vec3) -> f64 {
        let d = self - other;
        (d.x * d.x + d.y * d.y + d.z * d.z).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Stable handle for a box in the registry. Never reused once removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub(crate) u32);

impl EntityId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

// ── Input ───────────────────────────────────────────────────

/// One frame of input, already edge-detected by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Horizontal axis in [-1, 1].
    pub axis: f64,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub fire_pressed: bool,
}

pub const NULL_INPUT: FrameInput = FrameInput {
    axis: 0.0,
    jump_pressed: false,
    jump_held: false,
    fire_pressed: false,
};

// ── Entities ────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Kind {
    Player,
    Ground,
    Enemy,
    Obstacle,
    Fireball,
    Goal,
    PowerupHp,
    PowerupInvincible,
    PowerupAmmo,
}

impl Kind {
    pub fn is_powerup(self) -> bool {
        matches!(
            self,
            Kind::PowerupHp | Kind::PowerupInvincible | Kind::PowerupAmmo
        )
    }

    /// Terrain that stops movement and fireballs.
    pub fn is_solid(self) -> bool {
        matches!(self, Kind::Ground | Kind::Obstacle)
    }
}

/// Classified entity with its kind-specific state carried inline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Player,
    Ground,
    /// Patrol direction, ±1.
    Enemy { dir: f64 },
    Obstacle,
    /// Travel direction, ±1. Empowered fireballs pierce.
    Fireball { dir: f64, empowered: bool },
    Goal,
    PowerupHp,
    PowerupInvincible,
    PowerupAmmo,
}

impl Entity {
    pub fn kind(&self) -> Kind {
        match self {
            Entity::Player => Kind::Player,
            Entity::Ground => Kind::Ground,
            Entity::Enemy { .. } => Kind::Enemy,
            Entity::Obstacle => Kind::Obstacle,
            Entity::Fireball { .. } => Kind::Fireball,
            Entity::Goal => Kind::Goal,
            Entity::PowerupHp => Kind::PowerupHp,
            Entity::PowerupInvincible => Kind::PowerupInvincible,
            Entity::PowerupAmmo => Kind::PowerupAmmo,
        }
    }
}

// ── Player ──────────────────────────────────────────────────

/// Facing direction: Right = 1, Left = -1.
pub mod facing {
    pub const RIGHT: f64 = 1.0;
    pub const LEFT: f64 = -1.0;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Alive,
    Terminal(Outcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: EntityId,
    pub pos: Vec3,
    pub vel: Vec3,
    pub facing: f64,
    pub grounded: bool,
    pub coyote_timer: f64,
    pub knockback_timer: f64,
    pub health: i32,
    pub max_health: i32,
    pub ammo: i32,
    pub max_ammo: i32,
    pub score: u32,
    pub elapsed: f64,
    pub invincible_timer: f64,
    pub super_timer: f64,
    pub unlimited_ammo_timer: f64,
    pub status: Status,
}

impl PlayerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status, Status::Terminal(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Alive => None,
            Status::Terminal(outcome) => Some(outcome),
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn has_super(&self) -> bool {
        self.super_timer > 0.0
    }

    pub fn has_unlimited_ammo(&self) -> bool {
        self.unlimited_ammo_timer > 0.0
    }

    pub fn knocked_back(&self) -> bool {
        self.knockback_timer > 0.0
    }

    /// Moves to `Terminal(outcome)`. Returns false if already terminal.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.status = Status::Terminal(outcome);
        true
    }
}

// ── Presentation ────────────────────────────────────────────

/// Things the presentation layer may want to react to, in frame order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Damaged { health: i32 },
    Healed { health: i32 },
    PowerupCollected { kind: Kind },
    /// Enemy or obstacle destroyed by touching it under super-invincibility.
    Smashed { kind: Kind },
    EnemyShot { enemy: EntityId },
    FireballFired { id: EntityId, empowered: bool },
    AmmoRefilled { ammo: i32 },
    Finished(Outcome),
}

/// Values the HUD displays. Read-only snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub ammo: i32,
    pub max_ammo: i32,
    pub score: u32,
    pub elapsed: f64,
    pub super_remaining: f64,
    pub unlimited_ammo_remaining: f64,
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    Plain,
    /// Super-invincible player.
    Rainbow,
    /// Player inside the post-hit invincibility window.
    Translucent,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderItem {
    pub id: EntityId,
    pub kind: Kind,
    pub position: Vec3,
    pub size: Vec3,
    pub transform: [[f64; 4]; 4],
    pub visual: Visual,
}
