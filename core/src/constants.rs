// Units are world units and seconds. Tunable physics lives in `Tuning`;
// these are the fixed rules of the game.

// Player
pub const PLAYER_SIZE: f64 = 1.0;
pub const MAX_HEALTH: i32 = 3;
pub const MAX_AMMO: i32 = 10;
/// Falling below this world height is fatal.
pub const KILL_PLANE_Y: f64 = -20.0;

// Enemy contact
pub const KNOCKBACK_UP: f64 = 15.0;
pub const KNOCKBACK_SPEED: f64 = 20.0;
pub const KNOCKBACK_SECONDS: f64 = 0.3;
/// Euclidean center distance at which a patrolling enemy hurts the player.
pub const ENEMY_TOUCH_RADIUS: f64 = 0.95;

// Enemy patrol probes, relative to the enemy center, scaled by direction on x
pub const SUPPORT_PROBE_DROP: f64 = 0.1;
pub const WALL_PROBE_AHEAD: f64 = 0.7;
pub const WALL_PROBE_RISE: f64 = 0.25;
pub const CLIFF_PROBE_AHEAD: f64 = 0.8;
pub const CLIFF_PROBE_DROP: f64 = 1.2;

// Fireballs
pub const FIREBALL_SIZE: f64 = 0.4;
pub const EMPOWERED_FIREBALL_SIZE: f64 = 0.8;
pub const EMPOWERED_SPEED_MULTIPLIER: f64 = 1.5;
pub const FIREBALL_SPAWN_AHEAD: f64 = 0.6;
pub const FIREBALL_SPAWN_RISE: f64 = 0.5;
/// Fireballs farther than this from the player are dropped.
pub const FIREBALL_MAX_RANGE: f64 = 200.0;

// Buffs
pub const SUPER_SECONDS: f64 = 8.0;
pub const UNLIMITED_AMMO_SECONDS: f64 = 8.0;

// Score
pub const SCORE_HP_PICKUP: u32 = 25;
pub const SCORE_INVINCIBLE_PICKUP: u32 = 50;
pub const SCORE_AMMO_PICKUP: u32 = 50;
pub const SCORE_SMASH: u32 = 50;
pub const SCORE_ENEMY_SHOT: u32 = 100;
pub const SCORE_WIN_BONUS: u32 = 1000;

// Level layout
pub const WORLD_FLOOR_Y: f64 = -50.0;
pub const SAFE_START_X: f64 = -10.0;
pub const SAFE_TOP_Y: f64 = 6.0;
pub const SAFE_WIDTH: f64 = 20.0;
pub const SAFE_DEPTH: f64 = 5.0;
pub const PLAYER_SPAWN_HEIGHT: f64 = 2.0;
/// Generated segments start from here, below the safe platform.
pub const FIRST_SEGMENT_TOP: f64 = 0.0;

pub const GAP_CHANCE: f64 = 0.40;
pub const HEIGHT_CHANGE_CHANCE: f64 = 0.45;
pub const MAX_HEIGHT_CHANGE: f64 = 3.0;
pub const MIN_HEIGHT_CHANGE: f64 = 1.0;
pub const MIN_SEGMENT_TOP: f64 = -5.0;
pub const MAX_SEGMENT_TOP: f64 = 10.0;

pub const MIN_GAP: f64 = 2.5;
/// Fraction of the full jump distance a gap may use.
pub const GAP_REACH: f64 = 0.7;
/// Further reduction when the far side is higher.
pub const UPHILL_GAP_FACTOR: f64 = 0.6;

pub const MIN_CHUNK_WIDTH: f64 = 10.0;
pub const MAX_CHUNK_WIDTH: f64 = 16.0;
pub const MIN_CHUNK_DEPTH: f64 = 4.0;
pub const MAX_CHUNK_DEPTH: f64 = 12.0;

/// Chunks narrower than this get no enemies, obstacles or powerups.
pub const SCATTER_MIN_WIDTH: f64 = 6.0;
/// One placement attempt per this much chunk width, plus zero or one extra.
pub const SCATTER_SPACING: f64 = 7.0;
pub const SCATTER_EDGE_MARGIN: f64 = 1.5;
pub const ENEMY_CHANCE: f64 = 0.50;
/// Cumulative: rolls below this and above ENEMY_CHANCE place an obstacle.
pub const OBSTACLE_CHANCE: f64 = 0.80;
pub const AMMO_POWERUP_ROLL: f64 = 0.6;
pub const INVINCIBLE_POWERUP_ROLL: f64 = 0.3;

pub const ENEMY_SIZE: f64 = 1.0;
pub const OBSTACLE_WIDTH: f64 = 1.0;
pub const OBSTACLE_HEIGHT: f64 = 1.5;
pub const POWERUP_SIZE: f64 = 0.5;
/// Powerups float with their center this far above the ground.
pub const POWERUP_HOVER: f64 = 0.5;

/// Occupancy probe used before placing scatter entities.
pub const SCATTER_PROBE_WIDTH: f64 = 1.5;
pub const SCATTER_PROBE_LIFT: f64 = 0.05;

pub const GOAL_WIDTH: f64 = 2.0;
pub const GOAL_HEIGHT: f64 = 4.0;
pub const GOAL_AHEAD: f64 = 5.0;
pub const GOAL_RISE: f64 = 2.0;

// Defaults for `Tuning`
pub const DEFAULT_SPEED: f64 = 8.0;
pub const DEFAULT_JUMP_FORCE: f64 = 14.0;
pub const DEFAULT_GRAVITY: f64 = 28.0;
pub const DEFAULT_LOW_JUMP_MULTIPLIER: f64 = 2.5;
pub const DEFAULT_FALL_GRAVITY_MULTIPLIER: f64 = 2.0;
pub const DEFAULT_AIR_SPEED_MULTIPLIER: f64 = 0.8;
pub const DEFAULT_INVINCIBILITY_SECONDS: f64 = 1.5;
pub const DEFAULT_FIREBALL_SPEED: f64 = 20.0;
pub const DEFAULT_COYOTE_SECONDS: f64 = 0.12;
pub const DEFAULT_ENEMY_SPEED: f64 = 5.0;
pub const DEFAULT_SEGMENT_COUNT: u32 = 20;
/// Upper bound on `LevelConfig::segment_count`.
pub const MAX_SEGMENT_COUNT: u32 = 10_000;

/// Nominal frame time for replays and tests (60 Hz).
pub const FRAME_DT: f64 = 1.0 / 60.0;
