use log::debug;

use crate::config::{GameConfig, Tuning};
use crate::constants::*;
use crate::entities::Entities;
use crate::prng::Prng;
use crate::registry::Registry;
use crate::types::*;
use crate::world::{new_player, World};

/// Horizontal distance covered by a full-height jump on flat ground.
pub fn max_jump_distance(tuning: &Tuning) -> f64 {
    let air_time = 2.0 * tuning.jump_force / tuning.gravity;
    tuning.speed * air_time
}

/// Largest gap allowed before a segment that sits `rise` above the previous one.
pub fn gap_bound(max_jump: f64, rise: f64) -> f64 {
    let bound = max_jump * GAP_REACH;
    if rise > 0.0 {
        bound * UPHILL_GAP_FACTOR
    } else {
        bound
    }
}

/// One generated ground chunk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start_x: f64,
    pub width: f64,
    pub depth: f64,
    pub top: f64,
    /// Empty space between the previous chunk and this one.
    pub gap_before: f64,
    /// Height difference from the previous segment.
    pub rise: f64,
}

impl Segment {
    pub fn end_x(&self) -> f64 {
        self.start_x + self.width
    }
}

/// What the generator built, kept next to the world for inspection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelLayout {
    pub max_jump_distance: f64,
    pub segments: Vec<Segment>,
}

/// Full-height ground column from the world floor up to `top`.
fn ground_column(center_x: f64, top: f64, width: f64, depth: f64) -> (Vec3, Vec3) {
    let height = top - WORLD_FLOOR_Y;
    (
        Vec3::new(center_x, top - height / 2.0, 0.0),
        Vec3::new(width, height, depth),
    )
}

/// Magnitude in [MIN_HEIGHT_CHANGE, MAX_HEIGHT_CHANGE), either sign.
fn height_change(rng: &mut Prng) -> f64 {
    let change = rng.range(-MAX_HEIGHT_CHANGE, MAX_HEIGHT_CHANGE);
    if change.abs() >= MIN_HEIGHT_CHANGE {
        change
    } else if change > 0.0 {
        MIN_HEIGHT_CHANGE
    } else {
        -MIN_HEIGHT_CHANGE
    }
}

/// Build a level from `config.level.seed`. Expects a validated config.
///
/// Build order (fixes entity ids and PRNG draws):
///  1. Safe platform, then the player above its center
///  2. Per segment: gap roll, height roll (+ change), gap size, width, depth
///  3. Ground chunk, then scatter placements on chunks wider than the minimum
///  4. Goal past the last chunk
pub fn generate_level(config: GameConfig) -> World {
    let mut rng = Prng::new(config.level.seed);
    let max_jump = max_jump_distance(&config.tuning);
    let segment_count = config.level.segment_count;

    // 1. Safe start
    let mut registry = Registry::new();
    let mut entities = Entities::new();
    let safe_center_x = SAFE_START_X + SAFE_WIDTH / 2.0;
    let (pos, size) = ground_column(safe_center_x, SAFE_TOP_Y, SAFE_WIDTH, SAFE_DEPTH);
    let safe = registry.add(pos, size);
    entities.classify(safe, Entity::Ground);

    let spawn = Vec3::new(safe_center_x, SAFE_TOP_Y + PLAYER_SPAWN_HEIGHT, 0.0);
    let player_id = registry.add(spawn, Vec3::splat(PLAYER_SIZE));
    entities.classify(player_id, Entity::Player);

    let layout = LevelLayout {
        max_jump_distance: max_jump,
        segments: Vec::with_capacity(segment_count as usize),
    };
    let mut world = World::from_parts(
        config,
        registry,
        entities,
        new_player(player_id, spawn),
        layout,
    );

    // 2-3. Segments
    let mut x = SAFE_START_X + SAFE_WIDTH;
    let mut top = FIRST_SEGMENT_TOP;
    for i in 0..segment_count {
        let wants_gap = i > 0 && rng.chance(GAP_CHANCE);
        let mut next_top = top;
        if rng.chance(HEIGHT_CHANGE_CHANCE) {
            next_top = (top + height_change(&mut rng)).clamp(MIN_SEGMENT_TOP, MAX_SEGMENT_TOP);
        }
        let rise = next_top - top;

        let gap = if wants_gap {
            let bound = gap_bound(max_jump, rise);
            rng.range(MIN_GAP.min(bound), bound)
        } else {
            0.0
        };
        x += gap;
        top = next_top;

        let width = rng.range(MIN_CHUNK_WIDTH, MAX_CHUNK_WIDTH);
        let depth = rng.range(MIN_CHUNK_DEPTH, MAX_CHUNK_DEPTH);
        let center_x = x + width / 2.0;
        let (pos, size) = ground_column(center_x, top, width, depth);
        world.spawn(Entity::Ground, pos, size);

        if width > SCATTER_MIN_WIDTH {
            scatter(&mut world, &mut rng, center_x, width, top);
        }

        world.layout.segments.push(Segment {
            start_x: x,
            width,
            depth,
            top,
            gap_before: gap,
            rise,
        });
        x += width;
    }

    // 4. Goal
    world.spawn(
        Entity::Goal,
        Vec3::new(x + GOAL_AHEAD, top + GOAL_RISE, 0.0),
        Vec3::new(GOAL_WIDTH, GOAL_HEIGHT, GOAL_WIDTH),
    );

    debug!(
        "generated level seed={} segments={} boxes={} max_jump={:.2} end_x={:.1}",
        world.config.level.seed,
        segment_count,
        world.registry.len(),
        max_jump,
        x
    );
    world
}

/// Enemies, obstacles and powerups along one chunk. A placement is skipped when
/// the probe above the ground top already holds something; the probe spans
/// the tallest footprint, so nothing placed here overlaps.
fn scatter(world: &mut World, rng: &mut Prng, center_x: f64, width: f64, top: f64) {
    let attempts = (width / SCATTER_SPACING).floor() as i32 + rng.int_range(0, 1);
    let half_range = width / 2.0 - SCATTER_EDGE_MARGIN;
    let probe_size = Vec3::new(
        SCATTER_PROBE_WIDTH,
        OBSTACLE_HEIGHT - 2.0 * SCATTER_PROBE_LIFT,
        SCATTER_PROBE_WIDTH,
    );

    for _ in 0..attempts {
        let x = center_x + rng.range(-half_range, half_range);
        let roll = rng.value();

        let probe = Vec3::new(x, top + OBSTACLE_HEIGHT / 2.0, 0.0);
        if world.registry.region_occupied(probe, probe_size) {
            continue;
        }

        if roll < ENEMY_CHANCE {
            let dir = rng.sign();
            world.spawn(
                Entity::Enemy { dir },
                Vec3::new(x, top + ENEMY_SIZE / 2.0, 0.0),
                Vec3::splat(ENEMY_SIZE),
            );
        } else if roll < OBSTACLE_CHANCE {
            world.spawn(
                Entity::Obstacle,
                Vec3::new(x, top + OBSTACLE_HEIGHT / 2.0, 0.0),
                Vec3::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT, OBSTACLE_WIDTH),
            );
        } else {
            let pick = rng.value();
            let powerup = if pick > AMMO_POWERUP_ROLL {
                Entity::PowerupAmmo
            } else if pick > INVINCIBLE_POWERUP_ROLL {
                Entity::PowerupInvincible
            } else {
                Entity::PowerupHp
            };
            world.spawn(
                powerup,
                Vec3::new(x, top + POWERUP_HOVER, 0.0),
                Vec3::splat(POWERUP_SIZE),
            );
        }
    }
}
