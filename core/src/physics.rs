use crate::config::Tuning;
use crate::constants::*;
use crate::entities::Entities;
use crate::projectiles::fire;
use crate::rules;
use crate::types::*;
use crate::world::World;

/// Resolution order when a player probe touches several boxes. Lower wins,
/// ties go to the older (lower) id.
fn player_hit_rank(kind: Kind) -> u8 {
    match kind {
        Kind::Goal => 0,
        Kind::Obstacle => 1,
        Kind::Enemy => 2,
        Kind::Ground => 3,
        Kind::PowerupHp => 4,
        Kind::PowerupInvincible => 5,
        Kind::PowerupAmmo => 6,
        Kind::Fireball => 7,
        Kind::Player => 8,
    }
}

/// The one hit a player probe resolves against. Unclassified boxes never count.
pub fn first_player_hit(entities: &Entities, hits: &[EntityId]) -> Option<(EntityId, Kind)> {
    hits.iter()
        .filter_map(|id| entities.kind_of(*id).map(|kind| (*id, kind)))
        .min_by_key(|(id, kind)| (player_hit_rank(*kind), *id))
}

/// Integrate gravity into vertical velocity. Falling uses the fast-fall
/// multiplier; rising with jump released uses the low-jump multiplier.
pub fn apply_gravity(vel_y: f64, jump_held: bool, tuning: &Tuning, dt: f64) -> f64 {
    let mut g = tuning.gravity;
    if vel_y < 0.0 {
        g *= tuning.fall_gravity_multiplier;
    } else if vel_y > 0.0 && !jump_held {
        g *= tuning.low_jump_multiplier;
    }
    vel_y - g * dt
}

/// Horizontal speed for this frame. Knockback keeps its stored velocity;
/// otherwise the axis sets speed directly and stored velocity is cleared.
pub fn horizontal_speed(p: &mut PlayerState, axis: f64, tuning: &Tuning) -> f64 {
    if p.knocked_back() {
        return p.vel.x;
    }

    if axis > 0.0 {
        p.facing = facing::RIGHT;
    } else if axis < 0.0 {
        p.facing = facing::LEFT;
    }

    let mut speed = axis * tuning.speed;
    if !p.grounded {
        speed *= tuning.air_speed_multiplier;
    }
    p.vel.x = 0.0;
    speed
}

/// Player sub-step: gravity, X then Y resolution, coyote jump, firing and
/// the kill plane.
pub fn update_player(world: &mut World, input: &FrameInput, dt: f64) {
    if world.player.is_terminal() {
        return;
    }
    let tuning = *world.tuning();

    let p = &mut world.player;
    p.vel.y = apply_gravity(p.vel.y, input.jump_held, &tuning, dt);
    if p.knockback_timer > 0.0 {
        p.knockback_timer -= dt;
    }
    let dx = horizontal_speed(p, input.axis, &tuning) * dt;

    resolve_x(world, dx);
    if world.player.is_terminal() {
        sync_player_box(world);
        return;
    }
    let dy = world.player.vel.y * dt;
    resolve_y(world, dy);
    if world.player.is_terminal() {
        sync_player_box(world);
        return;
    }

    let p = &mut world.player;
    if p.grounded {
        p.coyote_timer = tuning.coyote_time;
    } else {
        p.coyote_timer -= dt;
    }
    if !p.knocked_back() && input.jump_pressed && p.coyote_timer > 0.0 {
        p.vel.y = tuning.jump_force;
        p.grounded = false;
        p.coyote_timer = 0.0;
    }

    if input.fire_pressed {
        fire(world);
    }

    if world.player.pos.y < KILL_PLANE_Y {
        world.player.health = 0;
    }
    sync_player_box(world);
    rules::check_defeat(world);
}

fn sync_player_box(world: &mut World) {
    let p = &world.player;
    world
        .registry
        .update(p.id, p.pos, Vec3::splat(PLAYER_SIZE));
}

fn resolve_x(world: &mut World, dx: f64) {
    let next = world.player.pos + Vec3::new(dx, 0.0, 0.0);
    let hits = world.registry.query_overlaps(world.player.id, next);

    match first_player_hit(&world.entities, &hits) {
        None => world.player.pos.x = next.x,
        Some((_, Kind::Ground)) => {}
        Some((hit, Kind::Obstacle | Kind::Enemy)) => {
            if world.player.has_super() {
                rules::smash(world, hit);
                world.player.pos.x = next.x;
            } else {
                rules::process_hit(world, hit);
            }
        }
        Some((hit, _)) => {
            rules::process_hit(world, hit);
            world.player.pos.x = next.x;
        }
    }
}

fn resolve_y(world: &mut World, dy: f64) {
    let next = world.player.pos + Vec3::new(0.0, dy, 0.0);
    let hits = world.registry.query_overlaps(world.player.id, next);

    match first_player_hit(&world.entities, &hits) {
        None | Some((_, Kind::Fireball)) => {
            world.player.pos.y = next.y;
            world.player.grounded = false;
        }
        Some((hit, kind @ (Kind::Ground | Kind::Obstacle))) => {
            if kind == Kind::Obstacle {
                touch_hazard(world, hit);
            }
            // Only landing grounds the player; bumping a ceiling just stops it.
            if world.player.vel.y < 0.0 {
                world.player.grounded = true;
            }
            world.player.vel.y = 0.0;
        }
        Some((hit, Kind::Enemy)) => touch_hazard(world, hit),
        Some((hit, _)) => {
            rules::process_hit(world, hit);
            world.player.pos.y = next.y;
            world.player.grounded = false;
        }
    }
}

fn touch_hazard(world: &mut World, hit: EntityId) {
    if world.player.has_super() {
        rules::smash(world, hit);
    } else {
        rules::process_hit(world, hit);
    }
}

/// Enemy sub-step, in list order.
pub fn update_enemies(world: &mut World, dt: f64) {
    let ids = world.entities.ids(Kind::Enemy).to_vec();
    for id in ids {
        if world.player.is_terminal() {
            break;
        }
        update_enemy(world, id, dt);
    }
}

fn update_enemy(world: &mut World, id: EntityId, dt: f64) {
    let Some(b) = world.registry.get(id).copied() else {
        return;
    };
    let Some(Entity::Enemy { dir }) = world.entities.get(id).copied() else {
        return;
    };
    let tuning = *world.tuning();
    let size = b.size();
    let mut pos = b.center();

    let below = pos - Vec3::new(0.0, SUPPORT_PROBE_DROP, 0.0);
    let supported = !world.registry.query_overlaps(id, below).is_empty();

    if supported {
        let wall_probe = pos + Vec3::new(dir * WALL_PROBE_AHEAD, WALL_PROBE_RISE, 0.0);
        let cliff_probe = pos + Vec3::new(dir * CLIFF_PROBE_AHEAD, -CLIFF_PROBE_DROP, 0.0);
        let wall = world.registry.query_overlaps(id, wall_probe);
        let floor_ahead = world.registry.query_overlaps(id, cliff_probe);

        let blocked = wall
            .iter()
            .any(|hit| world.entities.kind_of(*hit).is_some_and(Kind::is_solid));

        if blocked || floor_ahead.is_empty() {
            if let Some(Entity::Enemy { dir }) = world.entities.get_mut(id) {
                *dir = -*dir;
            }
        } else {
            pos.x += dir * tuning.enemy_speed * dt;
        }
    } else {
        let next = pos - Vec3::new(0.0, tuning.gravity * dt, 0.0);
        let landing = world
            .registry
            .query_overlaps(id, next)
            .iter()
            .filter_map(|hit| world.registry.get(*hit))
            .map(|surface| surface.max().y)
            .reduce(f64::max);
        pos.y = match landing {
            Some(top) => top + size.y * 0.5,
            None => next.y,
        };
    }

    if pos.distance(world.player.pos) < ENEMY_TOUCH_RADIUS && !world.player.has_super() {
        rules::process_hit(world, id);
    }

    world.registry.update(id, pos, size);
}
