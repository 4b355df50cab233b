use log::info;

use crate::constants::*;
use crate::types::*;
use crate::world::World;

/// Applies the effect of the player touching `id`.
///
/// Safe to call with an id destroyed earlier in the frame, and a no-op once
/// the run is over.
pub fn process_hit(world: &mut World, id: EntityId) {
    if world.player.is_terminal() {
        return;
    }
    let Some(kind) = world.kind_of(id) else {
        return;
    };

    match kind {
        Kind::Obstacle => {
            world.player.health = 0;
            world.emit(GameEvent::Damaged { health: 0 });
            check_defeat(world);
        }
        Kind::Enemy => hit_by_enemy(world, id),
        Kind::PowerupHp => {
            let p = &mut world.player;
            p.health = (p.health + 1).min(p.max_health);
            p.score += SCORE_HP_PICKUP;
            let health = p.health;
            collect(world, id, kind);
            world.emit(GameEvent::Healed { health });
        }
        Kind::PowerupInvincible => {
            world.player.super_timer = SUPER_SECONDS;
            world.player.score += SCORE_INVINCIBLE_PICKUP;
            collect(world, id, kind);
        }
        Kind::PowerupAmmo => {
            let p = &mut world.player;
            p.unlimited_ammo_timer = UNLIMITED_AMMO_SECONDS;
            p.ammo = p.max_ammo;
            p.score += SCORE_AMMO_PICKUP;
            collect(world, id, kind);
        }
        Kind::Goal => finish(world, Outcome::Win),
        Kind::Player | Kind::Ground | Kind::Fireball => {}
    }
}

fn hit_by_enemy(world: &mut World, enemy: EntityId) {
    if world.player.is_invincible() {
        return;
    }
    let enemy_x = match world.registry.get(enemy) {
        Some(b) => b.center().x,
        None => return,
    };
    let invincibility = world.tuning().invincibility_duration;

    let p = &mut world.player;
    p.health -= 1;
    let push = if p.pos.x < enemy_x { -1.0 } else { 1.0 };
    p.vel.y = KNOCKBACK_UP;
    p.vel.x = push * KNOCKBACK_SPEED;
    p.knockback_timer = KNOCKBACK_SECONDS;
    p.invincible_timer = invincibility;
    let health = p.health;

    world.emit(GameEvent::Damaged { health });
    check_defeat(world);
}

fn collect(world: &mut World, id: EntityId, kind: Kind) {
    world.despawn(id);
    world.emit(GameEvent::PowerupCollected { kind });
}

/// Destroys an enemy or obstacle the player touched under super-invincibility.
pub fn smash(world: &mut World, id: EntityId) {
    if let Some(entity) = world.despawn(id) {
        world.player.score += SCORE_SMASH;
        world.emit(GameEvent::Smashed {
            kind: entity.kind(),
        });
    }
}

/// Destroys an enemy hit by a fireball.
pub fn shoot_enemy(world: &mut World, id: EntityId) {
    if world.despawn(id).is_some() {
        world.player.score += SCORE_ENEMY_SHOT;
        world.emit(GameEvent::EnemyShot { enemy: id });
    }
}

/// Ends the run as a loss once health is gone.
pub fn check_defeat(world: &mut World) {
    if world.player.health <= 0 {
        finish(world, Outcome::Lose);
    }
}

pub fn finish(world: &mut World, outcome: Outcome) {
    if !world.player.finish(outcome) {
        return;
    }
    if outcome == Outcome::Win {
        world.player.score += SCORE_WIN_BONUS;
    }
    info!(
        "run finished: {:?} score={} time={:.1}s",
        outcome, world.player.score, world.player.elapsed
    );
    world.emit(GameEvent::Finished(outcome));
}

/// Start-of-frame clock: elapsed time and the two pickup buffs.
/// Ammo is refilled when the unlimited-ammo buff runs out.
pub fn tick_buffs(world: &mut World, dt: f64) {
    let p = &mut world.player;
    p.elapsed += dt;

    if p.super_timer > 0.0 {
        p.super_timer -= dt;
    }

    if p.unlimited_ammo_timer > 0.0 {
        p.unlimited_ammo_timer -= dt;
        if p.unlimited_ammo_timer <= 0.0 {
            p.ammo = p.max_ammo;
            let ammo = p.ammo;
            world.emit(GameEvent::AmmoRefilled { ammo });
        }
    }
}

/// End-of-frame countdown of the post-hit invincibility window.
pub fn tick_invincibility(world: &mut World, dt: f64) {
    let p = &mut world.player;
    if p.invincible_timer > 0.0 {
        p.invincible_timer = (p.invincible_timer - dt).max(0.0);
    }
}
