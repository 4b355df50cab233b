use crate::constants::*;
use crate::rules;
use crate::types::*;
use crate::world::World;

/// Fire from the player's facing side. Needs ammo unless the unlimited-ammo
/// buff is active, in which case the shot is empowered and free.
pub fn fire(world: &mut World) -> Option<EntityId> {
    let p = &world.player;
    let empowered = p.has_unlimited_ammo();
    if !empowered && p.ammo <= 0 {
        return None;
    }

    let dir = p.facing;
    let origin = p.pos + Vec3::new(dir * FIREBALL_SPAWN_AHEAD, FIREBALL_SPAWN_RISE, 0.0);
    if !empowered {
        world.player.ammo -= 1;
    }

    let id = spawn_fireball(world, origin, dir, empowered);
    world.emit(GameEvent::FireballFired { id, empowered });
    Some(id)
}

pub fn spawn_fireball(world: &mut World, origin: Vec3, dir: f64, empowered: bool) -> EntityId {
    let size = if empowered {
        EMPOWERED_FIREBALL_SIZE
    } else {
        FIREBALL_SIZE
    };
    world.spawn(
        Entity::Fireball { dir, empowered },
        origin,
        Vec3::splat(size),
    )
}

/// Enemies resolve before terrain. Other kinds don't stop fireballs.
fn fireball_hit_rank(kind: Kind) -> Option<u8> {
    match kind {
        Kind::Enemy => Some(0),
        Kind::Ground | Kind::Obstacle => Some(1),
        _ => None,
    }
}

/// Move every fireball, then resolve its hits at the new position.
/// - Enemies are destroyed for points
/// - A normal fireball is consumed by its first enemy or terrain hit
/// - Empowered fireballs pierce everything
/// - Fireballs too far from the player are dropped
pub fn update_fireballs(world: &mut World, dt: f64) {
    let speed = world.tuning().fireball_speed;
    let ids = world.entities.ids(Kind::Fireball).to_vec();

    for id in ids {
        if world.player.is_terminal() {
            break;
        }
        let Some(Entity::Fireball { dir, empowered }) = world.entities.get(id).copied() else {
            continue;
        };
        let Some(b) = world.registry.get(id).copied() else {
            continue;
        };

        let speed = if empowered {
            speed * EMPOWERED_SPEED_MULTIPLIER
        } else {
            speed
        };
        let next = b.center() + Vec3::new(dir * speed * dt, 0.0, 0.0);
        world.registry.update(id, next, b.size());

        let player = world.player.id;
        let mut hits: Vec<(u8, EntityId, Kind)> = world
            .registry
            .query_overlaps(id, next)
            .into_iter()
            .filter(|hit| *hit != player)
            .filter_map(|hit| {
                let kind = world.kind_of(hit)?;
                Some((fireball_hit_rank(kind)?, hit, kind))
            })
            .collect();
        hits.sort_by_key(|(rank, hit, _)| (*rank, *hit));

        let mut consumed = false;
        for (_, hit, kind) in hits {
            if kind == Kind::Enemy {
                rules::shoot_enemy(world, hit);
            }
            if !empowered {
                consumed = true;
                break;
            }
        }

        if consumed || next.distance(world.player.pos) > FIREBALL_MAX_RANGE {
            world.despawn(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn world() -> World {
        World::empty(GameConfig::default(), Vec3::new(0.0, 1.0, 0.0))
    }

    fn fireball_x(w: &World, id: EntityId) -> f64 {
        w.registry.get(id).unwrap().center().x
    }

    #[test]
    fn fire_spends_ammo() {
        let mut w = world();
        for _ in 0..3 {
            assert!(fire(&mut w).is_some());
        }
        assert_eq!(w.player.ammo, MAX_AMMO - 3);
        assert_eq!(w.entities.ids(Kind::Fireball).len(), 3);

        let id = w.entities.ids(Kind::Fireball)[0];
        let b = w.registry.get(id).unwrap();
        assert_eq!(b.center(), Vec3::new(FIREBALL_SPAWN_AHEAD, 1.0 + FIREBALL_SPAWN_RISE, 0.0));
        assert_eq!(b.size(), Vec3::splat(FIREBALL_SIZE));
    }

    #[test]
    fn no_ammo_no_fire() {
        let mut w = world();
        w.player.ammo = 0;
        assert_eq!(fire(&mut w), None);
        assert!(w.entities.ids(Kind::Fireball).is_empty());
        assert!(w.take_events().is_empty());
    }

    #[test]
    fn unlimited_ammo_fires_empowered_for_free() {
        let mut w = world();
        w.player.ammo = 0;
        w.player.unlimited_ammo_timer = 2.0;
        w.player.facing = facing::LEFT;
        let id = fire(&mut w).unwrap();
        assert_eq!(w.player.ammo, 0);
        assert_eq!(
            w.entities.get(id),
            Some(&Entity::Fireball {
                dir: facing::LEFT,
                empowered: true
            })
        );
        assert_eq!(w.registry.get(id).unwrap().size(), Vec3::splat(EMPOWERED_FIREBALL_SIZE));
        assert_eq!(
            w.take_events(),
            vec![GameEvent::FireballFired { id, empowered: true }]
        );
    }

    #[test]
    fn fireball_moves_before_hit_test() {
        let mut w = world();
        let fb = spawn_fireball(&mut w, Vec3::new(2.0, 1.0, 0.0), 1.0, false);
        // touches only after this frame's move
        let enemy = w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(2.9, 1.0, 0.0), Vec3::ONE);

        update_fireballs(&mut w, 0.02);
        assert_eq!(w.kind_of(enemy), None);
        assert_eq!(w.kind_of(fb), None);
        assert_eq!(w.player.score, SCORE_ENEMY_SHOT);
        assert_eq!(w.take_events(), vec![GameEvent::EnemyShot { enemy }]);
    }

    #[test]
    fn normal_fireball_stops_at_first_enemy() {
        let mut w = world();
        let fb = spawn_fireball(&mut w, Vec3::new(3.0, 1.0, 0.0), 1.0, false);
        let a = w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(3.2, 1.0, 0.0), Vec3::ONE);
        let b = w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(3.4, 1.0, 0.0), Vec3::ONE);

        update_fireballs(&mut w, FRAME_DT);
        assert_eq!(w.kind_of(a), None);
        assert_eq!(w.kind_of(b), Some(Kind::Enemy));
        assert_eq!(w.kind_of(fb), None);
        assert_eq!(w.player.score, SCORE_ENEMY_SHOT);
    }

    #[test]
    fn empowered_fireball_pierces() {
        let mut w = world();
        let fb = spawn_fireball(&mut w, Vec3::new(3.0, 1.0, 0.0), 1.0, true);
        w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(3.2, 1.0, 0.0), Vec3::ONE);
        w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(3.4, 1.0, 0.0), Vec3::ONE);
        w.spawn(Entity::Ground, Vec3::new(3.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 2.0));

        update_fireballs(&mut w, FRAME_DT);
        assert!(w.entities.ids(Kind::Enemy).is_empty());
        assert_eq!(w.player.score, 2 * SCORE_ENEMY_SHOT);
        assert_eq!(w.kind_of(fb), Some(Kind::Fireball));

        let expected = 3.0 + DEFAULT_FIREBALL_SPEED * EMPOWERED_SPEED_MULTIPLIER * FRAME_DT;
        assert!((fireball_x(&w, fb) - expected).abs() < 1e-9);
    }

    #[test]
    fn empowered_fireball_clears_enemies_down_the_lane() {
        let mut w = world();
        w.player.unlimited_ammo_timer = 5.0;
        let fb = fire(&mut w).unwrap();
        w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(5.0, 1.0, 0.0), Vec3::ONE);
        w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(10.0, 1.0, 0.0), Vec3::ONE);

        for _ in 0..30 {
            update_fireballs(&mut w, FRAME_DT);
        }
        assert!(w.entities.ids(Kind::Enemy).is_empty());
        assert_eq!(w.player.score, 2 * SCORE_ENEMY_SHOT);
        assert_eq!(w.kind_of(fb), Some(Kind::Fireball));
        assert!(fireball_x(&w, fb) > 10.0);
    }

    #[test]
    fn terrain_consumes_normal_fireball() {
        let mut w = world();
        let fb = spawn_fireball(&mut w, Vec3::new(-3.0, 1.0, 0.0), -1.0, false);
        let wall = w.spawn(Entity::Obstacle, Vec3::new(-3.5, 1.0, 0.0), Vec3::ONE);

        update_fireballs(&mut w, FRAME_DT);
        assert_eq!(w.kind_of(fb), None);
        assert_eq!(w.kind_of(wall), Some(Kind::Obstacle));
        assert_eq!(w.player.score, 0);
    }

    #[test]
    fn fireball_ignores_player_and_pickups() {
        let mut w = world();
        let fb = spawn_fireball(&mut w, Vec3::new(0.2, 1.0, 0.0), 1.0, false);
        let pickup = w.spawn(Entity::PowerupHp, Vec3::new(0.6, 1.0, 0.0), Vec3::splat(0.5));

        update_fireballs(&mut w, FRAME_DT);
        assert_eq!(w.kind_of(fb), Some(Kind::Fireball));
        assert_eq!(w.kind_of(pickup), Some(Kind::PowerupHp));
    }

    #[test]
    fn fireball_dropped_out_of_range() {
        let mut w = world();
        let fb = spawn_fireball(&mut w, Vec3::new(FIREBALL_MAX_RANGE - 0.1, 1.0, 0.0), 1.0, false);
        update_fireballs(&mut w, FRAME_DT);
        assert_eq!(w.kind_of(fb), None);
        assert!(!w.registry.contains(fb));
    }
}
