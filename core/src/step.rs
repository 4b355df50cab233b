use crate::physics::{update_enemies, update_player};
use crate::projectiles::update_fireballs;
use crate::rules::{tick_buffs, tick_invincibility};
use crate::types::*;
use crate::world::World;

/// Advance the world by one frame and return what happened in it.
///
/// Sub-step order:
///  0. Early return if the run is over
///  1. Clamp negative dt to zero
///  2. Tick elapsed time + buff timers (ammo refill on expiry)
///  3. Player: gravity, knockback, X then Y resolution, jump, fire, kill plane
///  4. Enemies: fall or patrol, touch damage
///  5. Fireballs: move, hit enemies/terrain, range cull
///  6. Tick post-hit invincibility
///
/// Once a sub-step ends the run, the remaining sub-steps are skipped.
pub fn step(world: &mut World, input: &FrameInput, dt: f64) -> Vec<GameEvent> {
    // 0. Nothing moves after the run is over
    if world.player.is_terminal() {
        return Vec::new();
    }

    // 1. Clock
    let dt = dt.max(0.0);

    // 2. Timers
    tick_buffs(world, dt);

    // 3. Player
    update_player(world, input, dt);

    // 4. Enemies
    if !world.player.is_terminal() {
        update_enemies(world, dt);
    }

    // 5. Fireballs
    if !world.player.is_terminal() {
        update_fireballs(world, dt);
    }

    // 6. Invincibility
    if !world.player.is_terminal() {
        tick_invincibility(world, dt);
    }

    world.take_events()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::constants::*;
    use crate::hash::hash_layout;

    const DT: f64 = FRAME_DT;

    fn run(world: &mut World, input: FrameInput, frames: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..frames {
            events.extend(step(world, &input, DT));
        }
        events
    }

    /// Player standing on a long floor whose top is y = 0.
    fn floor_world() -> World {
        let mut w = World::empty(GameConfig::default(), Vec3::new(0.0, 0.51, 0.0));
        w.spawn(
            Entity::Ground,
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::new(100.0, 10.0, 5.0),
        );
        run(&mut w, NULL_INPUT, 30);
        w
    }

    #[test]
    fn terminal_world_does_not_step() {
        let mut w = floor_world();
        w.player.finish(Outcome::Lose);
        let before = w.player;
        let events = step(
            &mut w,
            &FrameInput {
                axis: 1.0,
                fire_pressed: true,
                ..NULL_INPUT
            },
            DT,
        );
        assert!(events.is_empty());
        assert_eq!(w.player, before);
        assert!(w.entities.ids(Kind::Fireball).is_empty());
    }

    #[test]
    fn negative_dt_is_a_pause() {
        let mut w = floor_world();
        let before = w.player;
        step(&mut w, &FrameInput { axis: 1.0, ..NULL_INPUT }, -0.5);
        assert_eq!(w.player.pos, before.pos);
        assert_eq!(w.player.elapsed, before.elapsed);
    }

    #[test]
    fn idle_player_settles_on_safe_platform() {
        let mut w = World::generate(GameConfig::with_seed(42)).unwrap();
        run(&mut w, NULL_INPUT, 600);
        assert_eq!(w.player.status, Status::Alive);
        assert!(w.player.grounded);
        let bottom = w.player.pos.y - PLAYER_SIZE / 2.0;
        assert!(bottom >= SAFE_TOP_Y && bottom < SAFE_TOP_Y + 0.1);
        assert!((w.player.elapsed - 10.0).abs() < 1e-6);
    }

    #[test]
    fn replays_are_deterministic() {
        let script: Vec<FrameInput> = (0..900)
            .map(|i| FrameInput {
                axis: if i % 200 < 150 { 1.0 } else { -0.5 },
                jump_pressed: i % 45 == 0,
                jump_held: i % 45 < 20,
                fire_pressed: i % 30 == 0,
            })
            .collect();

        let play = || {
            let mut w = World::generate(GameConfig::with_seed(9)).unwrap();
            let mut events = Vec::new();
            for input in &script {
                events.extend(step(&mut w, input, DT));
            }
            (w, events)
        };
        let (a, ea) = play();
        let (b, eb) = play();
        assert_eq!(hash_layout(&a), hash_layout(&b));
        assert_eq!(a.player, b.player);
        assert_eq!(ea, eb);
    }

    #[test]
    fn reaching_goal_wins() {
        let mut w = floor_world();
        let goal = w.spawn(Entity::Goal, Vec3::new(4.0, 2.0, 0.0), Vec3::new(2.0, 4.0, 2.0));
        let events = run(&mut w, FrameInput { axis: 1.0, ..NULL_INPUT }, 60);

        assert_eq!(w.player.status, Status::Terminal(Outcome::Win));
        assert_eq!(w.player.score, SCORE_WIN_BONUS);
        assert_eq!(events, vec![GameEvent::Finished(Outcome::Win)]);
        assert!(w.registry.contains(goal));
        assert!(w.player.pos.x < 4.0);
    }

    #[test]
    fn falling_off_the_world_loses() {
        let mut w = World::empty(GameConfig::default(), Vec3::new(0.0, -19.95, 0.0));
        w.player.vel.y = -10.0;
        let events = step(&mut w, &NULL_INPUT, DT);
        assert_eq!(w.player.health, 0);
        assert_eq!(w.player.outcome(), Some(Outcome::Lose));
        assert_eq!(events, vec![GameEvent::Finished(Outcome::Lose)]);
        assert!(step(&mut w, &NULL_INPUT, DT).is_empty());
    }

    #[test]
    fn firing_three_times() {
        let mut w = floor_world();
        let fire = FrameInput {
            fire_pressed: true,
            ..NULL_INPUT
        };
        let mut fired = 0;
        for _ in 0..3 {
            fired += step(&mut w, &fire, DT)
                .iter()
                .filter(|e| matches!(e, GameEvent::FireballFired { empowered: false, .. }))
                .count();
        }
        assert_eq!(fired, 3);
        assert_eq!(w.player.ammo, MAX_AMMO - 3);
        assert_eq!(w.entities.ids(Kind::Fireball).len(), 3);
    }

    #[test]
    fn shooting_an_enemy_scores() {
        let mut w = floor_world();
        let y = w.player.pos.y;
        let enemy = w.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(6.0, y, 0.0), Vec3::ONE);
        step(&mut w, &FrameInput { fire_pressed: true, ..NULL_INPUT }, DT);
        let events = run(&mut w, NULL_INPUT, 30);

        assert_eq!(w.kind_of(enemy), None);
        assert_eq!(w.player.score, SCORE_ENEMY_SHOT);
        assert!(events.contains(&GameEvent::EnemyShot { enemy }));
        assert!(w.entities.ids(Kind::Fireball).is_empty());
    }

    #[test]
    fn invincibility_wears_off() {
        let mut w = floor_world();
        w.player.invincible_timer = 0.05;
        run(&mut w, NULL_INPUT, 4);
        assert_eq!(w.player.invincible_timer, 0.0);
        assert!(!w.player.is_invincible());
    }

    #[test]
    fn unlimited_ammo_runs_out_with_full_refill() {
        let mut w = floor_world();
        w.player.ammo = 1;
        w.player.unlimited_ammo_timer = 0.5;
        let events = run(
            &mut w,
            FrameInput {
                fire_pressed: true,
                ..NULL_INPUT
            },
            10,
        );
        assert_eq!(w.player.ammo, 1);
        assert!(events
            .iter()
            .all(|e| !matches!(e, GameEvent::FireballFired { empowered: false, .. })));

        let events = run(&mut w, NULL_INPUT, 30);
        assert_eq!(w.player.ammo, MAX_AMMO);
        assert!(events.contains(&GameEvent::AmmoRefilled { ammo: MAX_AMMO }));
    }
}
