use log::debug;

use crate::config::{ConfigError, GameConfig, Tuning};
use crate::constants::*;
use crate::entities::Entities;
use crate::level::{generate_level, LevelLayout};
use crate::registry::Registry;
use crate::types::*;

/// Everything one level run owns. Physics and rules take it by `&mut`;
/// rendering and presentation only read it.
#[derive(Clone, Debug)]
pub struct World {
    pub config: GameConfig,
    pub registry: Registry,
    pub entities: Entities,
    pub player: PlayerState,
    pub layout: LevelLayout,
    pub(crate) events: Vec<GameEvent>,
}

/// Fresh player at `pos` with full health and ammo.
pub fn new_player(id: EntityId, pos: Vec3) -> PlayerState {
    PlayerState {
        id,
        pos,
        vel: Vec3::ZERO,
        facing: facing::RIGHT,
        grounded: false,
        coyote_timer: 0.0,
        knockback_timer: 0.0,
        health: MAX_HEALTH,
        max_health: MAX_HEALTH,
        ammo: MAX_AMMO,
        max_ammo: MAX_AMMO,
        score: 0,
        elapsed: 0.0,
        invincible_timer: 0.0,
        super_timer: 0.0,
        unlimited_ammo_timer: 0.0,
        status: Status::Alive,
    }
}

impl World {
    /// Validates `config` and builds a new procedural level from its seed.
    /// Restarting a level is calling this again.
    pub fn generate(config: GameConfig) -> Result<World, ConfigError> {
        config.validate()?;
        Ok(generate_level(config))
    }

    /// A world holding only the player, for hand-built scenarios.
    pub fn empty(config: GameConfig, player_pos: Vec3) -> World {
        let mut registry = Registry::new();
        let mut entities = Entities::new();
        let id = registry.add(player_pos, Vec3::splat(PLAYER_SIZE));
        entities.classify(id, Entity::Player);
        World::from_parts(
            config,
            registry,
            entities,
            new_player(id, player_pos),
            LevelLayout::default(),
        )
    }

    pub(crate) fn from_parts(
        config: GameConfig,
        registry: Registry,
        entities: Entities,
        player: PlayerState,
        layout: LevelLayout,
    ) -> World {
        World {
            config,
            registry,
            entities,
            player,
            layout,
            events: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &Tuning {
        &self.config.tuning
    }

    pub fn spawn(&mut self, entity: Entity, pos: Vec3, size: Vec3) -> EntityId {
        let id = self.registry.add(pos, size);
        self.entities.classify(id, entity);
        id
    }

    /// Drops `id` from the classification and the registry together.
    /// Stale ids are ignored.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.declassify(id);
        self.registry.remove(id);
        if let Some(e) = &entity {
            debug!("despawned {:?} {:?}", id, e.kind());
        }
        entity
    }

    pub fn kind_of(&self, id: EntityId) -> Option<Kind> {
        self.entities.kind_of(id)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        let p = &self.player;
        Hud {
            health: p.health,
            max_health: p.max_health,
            ammo: p.ammo,
            max_ammo: p.max_ammo,
            score: p.score,
            elapsed: p.elapsed,
            super_remaining: p.super_timer.max(0.0),
            unlimited_ammo_remaining: p.unlimited_ammo_timer.max(0.0),
            outcome: p.outcome(),
        }
    }

    /// Live boxes in draw order: terrain, enemies, obstacles, fireballs,
    /// powerups, player, goal.
    pub fn render_items(&self) -> Vec<RenderItem> {
        const LISTED: [Kind; 7] = [
            Kind::Ground,
            Kind::Enemy,
            Kind::Obstacle,
            Kind::Fireball,
            Kind::PowerupHp,
            Kind::PowerupInvincible,
            Kind::PowerupAmmo,
        ];

        let player_visual = if self.player.has_super() {
            Visual::Rainbow
        } else if self.player.is_invincible() {
            Visual::Translucent
        } else {
            Visual::Plain
        };

        let listed = LISTED
            .iter()
            .flat_map(|kind| self.entities.ids(*kind).iter().map(|id| (*id, *kind, Visual::Plain)));
        let singles = [
            self.entities.player().map(|id| (id, Kind::Player, player_visual)),
            self.entities.goal().map(|id| (id, Kind::Goal, Visual::Plain)),
        ];

        listed
            .chain(singles.into_iter().flatten())
            .filter_map(|(id, kind, visual)| {
                let b = self.registry.get(id)?;
                Some(RenderItem {
                    id,
                    kind,
                    position: b.center(),
                    size: b.size(),
                    transform: b.transform(),
                    visual,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_world_has_only_player() {
        let world = World::empty(GameConfig::default(), Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(world.registry.len(), 1);
        assert_eq!(world.entities.player(), Some(world.player.id));
        assert_eq!(world.kind_of(world.player.id), Some(Kind::Player));
        assert_eq!(world.player.health, MAX_HEALTH);
        assert_eq!(world.player.ammo, MAX_AMMO);
    }

    #[test]
    fn despawn_clears_registry_and_classification() {
        let mut world = World::empty(GameConfig::default(), Vec3::ZERO);
        let enemy = world.spawn(Entity::Enemy { dir: 1.0 }, Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        assert_eq!(world.entities.ids(Kind::Enemy), &[enemy]);

        assert_eq!(world.despawn(enemy), Some(Entity::Enemy { dir: 1.0 }));
        assert!(!world.registry.contains(enemy));
        assert_eq!(world.kind_of(enemy), None);
        assert!(world.entities.ids(Kind::Enemy).is_empty());
        assert_eq!(world.despawn(enemy), None);
    }

    #[test]
    fn render_items_follow_draw_order_and_visual() {
        let mut world = World::empty(GameConfig::default(), Vec3::ZERO);
        let goal = world.spawn(Entity::Goal, Vec3::new(9.0, 0.0, 0.0), Vec3::ONE);
        let ground = world.spawn(
            Entity::Ground,
            Vec3::new(0.0, -5.0, 0.0),
            Vec3::new(10.0, 9.0, 5.0),
        );
        world.player.super_timer = 1.0;

        let items = world.render_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id, ground);
        assert_eq!(items[1].kind, Kind::Player);
        assert_eq!(items[1].visual, Visual::Rainbow);
        assert_eq!(items[2].id, goal);

        world.player.super_timer = 0.0;
        world.player.invincible_timer = 0.5;
        assert_eq!(world.render_items()[1].visual, Visual::Translucent);
    }

    #[test]
    fn hud_reflects_player() {
        let mut world = World::empty(GameConfig::default(), Vec3::ZERO);
        world.player.score = 75;
        world.player.ammo = 4;
        world.player.unlimited_ammo_timer = -0.1;
        let hud = world.hud();
        assert_eq!(hud.score, 75);
        assert_eq!(hud.ammo, 4);
        assert_eq!(hud.unlimited_ammo_remaining, 0.0);
        assert_eq!(hud.outcome, None);
    }
}
