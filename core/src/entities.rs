use std::collections::BTreeMap;

use crate::types::{Entity, EntityId, Kind};

/// Id → entity classification plus ordered per-kind membership lists.
///
/// Kind-specific state lives inside `Entity`, so declassifying an id drops
/// everything the classification knew about it in one step.
#[derive(Clone, Debug, Default)]
pub struct Entities {
    map: BTreeMap<EntityId, Entity>,
    grounds: Vec<EntityId>,
    enemies: Vec<EntityId>,
    obstacles: Vec<EntityId>,
    fireballs: Vec<EntityId>,
    hp_powerups: Vec<EntityId>,
    invincible_powerups: Vec<EntityId>,
    ammo_powerups: Vec<EntityId>,
    player: Option<EntityId>,
    goal: Option<EntityId>,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&mut self, id: EntityId, entity: Entity) {
        debug_assert!(
            !self.map.contains_key(&id),
            "{:?} classified twice",
            id
        );
        let kind = entity.kind();
        self.map.insert(id, entity);
        match kind {
            Kind::Player => self.player = Some(id),
            Kind::Goal => self.goal = Some(id),
            _ => {
                if let Some(list) = self.list_mut(kind) {
                    list.push(id);
                }
            }
        }
    }

    /// Removes `id` from the map and its list. Returns what it was, if anything.
    pub fn declassify(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.map.remove(&id)?;
        let kind = entity.kind();
        match kind {
            Kind::Player => self.player = None,
            Kind::Goal => self.goal = None,
            _ => {
                if let Some(list) = self.list_mut(kind) {
                    list.retain(|other| *other != id);
                }
            }
        }
        Some(entity)
    }

    pub fn kind_of(&self, id: EntityId) -> Option<Kind> {
        self.map.get(&id).map(Entity::kind)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.map.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.map.get_mut(&id)
    }

    /// Ordered ids of an iterable kind. Player and Goal have no list.
    pub fn ids(&self, kind: Kind) -> &[EntityId] {
        match kind {
            Kind::Ground => &self.grounds,
            Kind::Enemy => &self.enemies,
            Kind::Obstacle => &self.obstacles,
            Kind::Fireball => &self.fireballs,
            Kind::PowerupHp => &self.hp_powerups,
            Kind::PowerupInvincible => &self.invincible_powerups,
            Kind::PowerupAmmo => &self.ammo_powerups,
            Kind::Player | Kind::Goal => &[],
        }
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn goal(&self) -> Option<EntityId> {
        self.goal
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.map.iter().map(|(id, e)| (*id, e))
    }

    fn list_mut(&mut self, kind: Kind) -> Option<&mut Vec<EntityId>> {
        match kind {
            Kind::Ground => Some(&mut self.grounds),
            Kind::Enemy => Some(&mut self.enemies),
            Kind::Obstacle => Some(&mut self.obstacles),
            Kind::Fireball => Some(&mut self.fireballs),
            Kind::PowerupHp => Some(&mut self.hp_powerups),
            Kind::PowerupInvincible => Some(&mut self.invincible_powerups),
            Kind::PowerupAmmo => Some(&mut self.ammo_powerups),
            Kind::Player | Kind::Goal => None,
        }
    }
}
