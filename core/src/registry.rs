use std::collections::BTreeMap;

use crate::types::{EntityId, Vec3};

/// Axis-aligned box. Corners and transform are always derived from
/// center and size together.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    center: Vec3,
    size: Vec3,
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Panics on a non-positive size: boxes are only built by the level
    /// generator and spawn code, which must never produce one.
    pub fn new(center: Vec3, size: Vec3) -> Self {
        assert!(
            size.x > 0.0 && size.y > 0.0 && size.z > 0.0,
            "box size must be positive, got {:?}",
            size
        );
        let half = size * 0.5;
        Self {
            center,
            size,
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Column-major translate·scale matrix (no rotation).
    pub fn transform(&self) -> [[f64; 4]; 4] {
        let (c, s) = (self.center, self.size);
        [
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [c.x, c.y, c.z, 1.0],
        ]
    }

    /// Inclusive on every axis: boxes sharing a face overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y
            || self.max.z < other.min.z
            || self.min.z > other.max.z)
    }
}

/// Owns every collidable box. Unknown ids are tolerated everywhere:
/// an entity destroyed earlier in the frame may still be updated or queried.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    boxes: BTreeMap<EntityId, Aabb>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, position: Vec3, size: Vec3) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.boxes.insert(id, Aabb::new(position, size));
        id
    }

    pub fn update(&mut self, id: EntityId, position: Vec3, size: Vec3) {
        if let Some(b) = self.boxes.get_mut(&id) {
            *b = Aabb::new(position, size);
        }
    }

    pub fn remove(&mut self, id: EntityId) {
        self.boxes.remove(&id);
    }

    pub fn get(&self, id: EntityId) -> Option<&Aabb> {
        self.boxes.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.boxes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Boxes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Aabb)> {
        self.boxes.iter().map(|(id, b)| (*id, b))
    }

    /// Every other box overlapping `id`'s box moved to `candidate`, in
    /// ascending id order. The order carries no priority.
    pub fn query_overlaps(&self, id: EntityId, candidate: Vec3) -> Vec<EntityId> {
        let Some(base) = self.boxes.get(&id) else {
            return Vec::new();
        };
        let probe = Aabb::new(candidate, base.size());
        self.boxes
            .iter()
            .filter(|(other, b)| **other != id && probe.overlaps(b))
            .map(|(other, _)| *other)
            .collect()
    }

    /// Whether a box at `position` would touch anything. The probe is never stored.
    pub fn region_occupied(&self, position: Vec3, size: Vec3) -> bool {
        let probe = Aabb::new(position, size);
        self.boxes.values().any(|b| probe.overlaps(b))
    }
}
