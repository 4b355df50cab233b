use sha2::{Digest, Sha256};

use crate::types::FrameInput;
use crate::world::World;

/// SHA-256 over every classified box: id, kind, center and size, in id order.
pub fn hash_layout(world: &World) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for (id, entity) in world.entities.iter() {
        let Some(b) = world.registry.get(id) else {
            continue;
        };
        hasher.update(id.raw().to_le_bytes());
        hasher.update([entity.kind() as u8]);
        for v in [b.center(), b.size()] {
            hasher.update(v.x.to_le_bytes());
            hasher.update(v.y.to_le_bytes());
            hasher.update(v.z.to_le_bytes());
        }
    }
    hasher.finalize().into()
}

/// SHA-256 of a full input replay.
pub fn hash_replay(frames: &[FrameInput]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for input in frames {
        hasher.update(input.axis.to_le_bytes());
        hasher.update([
            input.jump_pressed as u8,
            input.jump_held as u8,
            input.fire_pressed as u8,
        ]);
    }
    hasher.finalize().into()
}
