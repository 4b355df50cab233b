pub mod config;
pub mod constants;
pub mod entities;
pub mod hash;
pub mod level;
pub mod physics;
pub mod prng;
pub mod projectiles;
pub mod registry;
pub mod rules;
pub mod step;
pub mod types;
pub mod world;

pub use config::{ConfigError, GameConfig, LevelConfig, Tuning};
pub use constants::*;
pub use entities::Entities;
pub use hash::*;
pub use level::{gap_bound, max_jump_distance, LevelLayout, Segment};
pub use registry::{Aabb, Registry};
pub use rules::process_hit;
pub use step::step;
pub use types::*;
pub use world::World;
