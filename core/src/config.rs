use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::level::{gap_bound, max_jump_distance};

/// Physics feel. Every field must be finite and positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub speed: f64,
    pub jump_force: f64,
    pub gravity: f64,
    /// Extra gravity while rising with jump released.
    pub low_jump_multiplier: f64,
    /// Extra gravity while falling.
    pub fall_gravity_multiplier: f64,
    pub air_speed_multiplier: f64,
    pub invincibility_duration: f64,
    pub fireball_speed: f64,
    pub coyote_time: f64,
    pub enemy_speed: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            jump_force: DEFAULT_JUMP_FORCE,
            gravity: DEFAULT_GRAVITY,
            low_jump_multiplier: DEFAULT_LOW_JUMP_MULTIPLIER,
            fall_gravity_multiplier: DEFAULT_FALL_GRAVITY_MULTIPLIER,
            air_speed_multiplier: DEFAULT_AIR_SPEED_MULTIPLIER,
            invincibility_duration: DEFAULT_INVINCIBILITY_SECONDS,
            fireball_speed: DEFAULT_FIREBALL_SPEED,
            coyote_time: DEFAULT_COYOTE_SECONDS,
            enemy_speed: DEFAULT_ENEMY_SPEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub seed: u32,
    pub segment_count: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            segment_count: DEFAULT_SEGMENT_COUNT,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub tuning: Tuning,
    pub level: LevelConfig,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tuning.{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("uphill gap bound {bound:.2} is below the minimum gap {min:.2}; raise speed or jump_force")]
    GapUnreachable { bound: f64, min: f64 },
    #[error("level.segment_count {count} exceeds the limit of {max}")]
    TooManySegments { count: u32, max: u32 },
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            level: LevelConfig {
                seed,
                ..LevelConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        let fields = [
            ("speed", t.speed),
            ("jump_force", t.jump_force),
            ("gravity", t.gravity),
            ("low_jump_multiplier", t.low_jump_multiplier),
            ("fall_gravity_multiplier", t.fall_gravity_multiplier),
            ("air_speed_multiplier", t.air_speed_multiplier),
            ("invincibility_duration", t.invincibility_duration),
            ("fireball_speed", t.fireball_speed),
            ("coyote_time", t.coyote_time),
            ("enemy_speed", t.enemy_speed),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        // Any positive rise takes the tightest bound.
        let bound = gap_bound(max_jump_distance(t), 1.0);
        if bound < MIN_GAP {
            return Err(ConfigError::GapUnreachable {
                bound,
                min: MIN_GAP,
            });
        }

        let count = self.level.segment_count;
        if count > MAX_SEGMENT_COUNT {
            return Err(ConfigError::TooManySegments {
                count,
                max: MAX_SEGMENT_COUNT,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_gravity() {
        let mut config = GameConfig::default();
        config.tuning.gravity = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "gravity",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_nan() {
        let mut config = GameConfig::default();
        config.tuning.speed = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "speed", .. })
        ));
    }

    #[test]
    fn rejects_short_jumps() {
        let mut config = GameConfig::default();
        config.tuning.speed = 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapUnreachable { .. })
        ));
    }

    #[test]
    fn rejects_huge_segment_count() {
        let config: GameConfig =
            serde_json::from_str(r#"{"level":{"segment_count":4294967295}}"#).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooManySegments {
                count: u32::MAX,
                max: MAX_SEGMENT_COUNT
            })
        );

        let mut config = GameConfig::default();
        config.level.segment_count = MAX_SEGMENT_COUNT;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"level":{"seed":7},"tuning":{"speed":9.0}}"#).unwrap();
        assert_eq!(config.level.seed, 7);
        assert_eq!(config.level.segment_count, DEFAULT_SEGMENT_COUNT);
        assert_eq!(config.tuning.speed, 9.0);
        assert_eq!(config.tuning.gravity, DEFAULT_GRAVITY);
    }
}
