//! Tunable game constants.
//!
//! Every number the core uses lives in [`GameConfig`].  A JSON file may
//! override any subset of the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} ({size}) does not fit inside the field ({field})")]
    DoesNotFit {
        name: &'static str,
        size: f32,
        field: f32,
    },

    #[error("enemy_fire_chance must be within [0, 1], got {0}")]
    Probability(f32),

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("gauge_max must be greater than zero")]
    ZeroGauge,

    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f32,
    pub field_height: f32,

    pub player_width: f32,
    pub player_height: f32,
    /// Gap between the player's bottom edge and the field's bottom edge.
    pub player_bottom_margin: f32,
    pub player_speed: f32,

    pub projectile_width: f32,
    pub projectile_height: f32,
    pub projectile_speed: f32,

    pub enemy_projectile_width: f32,
    pub enemy_projectile_height: f32,
    pub enemy_projectile_speed: f32,

    pub enemy_width: f32,
    pub enemy_height: f32,
    /// Magnitude of the horizontal speed; the sign is picked at spawn.
    pub enemy_speed_x: f32,
    pub enemy_speed_y: f32,
    /// Per-enemy, per-tick probability of firing.
    pub enemy_fire_chance: f32,

    pub item_width: f32,
    pub item_height: f32,
    pub item_speed: f32,

    pub enemy_spawn_interval_ms: u64,
    pub item_spawn_interval_ms: u64,
    pub shoot_cooldown_ms: u64,
    pub rapid_fire_cooldown_ms: u64,
    pub rapid_fire_duration_ms: u64,

    pub kill_score: u32,
    pub gauge_per_kill: u32,
    pub gauge_max: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: 480.0,
            field_height: 640.0,

            player_width: 50.0,
            player_height: 50.0,
            player_bottom_margin: 10.0,
            player_speed: 10.0,

            projectile_width: 10.0,
            projectile_height: 20.0,
            projectile_speed: 15.0,

            enemy_projectile_width: 10.0,
            enemy_projectile_height: 20.0,
            enemy_projectile_speed: 7.0,

            enemy_width: 40.0,
            enemy_height: 40.0,
            enemy_speed_x: 2.0,
            enemy_speed_y: 2.0,
            enemy_fire_chance: 0.01,

            item_width: 30.0,
            item_height: 30.0,
            item_speed: 3.0,

            enemy_spawn_interval_ms: 1_000,
            item_spawn_interval_ms: 15_000,
            shoot_cooldown_ms: 200,
            rapid_fire_cooldown_ms: 50,
            rapid_fire_duration_ms: 10_000,

            kill_score: 10,
            gauge_per_kill: 20,
            gauge_max: 100,
        }
    }
}

impl GameConfig {
    /// Load a JSON config.  Keys absent from the file keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;

        let sized: [(&'static str, f32, f32); 5] = [
            ("player", self.player_width, self.player_height),
            ("projectile", self.projectile_width, self.projectile_height),
            (
                "enemy_projectile",
                self.enemy_projectile_width,
                self.enemy_projectile_height,
            ),
            ("enemy", self.enemy_width, self.enemy_height),
            ("item", self.item_width, self.item_height),
        ];
        for (name, width, height) in sized {
            positive(name, width)?;
            positive(name, height)?;
            if width > self.field_width {
                return Err(ConfigError::DoesNotFit {
                    name,
                    size: width,
                    field: self.field_width,
                });
            }
            if height > self.field_height {
                return Err(ConfigError::DoesNotFit {
                    name,
                    size: height,
                    field: self.field_height,
                });
            }
        }

        if !(self.player_bottom_margin >= 0.0)
            || self.player_height + self.player_bottom_margin > self.field_height
        {
            return Err(ConfigError::DoesNotFit {
                name: "player_bottom_margin",
                size: self.player_height + self.player_bottom_margin,
                field: self.field_height,
            });
        }

        positive("player_speed", self.player_speed)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("enemy_projectile_speed", self.enemy_projectile_speed)?;
        positive("enemy_speed_y", self.enemy_speed_y)?;
        positive("item_speed", self.item_speed)?;
        if !(self.enemy_speed_x >= 0.0) || !self.enemy_speed_x.is_finite() {
            return Err(ConfigError::NonPositive {
                name: "enemy_speed_x",
                value: self.enemy_speed_x,
            });
        }

        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return Err(ConfigError::Probability(self.enemy_fire_chance));
        }

        let intervals = [
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("item_spawn_interval_ms", self.item_spawn_interval_ms),
            ("shoot_cooldown_ms", self.shoot_cooldown_ms),
            ("rapid_fire_cooldown_ms", self.rapid_fire_cooldown_ms),
            ("rapid_fire_duration_ms", self.rapid_fire_duration_ms),
        ];
        for (name, ms) in intervals {
            if ms == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }

        if self.gauge_max == 0 {
            return Err(ConfigError::ZeroGauge);
        }
        Ok(())
    }

    pub fn enemy_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.enemy_spawn_interval_ms)
    }

    pub fn item_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.item_spawn_interval_ms)
    }

    pub fn shoot_cooldown(&self) -> Duration {
        Duration::from_millis(self.shoot_cooldown_ms)
    }

    pub fn rapid_fire_cooldown(&self) -> Duration {
        Duration::from_millis(self.rapid_fire_cooldown_ms)
    }

    pub fn rapid_fire_duration(&self) -> Duration {
        Duration::from_millis(self.rapid_fire_duration_ms)
    }

    /// Top edge of the player, which never moves vertically.
    pub fn player_y(&self) -> f32 {
        self.field_height - self.player_height - self.player_bottom_margin
    }

    /// Horizontal start position: centred in the field.
    pub fn player_start_x(&self) -> f32 {
        (self.field_width - self.player_width) / 2.0
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
