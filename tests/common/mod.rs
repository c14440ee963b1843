#![allow(dead_code)]

use arcade_shooter::config::GameConfig;
use arcade_shooter::entities::{EntityId, EntityKind};
use arcade_shooter::geometry::Aabb;
use arcade_shooter::presenter::Presenter;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Default constants, but enemies never fire on their own.
pub fn quiet_config() -> GameConfig {
    GameConfig {
        enemy_fire_chance: 0.0,
        ..GameConfig::default()
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Render(EntityId, EntityKind),
    Destroy(EntityId),
    Move(EntityId, f32, f32),
    Score(u32),
    Gauge(u8, bool),
    Shield(bool),
    RapidFire(bool),
    GameOver,
    Reset,
}

/// Presenter that writes down every call it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
}

impl Recorder {
    pub fn has(&self, call: &Call) -> bool {
        self.calls.contains(call)
    }

    pub fn destroyed(&self) -> Vec<EntityId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Destroy(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for Recorder {
    fn render(&mut self, id: EntityId, kind: EntityKind, _bounds: Aabb) {
        self.calls.push(Call::Render(id, kind));
    }
    fn destroy(&mut self, id: EntityId) {
        self.calls.push(Call::Destroy(id));
    }
    fn set_position(&mut self, id: EntityId, x: f32, y: f32) {
        self.calls.push(Call::Move(id, x, y));
    }
    fn score_changed(&mut self, score: u32) {
        self.calls.push(Call::Score(score));
    }
    fn gauge_changed(&mut self, percent: u8, ready: bool) {
        self.calls.push(Call::Gauge(percent, ready));
    }
    fn shield_changed(&mut self, active: bool) {
        self.calls.push(Call::Shield(active));
    }
    fn rapid_fire_changed(&mut self, active: bool) {
        self.calls.push(Call::RapidFire(active));
    }
    fn game_over(&mut self) {
        self.calls.push(Call::GameOver);
    }
    fn reset(&mut self) {
        self.calls.push(Call::Reset);
    }
}
