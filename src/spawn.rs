//! Time-driven creation of enemies and items.

use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Body, Enemy, EntityId, GameStatus, Item, ItemKind, World};
use crate::presenter::Presenter;

/// Fixed-cadence timer keyed on an explicit next-due timestamp.
///
/// It fires at most once per poll: if the caller stalls for several
/// intervals, one firing is reported and the schedule restarts from `now`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnTimer {
    interval: Duration,
    next_due: Duration,
}

impl SpawnTimer {
    pub fn new(interval: Duration, now: Duration) -> Self {
        SpawnTimer {
            interval,
            next_due: now + interval,
        }
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }

    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }

    pub fn restart(&mut self, now: Duration) {
        self.next_due = now + self.interval;
    }
}

/// Uniform position in `[0, span)`.
fn random_offset(rng: &mut impl Rng, span: f32) -> f32 {
    rng.gen::<f32>() * span
}

/// Drop a new enemy in just above the top edge, drifting left or right.
pub fn spawn_enemy(
    world: &mut World,
    config: &GameConfig,
    status: GameStatus,
    rng: &mut impl Rng,
    presenter: &mut impl Presenter,
) -> Option<EntityId> {
    if status == GameStatus::GameOver {
        return None;
    }
    let x = random_offset(rng, config.field_width - config.enemy_width);
    let speed_x = if rng.gen::<f32>() > 0.5 {
        config.enemy_speed_x
    } else {
        -config.enemy_speed_x
    };
    let enemy = Enemy {
        id: world.allocate_id(),
        x,
        y: -config.enemy_height,
        speed_x,
        speed_y: config.enemy_speed_y,
        width: config.enemy_width,
        height: config.enemy_height,
    };
    log::debug!("spawned enemy {:?} at x={:.1} speed_x={}", enemy.id, x, speed_x);
    presenter.render(enemy.id, enemy.kind(), enemy.bounds());
    let id = enemy.id;
    world.enemies.push(enemy);
    Some(id)
}

/// Drop a new power-up in just above the top edge.
pub fn spawn_item(
    world: &mut World,
    config: &GameConfig,
    status: GameStatus,
    rng: &mut impl Rng,
    presenter: &mut impl Presenter,
) -> Option<EntityId> {
    if status == GameStatus::GameOver {
        return None;
    }
    let x = random_offset(rng, config.field_width - config.item_width);
    let kind = if rng.gen::<f32>() < 0.5 {
        ItemKind::RapidFire
    } else {
        ItemKind::Shield
    };
    let item = Item {
        id: world.allocate_id(),
        x,
        y: -config.item_height,
        width: config.item_width,
        height: config.item_height,
        kind,
    };
    log::debug!("spawned {:?} item {:?} at x={:.1}", kind, item.id, x);
    presenter.render(item.id, item.kind(), item.bounds());
    let id = item.id;
    world.items.push(item);
    Some(id)
}
