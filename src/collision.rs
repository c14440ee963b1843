//! Pairwise collision checks between pools, and the special attack.
//!
//! The resolver runs once per tick after motion, in a fixed order:
//!
//! 1. items × player: pickups
//! 2. projectiles × enemies: kills, scoring and gauge fill
//! 3. enemy projectiles × player: shield or death
//! 4. enemies × player: shield or death
//!
//! Each pair scan walks both pools by descending index and stops comparing
//! an entity as soon as it has been removed, so nothing is consumed twice.

use std::time::Duration;

use crate::config::GameConfig;
use crate::entities::{Body, ItemKind, World};
use crate::geometry::overlaps;
use crate::power::PowerUps;
use crate::presenter::Presenter;

/// What happened during one resolver pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub pickups: Vec<ItemKind>,
    pub kills: u32,
    pub score_gained: u32,
    pub shields_consumed: u32,
    /// An unshielded hit landed on the player.
    pub lethal: bool,
}

pub fn resolve_collisions(
    world: &mut World,
    power: &mut PowerUps,
    now: Duration,
    config: &GameConfig,
    presenter: &mut impl Presenter,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    collect_items(world, power, now, config, presenter, &mut report);
    shoot_down_enemies(world, power, config, presenter, &mut report);
    hit_player_with_bullets(world, power, presenter, &mut report);
    ram_player_with_enemies(world, power, presenter, &mut report);
    report
}

fn collect_items(
    world: &mut World,
    power: &mut PowerUps,
    now: Duration,
    config: &GameConfig,
    presenter: &mut impl Presenter,
    report: &mut CollisionReport,
) {
    let player = world.player.bounds();
    for i in (0..world.items.len()).rev() {
        if overlaps(&world.items[i].bounds(), &player) {
            let item = world.items.remove(i);
            presenter.destroy(item.id);
            power.apply(item.kind, now, config.rapid_fire_duration());
            log::debug!("picked up {:?}", item.kind);
            report.pickups.push(item.kind);
        }
    }
}

fn shoot_down_enemies(
    world: &mut World,
    power: &mut PowerUps,
    config: &GameConfig,
    presenter: &mut impl Presenter,
    report: &mut CollisionReport,
) {
    for i in (0..world.projectiles.len()).rev() {
        let shot = world.projectiles[i].bounds();
        let hit = (0..world.enemies.len())
            .rev()
            .find(|&j| overlaps(&shot, &world.enemies[j].bounds()));

        if let Some(j) = hit {
            let projectile = world.projectiles.remove(i);
            let enemy = world.enemies.remove(j);
            presenter.destroy(projectile.id);
            presenter.destroy(enemy.id);
            power.gauge.fill(config.gauge_per_kill);
            report.kills += 1;
            report.score_gained = report.score_gained.saturating_add(config.kill_score);
            log::debug!("projectile {:?} destroyed enemy {:?}", projectile.id, enemy.id);
        }
    }
}

fn hit_player_with_bullets(
    world: &mut World,
    power: &mut PowerUps,
    presenter: &mut impl Presenter,
    report: &mut CollisionReport,
) {
    let player = world.player.bounds();
    for i in (0..world.enemy_projectiles.len()).rev() {
        if overlaps(&world.enemy_projectiles[i].bounds(), &player) {
            let bullet = world.enemy_projectiles.remove(i);
            presenter.destroy(bullet.id);
            take_hit(power, report);
        }
    }
}

fn ram_player_with_enemies(
    world: &mut World,
    power: &mut PowerUps,
    presenter: &mut impl Presenter,
    report: &mut CollisionReport,
) {
    let player = world.player.bounds();
    for i in (0..world.enemies.len()).rev() {
        if overlaps(&world.enemies[i].bounds(), &player) {
            let enemy = world.enemies.remove(i);
            presenter.destroy(enemy.id);
            take_hit(power, report);
        }
    }
}

fn take_hit(power: &mut PowerUps, report: &mut CollisionReport) {
    if power.absorb_hit() {
        log::debug!("shield absorbed a hit");
        report.shields_consumed += 1;
    } else {
        report.lethal = true;
    }
}

/// Wipe out every enemy on the field if the gauge is full.
///
/// Returns the number of enemies destroyed, or `None` when the gauge was
/// not ready (in which case nothing changes).  These kills never refill
/// the gauge.
pub fn special_attack(
    world: &mut World,
    power: &mut PowerUps,
    presenter: &mut impl Presenter,
) -> Option<u32> {
    if !power.gauge.consume() {
        return None;
    }
    let destroyed = world.enemies.len() as u32;
    for enemy in world.enemies.drain(..).rev() {
        presenter.destroy(enemy.id);
    }
    log::debug!("special attack destroyed {} enemies", destroyed);
    Some(destroyed)
}
