mod common;

use std::time::Duration;

use arcade_shooter::collision::*;
use arcade_shooter::config::GameConfig;
use arcade_shooter::entities::*;
use arcade_shooter::power::PowerUps;
use arcade_shooter::presenter::NullPresenter;

use common::Recorder;

// Default player box: (215, 580) - (265, 630)

const NOW: Duration = Duration::from_secs(3);

fn setup() -> (GameConfig, World, PowerUps) {
    let config = GameConfig::default();
    let world = World::new(&config);
    let power = PowerUps::new(config.gauge_max);
    (config, world, power)
}

fn add_enemy(world: &mut World, x: f32, y: f32) -> EntityId {
    let id = world.allocate_id();
    world.enemies.push(Enemy {
        id,
        x,
        y,
        speed_x: 2.0,
        speed_y: 2.0,
        width: 40.0,
        height: 40.0,
    });
    id
}

fn add_projectile(world: &mut World, x: f32, y: f32) -> EntityId {
    let id = world.allocate_id();
    world.projectiles.push(Projectile {
        id,
        x,
        y,
        width: 10.0,
        height: 20.0,
    });
    id
}

fn add_enemy_projectile(world: &mut World, x: f32, y: f32) -> EntityId {
    let id = world.allocate_id();
    world.enemy_projectiles.push(EnemyProjectile {
        id,
        x,
        y,
        width: 10.0,
        height: 20.0,
    });
    id
}

fn add_item(world: &mut World, x: f32, y: f32, kind: ItemKind) -> EntityId {
    let id = world.allocate_id();
    world.items.push(Item {
        id,
        x,
        y,
        width: 30.0,
        height: 30.0,
        kind,
    });
    id
}

// ── Projectile × Enemy ────────────────────────────────────────────────────────

#[test]
fn projectile_kills_enemy() {
    let (config, mut world, mut power) = setup();
    let shot = add_projectile(&mut world, 50.0, 10.0);
    let enemy = add_enemy(&mut world, 45.0, 5.0);
    let mut rec = Recorder::default();

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut rec);

    assert!(world.projectiles.is_empty());
    assert!(world.enemies.is_empty());
    assert_eq!(report.kills, 1);
    assert_eq!(report.score_gained, 10);
    assert_eq!(power.gauge.value(), 20);
    assert!(!report.lethal);
    let destroyed = rec.destroyed();
    assert!(destroyed.contains(&shot));
    assert!(destroyed.contains(&enemy));
}

#[test]
fn touching_projectile_still_hits() {
    let (config, mut world, mut power) = setup();
    // Projectile right edge at x = 45 == enemy left edge
    add_projectile(&mut world, 35.0, 10.0);
    add_enemy(&mut world, 45.0, 5.0);
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 1);
}

#[test]
fn projectile_misses_distant_enemy() {
    let (config, mut world, mut power) = setup();
    add_projectile(&mut world, 300.0, 10.0);
    add_enemy(&mut world, 45.0, 5.0);
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 0);
    assert_eq!(world.projectiles.len(), 1);
    assert_eq!(world.enemies.len(), 1);
    assert_eq!(power.gauge.value(), 0);
}

#[test]
fn one_projectile_consumes_at_most_one_enemy() {
    let (config, mut world, mut power) = setup();
    add_projectile(&mut world, 100.0, 100.0);
    // Two stacked enemies both covering the projectile
    add_enemy(&mut world, 90.0, 90.0);
    add_enemy(&mut world, 95.0, 95.0);

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 1);
    assert_eq!(world.enemies.len(), 1);
    assert!(world.projectiles.is_empty());
    assert_eq!(power.gauge.value(), 20);
}

#[test]
fn one_enemy_consumes_at_most_one_projectile() {
    let (config, mut world, mut power) = setup();
    add_projectile(&mut world, 100.0, 100.0);
    add_projectile(&mut world, 105.0, 100.0);
    add_enemy(&mut world, 90.0, 90.0);

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 1);
    assert_eq!(world.projectiles.len(), 1);
    assert!(world.enemies.is_empty());
}

#[test]
fn several_independent_kills_in_one_pass() {
    let (config, mut world, mut power) = setup();
    for i in 0..3 {
        let x = 20.0 + 100.0 * i as f32;
        add_projectile(&mut world, x + 10.0, 110.0);
        add_enemy(&mut world, x, 100.0);
    }
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 3);
    assert_eq!(report.score_gained, 30);
    assert_eq!(power.gauge.value(), 60);
}

#[test]
fn kill_score_saturates_instead_of_overflowing() {
    let (mut config, mut world, mut power) = setup();
    config.kill_score = u32::MAX;
    for i in 0..2 {
        let x = 20.0 + 100.0 * i as f32;
        add_projectile(&mut world, x + 10.0, 110.0);
        add_enemy(&mut world, x, 100.0);
    }
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 2);
    assert_eq!(report.score_gained, u32::MAX);
}

#[test]
fn gauge_stops_at_max() {
    let (config, mut world, mut power) = setup();
    for i in 0..7 {
        let x = 5.0 + 60.0 * i as f32;
        add_projectile(&mut world, x + 10.0, 110.0);
        add_enemy(&mut world, x, 100.0);
    }
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 7);
    assert_eq!(power.gauge.value(), 100);
    assert!(power.gauge.is_ready());
}

// ── Item × Player ─────────────────────────────────────────────────────────────

#[test]
fn picking_up_rapid_fire() {
    let (config, mut world, mut power) = setup();
    let id = add_item(&mut world, 220.0, 570.0, ItemKind::RapidFire);
    let mut rec = Recorder::default();

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut rec);
    assert!(world.items.is_empty());
    assert_eq!(report.pickups, vec![ItemKind::RapidFire]);
    assert_eq!(power.rapid_fire_until(), Some(NOW + Duration::from_secs(10)));
    assert_eq!(rec.destroyed(), vec![id]);
}

#[test]
fn picking_up_shield() {
    let (config, mut world, mut power) = setup();
    add_item(&mut world, 240.0, 600.0, ItemKind::Shield);
    resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert!(power.shield_active());
}

#[test]
fn item_away_from_player_stays() {
    let (config, mut world, mut power) = setup();
    add_item(&mut world, 20.0, 100.0, ItemKind::Shield);
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert!(report.pickups.is_empty());
    assert_eq!(world.items.len(), 1);
    assert!(!power.shield_active());
}

// ── EnemyProjectile × Player ──────────────────────────────────────────────────

#[test]
fn unshielded_bullet_hit_is_lethal() {
    let (config, mut world, mut power) = setup();
    add_enemy_projectile(&mut world, 230.0, 590.0);
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert!(report.lethal);
    assert!(world.enemy_projectiles.is_empty());
}

#[test]
fn shield_absorbs_bullet_hit() {
    let (config, mut world, mut power) = setup();
    power.apply(ItemKind::Shield, NOW, config.rapid_fire_duration());
    add_enemy_projectile(&mut world, 230.0, 590.0);

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert!(!report.lethal);
    assert_eq!(report.shields_consumed, 1);
    assert!(!power.shield_active());
    assert!(world.enemy_projectiles.is_empty());
}

#[test]
fn shield_only_absorbs_first_of_two_hits() {
    let (config, mut world, mut power) = setup();
    power.apply(ItemKind::Shield, NOW, config.rapid_fire_duration());
    add_enemy_projectile(&mut world, 220.0, 590.0);
    add_enemy_projectile(&mut world, 250.0, 590.0);

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.shields_consumed, 1);
    assert!(report.lethal);
}

#[test]
fn bullet_beside_player_misses() {
    let (config, mut world, mut power) = setup();
    add_enemy_projectile(&mut world, 100.0, 590.0);
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert!(!report.lethal);
    assert_eq!(world.enemy_projectiles.len(), 1);
}

// ── Enemy × Player ────────────────────────────────────────────────────────────

#[test]
fn enemy_ramming_player_is_lethal() {
    let (config, mut world, mut power) = setup();
    let id = add_enemy(&mut world, 200.0, 560.0);
    let mut rec = Recorder::default();
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut rec);
    assert!(report.lethal);
    assert!(world.enemies.is_empty());
    assert_eq!(rec.destroyed(), vec![id]);
    // Ramming is not a kill
    assert_eq!(report.score_gained, 0);
    assert_eq!(power.gauge.value(), 0);
}

#[test]
fn shield_absorbs_ramming_enemy() {
    let (config, mut world, mut power) = setup();
    power.apply(ItemKind::Shield, NOW, config.rapid_fire_duration());
    add_enemy(&mut world, 200.0, 560.0);
    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert!(!report.lethal);
    assert!(!power.shield_active());
}

// ── Ordering ──────────────────────────────────────────────────────────────────

#[test]
fn shield_picked_up_this_tick_protects_this_tick() {
    let (config, mut world, mut power) = setup();
    add_item(&mut world, 220.0, 570.0, ItemKind::Shield);
    add_enemy_projectile(&mut world, 230.0, 590.0);

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert!(!report.lethal);
    assert_eq!(report.shields_consumed, 1);
    assert!(!power.shield_active());
}

#[test]
fn enemy_shot_down_before_it_can_ram() {
    let (config, mut world, mut power) = setup();
    add_enemy(&mut world, 200.0, 560.0);
    add_projectile(&mut world, 220.0, 570.0);

    let report = resolve_collisions(&mut world, &mut power, NOW, &config, &mut NullPresenter);
    assert_eq!(report.kills, 1);
    assert!(!report.lethal);
}

// ── special_attack ────────────────────────────────────────────────────────────

#[test]
fn special_attack_needs_full_gauge() {
    let (_, mut world, mut power) = setup();
    add_enemy(&mut world, 10.0, 10.0);
    power.gauge.fill(80);
    let result = special_attack(&mut world, &mut power, &mut NullPresenter);
    assert_eq!(result, None);
    assert_eq!(world.enemies.len(), 1);
    assert_eq!(power.gauge.value(), 80);
}

#[test]
fn special_attack_clears_every_enemy() {
    let (_, mut world, mut power) = setup();
    let ids = [
        add_enemy(&mut world, 10.0, 10.0),
        add_enemy(&mut world, 100.0, 200.0),
        add_enemy(&mut world, 300.0, 400.0),
    ];
    power.gauge.fill(100);
    let mut rec = Recorder::default();

    let result = special_attack(&mut world, &mut power, &mut rec);
    assert_eq!(result, Some(3));
    assert!(world.enemies.is_empty());
    assert_eq!(power.gauge.value(), 0);
    assert!(!power.gauge.is_ready());
    for id in ids {
        assert!(rec.destroyed().contains(&id));
    }
}

#[test]
fn special_attack_on_empty_field_still_spends_gauge() {
    let (_, mut world, mut power) = setup();
    power.gauge.fill(100);
    assert_eq!(special_attack(&mut world, &mut power, &mut NullPresenter), Some(0));
    assert_eq!(power.gauge.value(), 0);
}
