//! Per-tick motion and lifecycle.
//!
//! Every pool is walked by descending index: an entity that leaves the
//! field is removed on the spot and reported to the presenter, survivors
//! get a `set_position`.  All randomness comes through the injected `rng`.

use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Body, EnemyProjectile, EntityId, Projectile, World};
use crate::input::InputState;
use crate::power::PowerUps;
use crate::presenter::Presenter;

// ── Player ────────────────────────────────────────────────────────────────────

/// Move the player by `player_speed` for each held direction key, keeping it
/// inside the field.  Returns true if it moved.
pub fn move_player(world: &mut World, input: &InputState, config: &GameConfig) -> bool {
    let player = &mut world.player;
    let start = player.x;
    if input.move_left && player.x > 0.0 {
        player.x -= config.player_speed;
    }
    if input.move_right && player.x < config.field_width - player.width {
        player.x += config.player_speed;
    }
    player.x != start
}

/// Fire one projectile from the player's muzzle if the cooldown has passed.
///
/// `ready_at` is the earliest time the next shot may leave; it is pushed
/// forward by the normal or the rapid-fire cooldown after each shot.
pub fn try_shoot(
    world: &mut World,
    ready_at: &mut Duration,
    power: &PowerUps,
    now: Duration,
    config: &GameConfig,
    presenter: &mut impl Presenter,
) -> Option<EntityId> {
    if now < *ready_at || !world.player.alive {
        return None;
    }
    let (cx, top) = world.player.muzzle();
    let projectile = Projectile {
        id: world.allocate_id(),
        x: cx - config.projectile_width / 2.0,
        y: top,
        width: config.projectile_width,
        height: config.projectile_height,
    };
    let cooldown = if power.rapid_fire_active(now) {
        config.rapid_fire_cooldown()
    } else {
        config.shoot_cooldown()
    };
    *ready_at = now + cooldown;

    presenter.render(projectile.id, projectile.kind(), projectile.bounds());
    let id = projectile.id;
    world.projectiles.push(projectile);
    Some(id)
}

// ── Pools ─────────────────────────────────────────────────────────────────────

/// Player bullets fly up and vanish above the top edge.
pub fn advance_projectiles(world: &mut World, config: &GameConfig, presenter: &mut impl Presenter) {
    for i in (0..world.projectiles.len()).rev() {
        let projectile = &mut world.projectiles[i];
        projectile.y -= config.projectile_speed;
        if projectile.y < 0.0 {
            presenter.destroy(projectile.id);
            world.projectiles.remove(i);
        } else {
            presenter.set_position(projectile.id, projectile.x, projectile.y);
        }
    }
}

/// Enemy bullets fall and vanish below the bottom edge.
pub fn advance_enemy_projectiles(
    world: &mut World,
    config: &GameConfig,
    presenter: &mut impl Presenter,
) {
    for i in (0..world.enemy_projectiles.len()).rev() {
        let bullet = &mut world.enemy_projectiles[i];
        bullet.y += config.enemy_projectile_speed;
        if bullet.y > config.field_height {
            presenter.destroy(bullet.id);
            world.enemy_projectiles.remove(i);
        } else {
            presenter.set_position(bullet.id, bullet.x, bullet.y);
        }
    }
}

/// Enemies drift diagonally, bounce off the side walls, leave through the
/// bottom edge, and occasionally fire.  Returns how many shots were fired.
pub fn advance_enemies(
    world: &mut World,
    config: &GameConfig,
    rng: &mut impl Rng,
    presenter: &mut impl Presenter,
) -> usize {
    let right_bound = config.field_width - config.enemy_width;
    let mut shots = Vec::new();

    for i in (0..world.enemies.len()).rev() {
        let enemy = &mut world.enemies[i];
        enemy.y += enemy.speed_y;
        enemy.x += enemy.speed_x;

        if enemy.x <= 0.0 {
            enemy.speed_x = enemy.speed_x.abs();
        } else if enemy.x >= right_bound {
            enemy.speed_x = -enemy.speed_x.abs();
        }

        if enemy.y > config.field_height {
            presenter.destroy(enemy.id);
            world.enemies.remove(i);
            continue;
        }
        presenter.set_position(enemy.id, enemy.x, enemy.y);

        if rng.gen::<f32>() < config.enemy_fire_chance {
            shots.push((
                enemy.x + enemy.width / 2.0 - config.enemy_projectile_width / 2.0,
                enemy.y + enemy.height,
            ));
        }
    }

    let fired = shots.len();
    for (x, y) in shots {
        let bullet = EnemyProjectile {
            id: world.allocate_id(),
            x,
            y,
            width: config.enemy_projectile_width,
            height: config.enemy_projectile_height,
        };
        presenter.render(bullet.id, bullet.kind(), bullet.bounds());
        world.enemy_projectiles.push(bullet);
    }
    fired
}

/// Items fall and vanish below the bottom edge.
pub fn advance_items(world: &mut World, config: &GameConfig, presenter: &mut impl Presenter) {
    for i in (0..world.items.len()).rev() {
        let item = &mut world.items[i];
        item.y += config.item_speed;
        if item.y > config.field_height {
            presenter.destroy(item.id);
            world.items.remove(i);
        } else {
            presenter.set_position(item.id, item.x, item.y);
        }
    }
}

/// One motion step for every pool.  Returns the number of enemy shots fired.
pub fn advance_all(
    world: &mut World,
    config: &GameConfig,
    rng: &mut impl Rng,
    presenter: &mut impl Presenter,
) -> usize {
    advance_projectiles(world, config, presenter);
    let fired = advance_enemies(world, config, rng, presenter);
    advance_enemy_projectiles(world, config, presenter);
    advance_items(world, config, presenter);
    fired
}
