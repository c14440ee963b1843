//! The game session controller.
//!
//! A [`Session`] owns every piece of mutable game state: the world, score,
//! power-ups, key state and spawn timers.  The frontend calls
//! [`Session::tick`] once per displayed frame with the current monotonic
//! time; timed effects are explicit timestamps compared against that time,
//! so a [`Session::reset`] leaves nothing pending behind.

use std::time::Duration;

use rand::Rng;

use crate::collision::{resolve_collisions, special_attack, CollisionReport};
use crate::compute::{advance_all, move_player, try_shoot};
use crate::config::{ConfigError, GameConfig};
use crate::entities::{Body, EntityId, GameStatus, World};
use crate::input::{Action, InputState};
use crate::power::PowerUps;
use crate::presenter::Presenter;
use crate::spawn::{spawn_enemy, spawn_item, SpawnTimer};

/// Values the HUD shows.  The last published copy is kept so only changes
/// reach the presenter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Hud {
    score: u32,
    gauge_percent: u8,
    gauge_ready: bool,
    shield: bool,
    rapid_fire: bool,
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    world: World,
    status: GameStatus,
    score: u32,
    power: PowerUps,
    /// Earliest time the next player shot may be fired.
    shoot_ready_at: Duration,
    input: InputState,
    enemy_timer: SpawnTimer,
    item_timer: SpawnTimer,
    published: Hud,
    frame: u64,
}

impl Session {
    /// Start a running session at time `now`.  Fails if `config` is invalid.
    pub fn new(config: GameConfig, now: Duration) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut session = Session {
            world: World::new(&config),
            status: GameStatus::Running,
            score: 0,
            power: PowerUps::new(config.gauge_max),
            shoot_ready_at: now,
            input: InputState::default(),
            enemy_timer: SpawnTimer::new(config.enemy_spawn_interval(), now),
            item_timer: SpawnTimer::new(config.item_spawn_interval(), now),
            published: Hud::default(),
            frame: 0,
            config,
        };
        session.published = session.hud(now);
        Ok(session)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access to the pools, for scripted setups.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn power(&self) -> &PowerUps {
        &self.power
    }

    pub fn power_mut(&mut self) -> &mut PowerUps {
        &mut self.power
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn set_input(&mut self, action: Action, held: bool) {
        self.input.set(action, held);
    }

    pub fn shoot_ready_at(&self) -> Duration {
        self.shoot_ready_at
    }

    fn hud(&self, now: Duration) -> Hud {
        Hud {
            score: self.score,
            gauge_percent: self.power.gauge.percent(),
            gauge_ready: self.power.gauge.is_ready(),
            shield: self.power.shield_active(),
            rapid_fire: self.power.rapid_fire_active(now),
        }
    }

    fn publish_hud(&mut self, now: Duration, presenter: &mut impl Presenter) {
        let before = self.published;
        let after = self.hud(now);
        if after.score != before.score {
            presenter.score_changed(after.score);
        }
        if (after.gauge_percent, after.gauge_ready) != (before.gauge_percent, before.gauge_ready) {
            presenter.gauge_changed(after.gauge_percent, after.gauge_ready);
        }
        if after.shield != before.shield {
            presenter.shield_changed(after.shield);
        }
        if after.rapid_fire != before.rapid_fire {
            presenter.rapid_fire_changed(after.rapid_fire);
        }
        self.published = after;
    }

    /// Announce every live entity and the HUD to a freshly attached presenter.
    pub fn present(&mut self, now: Duration, presenter: &mut impl Presenter) {
        let player = &self.world.player;
        if player.alive {
            presenter.render(player.id, player.kind(), player.bounds());
        }
        for p in &self.world.projectiles {
            presenter.render(p.id, p.kind(), p.bounds());
        }
        for b in &self.world.enemy_projectiles {
            presenter.render(b.id, b.kind(), b.bounds());
        }
        for e in &self.world.enemies {
            presenter.render(e.id, e.kind(), e.bounds());
        }
        for i in &self.world.items {
            presenter.render(i.id, i.kind(), i.bounds());
        }
        let hud = self.hud(now);
        presenter.score_changed(hud.score);
        presenter.gauge_changed(hud.gauge_percent, hud.gauge_ready);
        presenter.shield_changed(hud.shield);
        presenter.rapid_fire_changed(hud.rapid_fire);
        self.published = hud;
        if self.is_game_over() {
            presenter.game_over();
        }
    }

    // ── Spawning ──────────────────────────────────────────────────────────────

    /// Spawn one enemy now.  No-op once the game is over.
    pub fn spawn_enemy(&mut self, rng: &mut impl Rng, presenter: &mut impl Presenter) -> Option<EntityId> {
        spawn_enemy(&mut self.world, &self.config, self.status, rng, presenter)
    }

    /// Spawn one item now.  No-op once the game is over.
    pub fn spawn_item(&mut self, rng: &mut impl Rng, presenter: &mut impl Presenter) -> Option<EntityId> {
        spawn_item(&mut self.world, &self.config, self.status, rng, presenter)
    }

    /// Fire whichever spawn timers are due.  The timers keep running during
    /// game over; the spawners themselves refuse to create anything then.
    fn run_spawners(&mut self, now: Duration, rng: &mut impl Rng, presenter: &mut impl Presenter) {
        if self.enemy_timer.poll(now) {
            self.spawn_enemy(rng, presenter);
        }
        if self.item_timer.poll(now) {
            self.spawn_item(rng, presenter);
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────────

    /// Advance the session by one frame at time `now`.
    ///
    /// Order: special attack, player motion and shooting, spawners, pool
    /// motion, collisions, power-up expiry.  During game over only the spawn
    /// timers advance.  Returns the status after the tick.
    pub fn tick(
        &mut self,
        now: Duration,
        rng: &mut impl Rng,
        presenter: &mut impl Presenter,
    ) -> GameStatus {
        if self.is_game_over() {
            self.run_spawners(now, rng, presenter);
            return self.status;
        }
        self.frame += 1;
        let input = self.input;

        let mut special_score = 0;
        if input.special_attack {
            if let Some(destroyed) = special_attack(&mut self.world, &mut self.power, presenter) {
                special_score = destroyed.saturating_mul(self.config.kill_score);
                log::info!("special attack cleared {} enemies (+{})", destroyed, special_score);
            }
        }

        if move_player(&mut self.world, &input, &self.config) {
            let p = &self.world.player;
            presenter.set_position(p.id, p.x, p.y);
        }
        if input.shoot {
            try_shoot(
                &mut self.world,
                &mut self.shoot_ready_at,
                &self.power,
                now,
                &self.config,
                presenter,
            );
        }

        self.run_spawners(now, rng, presenter);
        advance_all(&mut self.world, &self.config, rng, presenter);

        let report = resolve_collisions(&mut self.world, &mut self.power, now, &self.config, presenter);
        self.score = self
            .score
            .saturating_add(special_score)
            .saturating_add(report.score_gained);

        if self.power.expire(now) {
            log::debug!("rapid fire expired");
        }

        log::trace!(
            "frame {} score={} live={} gauge={}",
            self.frame,
            self.score,
            self.world.live_count(),
            self.power.gauge.value()
        );

        self.publish_hud(now, presenter);
        if report.lethal {
            self.end_game(&report, presenter);
        }
        self.status
    }

    fn end_game(&mut self, report: &CollisionReport, presenter: &mut impl Presenter) {
        self.status = GameStatus::GameOver;
        self.world.player.alive = false;
        presenter.destroy(self.world.player.id);
        presenter.game_over();
        log::info!(
            "game over at frame {} with score {} ({} kills this frame)",
            self.frame,
            self.score,
            report.kills
        );
    }

    // ── Reset ─────────────────────────────────────────────────────────────────

    /// Return to a fresh running session at time `now`, whatever the current
    /// state.  Destroys every live entity, zeroes score and gauge, drops all
    /// effects and cooldowns, releases all keys and re-arms the spawn timers.
    pub fn reset(&mut self, now: Duration, presenter: &mut impl Presenter) {
        for id in self.world.pooled_ids() {
            presenter.destroy(id);
        }
        if self.world.player.alive {
            presenter.destroy(self.world.player.id);
        }
        self.world.clear_pools();

        let player = &mut self.world.player;
        player.x = self.config.player_start_x();
        player.y = self.config.player_y();
        player.alive = true;

        self.status = GameStatus::Running;
        self.score = 0;
        self.power.reset();
        self.shoot_ready_at = now;
        self.input.clear();
        self.enemy_timer.restart(now);
        self.item_timer.restart(now);
        self.frame = 0;

        presenter.reset();
        self.present(now, presenter);
        log::info!("session reset");
    }
}
