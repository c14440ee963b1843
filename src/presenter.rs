//! Outbound interface to whatever draws the game.
//!
//! The core calls these hooks as entities appear, move and vanish, and when
//! HUD-relevant values change.  Every method defaults to a no-op so a
//! frontend only implements what it draws.

use crate::entities::{EntityId, EntityKind};
use crate::geometry::Aabb;

pub trait Presenter {
    /// A new entity appeared with the given hitbox.
    fn render(&mut self, _id: EntityId, _kind: EntityKind, _bounds: Aabb) {}

    /// The entity left the field or was destroyed.
    fn destroy(&mut self, _id: EntityId) {}

    /// New top-left corner after this tick's motion.
    fn set_position(&mut self, _id: EntityId, _x: f32, _y: f32) {}

    fn score_changed(&mut self, _score: u32) {}

    fn gauge_changed(&mut self, _percent: u8, _ready: bool) {}

    fn shield_changed(&mut self, _active: bool) {}

    fn rapid_fire_changed(&mut self, _active: bool) {}

    fn game_over(&mut self) {}

    fn reset(&mut self) {}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}
