//! Core of a vertical arcade shooter: entity pools, spawning, per-frame
//! motion, collision resolution, power-ups and the session state machine.
//!
//! Nothing in here touches a terminal or a window.  Presentation happens
//! through the [`presenter::Presenter`] trait and time is passed in
//! explicitly, so a whole session can be driven deterministically.

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod power;
pub mod presenter;
pub mod session;
pub mod spawn;
