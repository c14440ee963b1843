//! Power-up effects and the special-attack gauge.
//!
//! Each effect is independent:
//! * rapid fire: active until an explicit expiry timestamp; picking it up
//!   again restarts the window.
//! * shield: a single flag, consumed by exactly one lethal hit.
//! * gauge: fills per projectile kill, empties on a special attack.

use std::time::Duration;

use crate::entities::ItemKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecialGauge {
    value: u32,
    max: u32,
}

impl SpecialGauge {
    pub fn new(max: u32) -> Self {
        SpecialGauge { value: 0, max }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_ready(&self) -> bool {
        self.value == self.max
    }

    /// Fill level in whole percent, 0..=100.
    pub fn percent(&self) -> u8 {
        (u64::from(self.value) * 100 / u64::from(self.max)) as u8
    }

    /// Add `amount`, clamped at the maximum.
    pub fn fill(&mut self, amount: u32) {
        self.value = self.value.saturating_add(amount).min(self.max);
    }

    /// Empty the gauge if it is full.  Returns whether it was.
    pub fn consume(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.value = 0;
        true
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PowerUps {
    rapid_fire_until: Option<Duration>,
    shield: bool,
    pub gauge: SpecialGauge,
}

impl PowerUps {
    pub fn new(gauge_max: u32) -> Self {
        PowerUps {
            rapid_fire_until: None,
            shield: false,
            gauge: SpecialGauge::new(gauge_max),
        }
    }

    /// Apply a picked-up item at time `now`.
    pub fn apply(&mut self, kind: ItemKind, now: Duration, rapid_fire_duration: Duration) {
        match kind {
            ItemKind::RapidFire => self.rapid_fire_until = Some(now + rapid_fire_duration),
            ItemKind::Shield => self.shield = true,
        }
    }

    pub fn rapid_fire_active(&self, now: Duration) -> bool {
        matches!(self.rapid_fire_until, Some(until) if now < until)
    }

    pub fn rapid_fire_until(&self) -> Option<Duration> {
        self.rapid_fire_until
    }

    /// Drop rapid fire once its window has passed.  Returns true on the tick
    /// it expires.
    pub fn expire(&mut self, now: Duration) -> bool {
        match self.rapid_fire_until {
            Some(until) if now >= until => {
                self.rapid_fire_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn shield_active(&self) -> bool {
        self.shield
    }

    /// Spend the shield on a lethal hit.  Returns true if the hit was absorbed.
    pub fn absorb_hit(&mut self) -> bool {
        std::mem::replace(&mut self.shield, false)
    }

    pub fn reset(&mut self) {
        self.rapid_fire_until = None;
        self.shield = false;
        self.gauge.reset();
    }
}
