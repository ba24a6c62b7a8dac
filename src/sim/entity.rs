//! Combatants
//!
//! An entity only knows its own body and health. Moving between the living and
//! dead rosters is the session's job.

use glam::Vec2;
use serde::Serialize;

/// Stable handle for an entity within one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u32);

/// A combatant
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    pub id: EntityId,
    /// Display colour, doubles as the player's name
    pub label: String,
    /// Centre of the body (y grows downward)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    health: u8,
}

impl Entity {
    pub fn new(id: EntityId, label: impl Into<String>, pos: Vec2, size: Vec2, health: u8) -> Self {
        Self {
            id,
            label: label.into(),
            pos,
            width: size.x,
            height: size.y,
            health,
        }
    }

    #[inline]
    pub fn health(&self) -> u8 {
        self.health
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Y of the top of the body, where shots leave from
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.height / 2.0
    }

    /// Subtract damage, rounding to the nearest whole point and flooring at 0.
    ///
    /// Returns the health actually lost.
    pub fn take_damage(&mut self, damage: f32) -> u8 {
        let before = self.health;
        let after = (before as f32 - damage.max(0.0)).round().clamp(0.0, before as f32);
        self.health = after as u8;
        before - self.health
    }
}
