//! Maggots - A turn-based artillery duel
//!
//! Core modules:
//! - `sim`: Deterministic turn/combat engine (entities, flight, impact, turns)
//! - `input`: Drag gesture to (angle, power) translation
//! - `tuning`: Data-driven game balance
//! - `error`: Rejected shots and invalid tuning

pub mod error;
pub mod input;
pub mod sim;
pub mod tuning;

pub use error::{ShotRejected, TuningError};
pub use tuning::{Tuning, TuningPreset};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed driver timestep in seconds (matches the flight tick)
    pub const SIM_DT: f32 = 0.010;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions (canvas pixels, y grows downward)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;
    /// Height of the flat ground strip at the bottom of the arena
    pub const TERRAIN_HEIGHT: f32 = 100.0;

    /// Combatant body
    pub const ENTITY_WIDTH: f32 = 50.0;
    pub const ENTITY_HEIGHT: f32 = 150.0;
    pub const MAX_HEALTH: u8 = 100;
    /// Spawn x as a fraction of arena width (mirrored for the second player)
    pub const SPAWN_FRACTION: f32 = 0.1;

    /// Downward acceleration applied to the vertical step every flight tick
    pub const GRAVITY: f32 = 0.1;
    /// Upper bound for shot power
    pub const POWER_CAP: f32 = 100.0;
    /// Divides power into per-tick displacement; higher = finer, slower flight
    pub const POWER_SCALE: f32 = 10.0;
    /// Seconds between flight ticks
    pub const FLIGHT_INTERVAL: f32 = 0.010;

    /// Explosion radius for damage falloff
    pub const EXPLOSION_RADIUS: f32 = 75.0;
    /// Cosmetic explosion: starting radius, growth per tick, seconds per tick
    pub const EXPLOSION_START_RADIUS: f32 = 1.0;
    pub const EXPLOSION_GROWTH: f32 = 5.0;
    pub const EXPLOSION_INTERVAL: f32 = 0.100;

    /// Player colours, in seating order
    pub const PLAYER_COLOURS: [&str; 2] = ["#E9FA8F", "#FFA6C0"];
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction for an angle in degrees, in screen terms: positive sine is "up"
#[inline]
pub fn degrees_to_direction(angle: f32) -> Vec2 {
    let radians = angle.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
