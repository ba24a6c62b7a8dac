//! Game balance tuning
//!
//! Every rule constant the engine reads at runtime. Defaults come from
//! [`crate::consts`]; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{TuningError, TuningResult};

/// Balance preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TuningPreset {
    #[default]
    Classic,
    LowGravity,
    BigBlast,
}

impl TuningPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningPreset::Classic => "Classic",
            TuningPreset::LowGravity => "Low Gravity",
            TuningPreset::BigBlast => "Big Blast",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(TuningPreset::Classic),
            "low-gravity" | "lowgravity" | "moon" => Some(TuningPreset::LowGravity),
            "big-blast" | "bigblast" => Some(TuningPreset::BigBlast),
            _ => None,
        }
    }

    /// Gravity multiplier relative to the classic value
    pub fn gravity_factor(&self) -> f32 {
        match self {
            TuningPreset::Classic => 1.0,
            TuningPreset::LowGravity => 0.4,
            TuningPreset::BigBlast => 1.0,
        }
    }

    /// Explosion radius multiplier relative to the classic value
    pub fn blast_factor(&self) -> f32 {
        match self {
            TuningPreset::Classic => 1.0,
            TuningPreset::LowGravity => 1.0,
            TuningPreset::BigBlast => 2.0,
        }
    }
}

/// Runtime-tunable rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Flat ground strip height (also the mean height for generated terrain)
    pub terrain_height: f32,

    // === Combatants ===
    pub entity_width: f32,
    pub entity_height: f32,
    pub starting_health: u8,
    /// Left player spawns at this fraction of arena width, right player mirrored
    pub spawn_fraction: f32,

    // === Flight ===
    pub gravity: f32,
    pub power_cap: f32,
    pub power_scale: f32,
    /// Seconds per flight tick
    pub flight_interval: f32,

    // === Explosion ===
    pub explosion_radius: f32,
    pub explosion_start_radius: f32,
    pub explosion_growth: f32,
    /// Seconds per explosion animation tick
    pub explosion_interval: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            terrain_height: TERRAIN_HEIGHT,

            entity_width: ENTITY_WIDTH,
            entity_height: ENTITY_HEIGHT,
            starting_health: MAX_HEALTH,
            spawn_fraction: SPAWN_FRACTION,

            gravity: GRAVITY,
            power_cap: POWER_CAP,
            power_scale: POWER_SCALE,
            flight_interval: FLIGHT_INTERVAL,

            explosion_radius: EXPLOSION_RADIUS,
            explosion_start_radius: EXPLOSION_START_RADIUS,
            explosion_growth: EXPLOSION_GROWTH,
            explosion_interval: EXPLOSION_INTERVAL,
        }
    }
}

impl Tuning {
    /// Create tuning from a preset (applies preset multipliers to the defaults)
    pub fn from_preset(preset: TuningPreset) -> Self {
        let mut tuning = Self::default();
        tuning.apply_preset(preset);
        tuning
    }

    /// Apply a preset on top of the current values
    pub fn apply_preset(&mut self, preset: TuningPreset) {
        self.gravity *= preset.gravity_factor();
        self.explosion_radius *= preset.blast_factor();
    }

    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> TuningResult<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the flat ground line (y grows downward)
    pub fn ground_line(&self) -> f32 {
        self.arena_height - self.terrain_height
    }

    /// Check every rule the engine depends on
    ///
    /// Gravity must be positive or a shot could fly forever.
    pub fn validate(&self) -> TuningResult<()> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        if !(self.terrain_height >= 0.0 && self.terrain_height < self.arena_height) {
            return Err(TuningError::OutOfRange {
                name: "terrain_height",
                value: self.terrain_height,
                expected: "[0, arena_height)",
            });
        }
        positive("entity_width", self.entity_width)?;
        positive("entity_height", self.entity_height)?;
        if self.starting_health == 0 || self.starting_health > MAX_HEALTH {
            return Err(TuningError::OutOfRange {
                name: "starting_health",
                value: self.starting_health as f32,
                expected: "[1, 100]",
            });
        }
        if !(self.spawn_fraction >= 0.0 && self.spawn_fraction <= 0.5) {
            return Err(TuningError::OutOfRange {
                name: "spawn_fraction",
                value: self.spawn_fraction,
                expected: "[0, 0.5]",
            });
        }
        positive("gravity", self.gravity)?;
        positive("power_cap", self.power_cap)?;
        positive("power_scale", self.power_scale)?;
        positive("flight_interval", self.flight_interval)?;
        positive("explosion_radius", self.explosion_radius)?;
        positive("explosion_start_radius", self.explosion_start_radius)?;
        positive("explosion_growth", self.explosion_growth)?;
        positive("explosion_interval", self.explosion_interval)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> TuningResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TuningError::OutOfRange {
            name,
            value,
            expected: "(0, ∞)",
        })
    }
}
