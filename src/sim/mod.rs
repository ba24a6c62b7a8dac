//! Deterministic duel simulation
//!
//! All gameplay rules live here. This module must stay pure:
//! - Time only advances through `tick`
//! - Seeded RNG only (terrain)
//! - Stable iteration order (turn order, then seating order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod impact;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod timer;
pub mod trajectory;
pub mod turn;

pub use entity::{Entity, EntityId};
pub use impact::{Explosion, Hit, ImpactReport, falloff_damage, resolve_impact};
pub use state::{GameEvent, GameSession, ScoreboardRow};
pub use terrain::Terrain;
pub use tick::{TickInput, tick};
pub use timer::RepeatingTimer;
pub use trajectory::{FlightTick, Ground, Projectile, Shot, Trajectory};
pub use turn::{GamePhase, Outcome, TurnController, TurnEnd};
