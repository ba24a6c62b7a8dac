//! Projectile flight
//!
//! A shot becomes a per-tick step vector: `power * (cos, sin) / power_scale`.
//! Every tick gravity is taken off the vertical step and the step is
//! subtracted from the position, so a positive sine moves up the screen and a
//! positive cosine moves left (the player drags away from the target, like a
//! slingshot). Flight ends on the first tick the projectile is at or below the
//! ground surface.

use glam::Vec2;
use serde::Serialize;

use super::entity::EntityId;
use super::terrain::Terrain;
use crate::error::{ShotRejected, ShotResult};
use crate::{degrees_to_direction, normalize_degrees};

/// Anything that can report the ground surface at a given x
pub trait Ground {
    fn surface_y(&self, x: f32) -> f32;
}

impl Ground for Terrain {
    fn surface_y(&self, x: f32) -> f32 {
        Terrain::surface_y(self, x)
    }
}

/// A level ground line
impl Ground for f32 {
    fn surface_y(&self, _x: f32) -> f32 {
        *self
    }
}

/// An aimed shot: angle in degrees, power on the 0..=cap scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Shot {
    pub angle_deg: f32,
    pub power: f32,
}

impl Shot {
    pub fn new(angle_deg: f32, power: f32) -> Self {
        Self { angle_deg, power }
    }

    /// Build a shot from a finished drag gesture
    pub fn from_drag(angle_deg: f32, distance: f32, canvas_height: f32) -> Self {
        Self::new(angle_deg, crate::input::power_from_drag(distance, canvas_height))
    }

    /// Wrap the angle into [0, 360) and clamp power into [0, cap]
    pub fn sanitized(self, power_cap: f32) -> ShotResult<Self> {
        if !self.angle_deg.is_finite() || !self.power.is_finite() {
            return Err(ShotRejected::NonFiniteInput);
        }
        Ok(Self {
            angle_deg: normalize_degrees(self.angle_deg),
            power: self.power.clamp(0.0, power_cap),
        })
    }
}

/// The live projectile for the current turn
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub owner: EntityId,
    pub pos: Vec2,
    /// Displacement removed from `pos` each tick
    pub step: Vec2,
}

impl Projectile {
    /// Launch from `origin`. The shot must already be sanitized.
    pub fn launch(owner: EntityId, origin: Vec2, shot: Shot, power_scale: f32) -> Self {
        Self {
            owner,
            pos: origin,
            step: degrees_to_direction(shot.angle_deg) * shot.power / power_scale,
        }
    }
}

/// One flight tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTick {
    pub pos: Vec2,
    /// True on the tick the projectile reached the ground
    pub landed: bool,
}

/// Stepwise simulation of a single projectile
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    projectile: Projectile,
    gravity: f32,
    ticks: u32,
    landed: bool,
}

impl Trajectory {
    /// `gravity` must be positive for the flight to end
    pub fn new(projectile: Projectile, gravity: f32) -> Self {
        debug_assert!(gravity > 0.0, "flight needs positive gravity to land");
        Self {
            projectile,
            gravity,
            ticks: 0,
            landed: false,
        }
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn has_landed(&self) -> bool {
        self.landed
    }

    /// Advance one tick. Returns `None` once the projectile has landed.
    pub fn advance(&mut self, ground: &impl Ground) -> Option<FlightTick> {
        if self.landed {
            return None;
        }
        let p = &mut self.projectile;
        p.step.y -= self.gravity;
        p.pos -= p.step;
        self.ticks += 1;

        let pos = p.pos;
        self.landed = pos.y >= ground.surface_y(pos.x);
        debug_assert!(pos.is_finite(), "projectile left the number line");
        Some(FlightTick {
            pos,
            landed: self.landed,
        })
    }

    /// Lazy sequence of positions, ending with the landing point
    pub fn positions<G: Ground>(self, ground: &G) -> Positions<'_, G> {
        Positions {
            trajectory: self,
            ground,
        }
    }

    /// Run to completion and return the landing point
    pub fn landing_point(self, ground: &impl Ground) -> Vec2 {
        let start = self.projectile.pos;
        self.positions(ground).last().unwrap_or(start)
    }
}

/// Iterator returned by [`Trajectory::positions`]
pub struct Positions<'g, G> {
    trajectory: Trajectory,
    ground: &'g G,
}

impl<G: Ground> Iterator for Positions<'_, G> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        self.trajectory.advance(self.ground).map(|t| t.pos)
    }
}

impl<G: Ground> std::iter::FusedIterator for Positions<'_, G> {}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: f32 = 620.0;

    fn fire(angle: f32, power: f32) -> Trajectory {
        let shot = Shot::new(angle, power).sanitized(100.0).unwrap();
        let projectile = Projectile::launch(EntityId(1), Vec2::new(128.0, 470.0), shot, 10.0);
        Trajectory::new(projectile, 0.1)
    }

    #[test]
    fn test_step_from_angle() {
        let shot = Shot::new(90.0, 50.0);
        let p = Projectile::launch(EntityId(1), Vec2::ZERO, shot, 10.0);
        assert!(p.step.x.abs() < 1e-5);
        assert!((p.step.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_first_tick_applies_gravity_then_moves() {
        let mut t = fire(90.0, 50.0);
        let tick = t.advance(&GROUND).unwrap();
        // step.y = 5.0 - 0.1, subtracted from y
        assert!((tick.pos.y - (470.0 - 4.9)).abs() < 1e-3);
        assert!(!tick.landed);
    }

    #[test]
    fn test_positive_cosine_moves_left() {
        let landing = fire(45.0, 60.0).landing_point(&GROUND);
        assert!(landing.x < 128.0);
        let landing = fire(135.0, 60.0).landing_point(&GROUND);
        assert!(landing.x > 128.0);
    }

    #[test]
    fn test_zero_power_drops_straight_down() {
        let positions: Vec<Vec2> = fire(0.0, 0.0).positions(&GROUND).collect();
        assert!(!positions.is_empty());
        let last = *positions.last().unwrap();
        assert!(last.y >= GROUND);
        assert!((last.x - 128.0).abs() < 1e-5);
    }

    #[test]
    fn test_sequence_stops_after_landing() {
        let mut t = fire(60.0, 80.0);
        while let Some(tick) = t.advance(&GROUND) {
            if tick.landed {
                break;
            }
        }
        assert!(t.has_landed());
        assert!(t.advance(&GROUND).is_none());
    }

    #[test]
    fn test_power_is_clamped_before_flight() {
        let shot = Shot::new(30.0, 600.0).sanitized(100.0).unwrap();
        assert_eq!(shot.power, 100.0);
        let shot = Shot::new(-30.0, -5.0).sanitized(100.0).unwrap();
        assert_eq!(shot.power, 0.0);
        assert!((shot.angle_deg - 330.0).abs() < 1e-3);
    }

    #[test]
    fn test_non_finite_shot_rejected() {
        assert_eq!(
            Shot::new(f32::NAN, 10.0).sanitized(100.0),
            Err(ShotRejected::NonFiniteInput)
        );
        assert_eq!(
            Shot::new(10.0, f32::INFINITY).sanitized(100.0),
            Err(ShotRejected::NonFiniteInput)
        );
    }

    #[test]
    fn test_follows_terrain_profile() {
        let terrain = Terrain::HeightMap {
            surface: vec![500.0; 1000],
        };
        let landing = fire(0.0, 0.0).landing_point(&terrain);
        assert!(landing.y >= 500.0 && landing.y < 620.0);
    }
}
