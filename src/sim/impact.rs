//! Impact resolution
//!
//! Damage is decided analytically the instant a projectile lands. Only the
//! horizontal distance to each entity counts, falloff is linear from the full
//! radius at ground zero to nothing at the edge, and the shooter is not exempt.
//!
//! The expanding explosion ring is cosmetic and runs on its own timer after the
//! damage has already been applied.

use glam::Vec2;
use serde::Serialize;

use super::entity::{Entity, EntityId};
use super::timer::RepeatingTimer;

/// Linear falloff: `radius - distance` inside the radius, 0 outside
#[inline]
pub fn falloff_damage(distance: f32, radius: f32) -> f32 {
    let distance = distance.abs();
    if distance < radius {
        radius - distance
    } else {
        0.0
    }
}

/// Damage dealt to one entity by one impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit {
    pub entity: EntityId,
    /// Raw falloff damage before rounding
    pub damage: f32,
    /// Health actually removed
    pub lost: u8,
    /// Health after the hit
    pub health: u8,
}

/// Everything one impact changed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImpactReport {
    pub point: Vec2,
    pub hits: Vec<Hit>,
    /// Entities whose health reached 0 in this impact, in roster order
    pub eliminated: Vec<EntityId>,
}

/// Apply an explosion at `point` to every given entity.
///
/// Dead entities are skipped. The caller moves `eliminated` out of its living
/// roster.
pub fn resolve_impact<'a>(
    point: Vec2,
    radius: f32,
    entities: impl IntoIterator<Item = &'a mut Entity>,
) -> ImpactReport {
    let mut report = ImpactReport {
        point,
        ..Default::default()
    };

    for entity in entities.into_iter().filter(|e| e.is_alive()) {
        let damage = falloff_damage(point.x - entity.pos.x, radius);
        if damage <= 0.0 {
            continue;
        }
        let lost = entity.take_damage(damage);
        report.hits.push(Hit {
            entity: entity.id,
            damage,
            lost,
            health: entity.health(),
        });
        if !entity.is_alive() {
            report.eliminated.push(entity.id);
        }
    }

    log::debug!(
        "impact at ({:.1}, {:.1}): {} hit, {} eliminated",
        point.x,
        point.y,
        report.hits.len(),
        report.eliminated.len()
    );
    report
}

/// Expanding explosion ring (display only)
#[derive(Debug, Serialize)]
pub struct Explosion {
    pub center: Vec2,
    pub radius: f32,
    max_radius: f32,
    growth: f32,
    timer: RepeatingTimer,
}

/// What an explosion did during one `advance`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExplosionFrames {
    /// Radii drawn, oldest first
    pub radii: Vec<f32>,
    /// The ring has outgrown the blast and should be finished
    pub done: bool,
}

impl Explosion {
    pub fn new(center: Vec2, start_radius: f32, max_radius: f32, growth: f32, interval: f32) -> Self {
        Self {
            center,
            radius: start_radius,
            max_radius,
            growth,
            timer: RepeatingTimer::start(interval),
        }
    }

    /// Feed elapsed time; each interval draws the current ring then grows it.
    pub fn advance(&mut self, dt: f32) -> ExplosionFrames {
        let mut frames = ExplosionFrames::default();
        for _ in 0..self.timer.advance(dt) {
            if self.radius > self.max_radius {
                frames.done = true;
                break;
            }
            frames.radii.push(self.radius);
            self.radius += self.growth;
        }
        frames
    }

    /// Stop the animation timer
    pub fn finish(self) {
        self.timer.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_at(id: u32, x: f32, health: u8) -> Entity {
        Entity::new(
            EntityId(id),
            format!("e{}", id),
            Vec2::new(x, 545.0),
            Vec2::new(50.0, 150.0),
            health,
        )
    }

    #[test]
    fn test_falloff() {
        assert_eq!(falloff_damage(0.0, 75.0), 75.0);
        assert_eq!(falloff_damage(50.0, 75.0), 25.0);
        assert_eq!(falloff_damage(-50.0, 75.0), 25.0);
        assert_eq!(falloff_damage(75.0, 75.0), 0.0);
        assert_eq!(falloff_damage(380.0, 75.0), 0.0);
    }

    #[test]
    fn test_reference_impact() {
        let mut entities = vec![
            entity_at(1, 100.0, 100),
            entity_at(2, 500.0, 100),
            entity_at(3, 150.0, 100),
        ];
        let report = resolve_impact(Vec2::new(120.0, 620.0), 75.0, entities.iter_mut());

        // Shooter at 100 is 20 away and takes 55
        assert_eq!(entities[0].health(), 45);
        assert_eq!(entities[1].health(), 100);
        // 30 away takes 45
        assert_eq!(entities[2].health(), 55);
        assert_eq!(report.hits.len(), 2);
        assert!(report.hits.iter().all(|h| h.entity != EntityId(2)));
        assert!(report.eliminated.is_empty());
    }

    #[test]
    fn test_elimination_reported() {
        let mut entities = vec![entity_at(1, 100.0, 30), entity_at(2, 140.0, 100)];
        let report = resolve_impact(Vec2::new(100.0, 620.0), 75.0, entities.iter_mut());
        assert_eq!(report.eliminated, vec![EntityId(1)]);
        assert_eq!(entities[0].health(), 0);
        assert_eq!(entities[1].health(), 65);
    }

    #[test]
    fn test_dead_entities_skipped() {
        let mut entities = vec![entity_at(1, 100.0, 0)];
        let report = resolve_impact(Vec2::new(100.0, 620.0), 75.0, entities.iter_mut());
        assert!(report.hits.is_empty());
        assert!(report.eliminated.is_empty());
    }

    #[test]
    fn test_vertical_distance_ignored() {
        let mut entities = vec![entity_at(1, 100.0, 100)];
        resolve_impact(Vec2::new(100.0, -5000.0), 75.0, entities.iter_mut());
        assert_eq!(entities[0].health(), 25);
    }

    #[test]
    fn test_explosion_grows_until_past_radius() {
        let mut explosion = Explosion::new(Vec2::ZERO, 1.0, 75.0, 5.0, 0.1);
        let frames = explosion.advance(0.25);
        assert_eq!(frames.radii, vec![1.0, 6.0]);
        assert!(!frames.done);

        let mut drawn = frames.radii.len();
        let mut done = false;
        for _ in 0..100 {
            let frames = explosion.advance(0.1);
            drawn += frames.radii.len();
            if frames.done {
                done = true;
                break;
            }
        }
        assert!(done);
        // 1, 6, ..., 71
        assert_eq!(drawn, 15);
        explosion.finish();
    }
}
