//! Game session state
//!
//! The session owns both rosters, the turn controller and the single live
//! projectile/explosion. Everything the outside world needs to draw comes out
//! as [`GameEvent`]s.

use glam::Vec2;
use serde::Serialize;

use super::entity::{Entity, EntityId};
use super::impact::Explosion;
use super::terrain::Terrain;
use super::timer::RepeatingTimer;
use super::trajectory::{Projectile, Shot, Trajectory};
use super::turn::{GamePhase, Outcome, TurnController};
use crate::consts::PLAYER_COLOURS;
use crate::error::{ShotResult, TuningResult};
use crate::tuning::Tuning;

/// Notifications for the renderer/HUD, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    /// A new turn began for `player`
    TurnStarted { player: EntityId, turn: u32 },
    PhaseChanged { phase: GamePhase },
    /// Shot accepted (angle wrapped, power clamped)
    ShotFired { shooter: EntityId, shot: Shot },
    /// One flight tick
    ProjectileMoved { pos: Vec2 },
    /// The projectile hit the ground
    Impact { point: Vec2 },
    Damaged { entity: EntityId, lost: u8, health: u8 },
    Eliminated { entity: EntityId },
    /// One explosion animation tick
    ExplosionGrew { center: Vec2, radius: f32 },
    ExplosionFinished,
    /// Fired once when the game ends
    GameOver { outcome: Outcome },
}

/// A projectile in the air, ticked by its own timer
#[derive(Debug, Serialize)]
pub struct Flight {
    pub(crate) trajectory: Trajectory,
    pub(crate) timer: RepeatingTimer,
}

impl Flight {
    pub fn projectile(&self) -> &Projectile {
        self.trajectory.projectile()
    }

    /// Stop the flight timer and hand back the trajectory
    pub(crate) fn finish(self) -> Trajectory {
        self.timer.stop();
        self.trajectory
    }
}

/// HUD row for one living player
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreboardRow {
    pub id: EntityId,
    pub label: String,
    pub health: u8,
    pub active: bool,
}

/// Complete duel state
#[derive(Debug, Serialize)]
pub struct GameSession {
    pub(crate) tuning: Tuning,
    pub(crate) terrain: Terrain,
    /// Every entity ever seated, indexed by id order
    pub(crate) entities: Vec<Entity>,
    pub(crate) turns: TurnController,
    /// Dead players, in order of death
    pub(crate) dead: Vec<EntityId>,
    pub(crate) flight: Option<Flight>,
    pub(crate) explosion: Option<Explosion>,
    pub(crate) outcome: Option<Outcome>,
    /// 1-based turn counter
    pub(crate) turn: u32,
    /// Undrained notifications
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a classic duel on flat ground: two players at mirrored positions
    pub fn start(tuning: Tuning) -> TuningResult<Self> {
        let terrain = Terrain::flat(tuning.ground_line());
        Self::start_with_terrain(tuning, terrain)
    }

    /// Start a two-player duel on the given ground
    pub fn start_with_terrain(tuning: Tuning, terrain: Terrain) -> TuningResult<Self> {
        let left = tuning.arena_width * tuning.spawn_fraction;
        let right = tuning.arena_width * (1.0 - tuning.spawn_fraction);
        let roster = [(PLAYER_COLOURS[0], left), (PLAYER_COLOURS[1], right)];
        Self::start_with_roster(tuning, terrain, &roster)
    }

    /// Start with any roster of `(label, x)` pairs; the first entry plays first
    pub fn start_with_roster(
        tuning: Tuning,
        terrain: Terrain,
        roster: &[(&str, f32)],
    ) -> TuningResult<Self> {
        tuning.validate()?;

        let size = Vec2::new(tuning.entity_width, tuning.entity_height);
        let entities: Vec<Entity> = roster
            .iter()
            .enumerate()
            .map(|(i, &(label, x))| {
                let y = terrain.surface_y(x) - size.y / 2.0;
                Entity::new(
                    EntityId(i as u32 + 1),
                    label,
                    Vec2::new(x, y),
                    size,
                    tuning.starting_health,
                )
            })
            .collect();

        let mut session = Self {
            turns: TurnController::new(entities.iter().map(|e| e.id)),
            tuning,
            terrain,
            entities,
            dead: Vec::new(),
            flight: None,
            explosion: None,
            outcome: None,
            turn: 0,
            events: Vec::new(),
        };

        log::info!("Duel started with {} players", session.entities.len());
        match session.turns.active() {
            Some(player) => session.announce_turn(player),
            None => {
                let outcome = match session.turns.order().next() {
                    Some(only) => Outcome::Champion(only),
                    None => Outcome::Draw,
                };
                session.end_game(outcome);
            }
        }
        Ok(session)
    }

    /// Commit the active player's shot.
    ///
    /// Rejected shots (wrong phase, game over, NaN input) change nothing.
    pub fn commit_shot(&mut self, shot: Shot) -> ShotResult<()> {
        self.turns.accepting()?;
        let shot = shot.sanitized(self.tuning.power_cap)?;
        let shooter = self.turns.begin_flight()?;

        // The previous blast is discarded when the next turn's shot goes out
        self.finish_explosion();

        let origin = match self.entity(shooter) {
            Some(e) => Vec2::new(e.pos.x, e.top()),
            None => {
                debug_assert!(false, "active player {:?} has no entity", shooter);
                Vec2::ZERO
            }
        };
        let projectile = Projectile::launch(shooter, origin, shot, self.tuning.power_scale);
        self.flight = Some(Flight {
            trajectory: Trajectory::new(projectile, self.tuning.gravity),
            timer: RepeatingTimer::start(self.tuning.flight_interval),
        });

        log::debug!(
            "{:?} fires at {:.1}° with power {:.1}",
            shooter,
            shot.angle_deg,
            shot.power
        );
        self.events.push(GameEvent::ShotFired { shooter, shot });
        self.events.push(GameEvent::PhaseChanged {
            phase: GamePhase::ProjectileInFlight,
        });
        Ok(())
    }

    pub(crate) fn announce_turn(&mut self, player: EntityId) {
        self.turn += 1;
        log::info!("Turn {}: {:?} to fire", self.turn, player);
        self.events.push(GameEvent::TurnStarted {
            player,
            turn: self.turn,
        });
        self.events.push(GameEvent::PhaseChanged {
            phase: GamePhase::AwaitingInput,
        });
    }

    /// Move a dead entity from the living roster and turn order to the dead roster
    pub(crate) fn bury(&mut self, id: EntityId) {
        let removed = self.turns.remove(id);
        debug_assert!(removed, "{:?} died twice", id);
        self.dead.push(id);
        log::info!("{:?} eliminated", id);
        self.events.push(GameEvent::Eliminated { entity: id });
    }

    pub(crate) fn end_game(&mut self, outcome: Outcome) {
        debug_assert!(self.outcome.is_none(), "game over fired twice");
        match outcome {
            Outcome::Champion(id) => {
                let label = self.entity(id).map(|e| e.label.as_str()).unwrap_or("?");
                log::info!("Game over: {} is champion", label);
            }
            Outcome::Draw => log::info!("Game over: draw"),
        }
        self.outcome = Some(outcome);
        self.events.push(GameEvent::PhaseChanged {
            phase: GamePhase::GameOver,
        });
        self.events.push(GameEvent::GameOver { outcome });
    }

    /// Stop the explosion animation, if one is running
    pub(crate) fn finish_explosion(&mut self) {
        if let Some(explosion) = self.explosion.take() {
            explosion.finish();
            self.events.push(GameEvent::ExplosionFinished);
        }
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.turns.phase()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// All entities, living and dead, in seating order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Player whose turn it is
    pub fn active_player(&self) -> Option<&Entity> {
        self.turns.active().and_then(|id| self.entity(id))
    }

    /// Living players in turn order, active first
    pub fn living(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.turns.order().filter_map(|id| self.entity(id))
    }

    pub fn turn_order(&self) -> Vec<EntityId> {
        self.turns.order().collect()
    }

    pub fn dead(&self) -> &[EntityId] {
        &self.dead
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// The projectile in the air, if any
    pub fn projectile(&self) -> Option<&Projectile> {
        self.flight.as_ref().map(Flight::projectile)
    }

    pub fn explosion(&self) -> Option<&Explosion> {
        self.explosion.as_ref()
    }

    /// Number of repeating timers currently running (never more than two)
    pub fn running_timers(&self) -> usize {
        self.flight.is_some() as usize + self.explosion.is_some() as usize
    }

    /// Health table for the HUD, in turn order
    pub fn scoreboard(&self) -> Vec<ScoreboardRow> {
        let active = self.turns.active();
        self.living()
            .map(|e| ScoreboardRow {
                id: e.id,
                label: e.label.clone(),
                health: e.health(),
                active: Some(e.id) == active,
            })
            .collect()
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShotRejected;

    #[test]
    fn test_start_seeds_mirrored_players() {
        let mut session = GameSession::start(Tuning::default()).unwrap();
        let t = Tuning::default();
        let e = session.entities();
        assert_eq!(e.len(), 2);
        assert!((e[0].pos.x - t.arena_width * 0.1).abs() < 1e-3);
        assert!((e[1].pos.x - t.arena_width * 0.9).abs() < 1e-3);
        assert_eq!(e[0].pos.y, e[1].pos.y);
        assert_eq!(e[0].pos.y + t.entity_height / 2.0, t.ground_line());
        assert!(e.iter().all(|e| e.health() == 100));

        assert_eq!(session.phase(), GamePhase::AwaitingInput);
        assert_eq!(session.active_player().map(|e| e.id), Some(EntityId(1)));
        let events = session.drain_events();
        assert_eq!(
            events[0],
            GameEvent::TurnStarted {
                player: EntityId(1),
                turn: 1
            }
        );
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_invalid_tuning_refused() {
        let tuning = Tuning {
            gravity: -1.0,
            ..Default::default()
        };
        assert!(GameSession::start(tuning).is_err());
    }

    #[test]
    fn test_commit_starts_flight_from_shooter_top() {
        let mut session = GameSession::start(Tuning::default()).unwrap();
        session.commit_shot(Shot::new(45.0, 600.0)).unwrap();
        assert_eq!(session.phase(), GamePhase::ProjectileInFlight);
        let p = session.projectile().unwrap();
        let shooter = &session.entities()[0];
        assert_eq!(p.owner, shooter.id);
        assert_eq!(p.pos, Vec2::new(shooter.pos.x, shooter.top()));
        // Clamped to 100 before launch
        assert!((p.step.length() - 10.0).abs() < 1e-3);
        assert_eq!(session.running_timers(), 1);
    }

    #[test]
    fn test_second_shot_same_turn_ignored() {
        let mut session = GameSession::start(Tuning::default()).unwrap();
        session.commit_shot(Shot::new(45.0, 50.0)).unwrap();
        let before = session.projectile().cloned();
        let err = session.commit_shot(Shot::new(10.0, 90.0)).unwrap_err();
        assert!(matches!(err, ShotRejected::NotAwaitingInput { .. }));
        assert_eq!(session.projectile().map(|p| p.step), before.map(|p| p.step));
    }

    #[test]
    fn test_bad_shot_keeps_turn_open() {
        let mut session = GameSession::start(Tuning::default()).unwrap();
        assert_eq!(
            session.commit_shot(Shot::new(f32::NAN, 50.0)),
            Err(ShotRejected::NonFiniteInput)
        );
        assert_eq!(session.phase(), GamePhase::AwaitingInput);
        assert!(session.commit_shot(Shot::new(45.0, 50.0)).is_ok());
    }

    #[test]
    fn test_scoreboard_marks_active() {
        let session = GameSession::start(Tuning::default()).unwrap();
        let rows = session.scoreboard();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].active);
        assert!(!rows[1].active);
        assert_eq!(rows[0].label, PLAYER_COLOURS[0]);
    }

    #[test]
    fn test_single_player_roster_is_over_immediately() {
        let session = GameSession::start_with_roster(
            Tuning::default(),
            Terrain::flat(620.0),
            &[("solo", 100.0)],
        )
        .unwrap();
        assert_eq!(session.outcome(), Some(Outcome::Champion(EntityId(1))));
        assert_eq!(session.phase(), GamePhase::GameOver);
    }
}
