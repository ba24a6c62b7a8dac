//! Fixed timestep simulation tick
//!
//! Feeds elapsed time to whichever timers are running: the flight timer moves
//! the projectile, the explosion timer grows the blast ring. Landing resolves
//! the impact and closes the turn in the same tick.

use super::impact::{Explosion, resolve_impact};
use super::state::{GameEvent, GameSession};
use super::trajectory::Shot;
use super::turn::{GamePhase, TurnEnd};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Shot released by the active player this tick
    pub shot: Option<Shot>,
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32) {
    if let Some(shot) = input.shot {
        if let Err(err) = session.commit_shot(shot) {
            log::debug!("{}", err);
        }
    }

    advance_explosion(session, dt);
    advance_flight(session, dt);
}

fn advance_explosion(session: &mut GameSession, dt: f32) {
    let Some(explosion) = session.explosion.as_mut() else {
        return;
    };
    let center = explosion.center;
    let frames = explosion.advance(dt);
    session.events.extend(
        frames
            .radii
            .into_iter()
            .map(|radius| GameEvent::ExplosionGrew { center, radius }),
    );
    if frames.done {
        session.finish_explosion();
    }
}

fn advance_flight(session: &mut GameSession, dt: f32) {
    let Some(flight) = session.flight.as_mut() else {
        return;
    };

    let mut landing = None;
    for _ in 0..flight.timer.advance(dt) {
        let Some(step) = flight.trajectory.advance(&session.terrain) else {
            break;
        };
        session.events.push(GameEvent::ProjectileMoved { pos: step.pos });
        if step.landed {
            landing = Some(step.pos);
            break;
        }
    }

    let Some(point) = landing else {
        return;
    };
    if let Some(flight) = session.flight.take() {
        let trajectory = flight.finish();
        log::debug!("Projectile landed after {} ticks", trajectory.ticks());
    }
    resolve_landing(session, point);
}

/// Apply damage at the landing point and close the turn
fn resolve_landing(session: &mut GameSession, point: glam::Vec2) {
    session.turns.begin_resolution();
    session.events.push(GameEvent::PhaseChanged {
        phase: GamePhase::ResolvingImpact,
    });
    session.events.push(GameEvent::Impact { point });

    let radius = session.tuning.explosion_radius;
    let report = resolve_impact(point, radius, session.entities.iter_mut());
    for hit in &report.hits {
        session.events.push(GameEvent::Damaged {
            entity: hit.entity,
            lost: hit.lost,
            health: hit.health,
        });
    }
    for &id in &report.eliminated {
        session.bury(id);
    }

    let t = &session.tuning;
    session.explosion = Some(Explosion::new(
        point,
        t.explosion_start_radius,
        radius,
        t.explosion_growth,
        t.explosion_interval,
    ));

    match session.turns.finish_turn() {
        TurnEnd::NextTurn(player) => session.announce_turn(player),
        TurnEnd::GameOver(outcome) => session.end_game(outcome),
    }
}
