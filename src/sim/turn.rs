//! Turn order and phase state machine
//!
//! ```text
//! AwaitingInput -> ProjectileInFlight -> ResolvingImpact -> AwaitingInput
//!                                                       \-> GameOver
//! ```
//!
//! The active player is always the head of the order. A shot is only accepted
//! while awaiting input, and a finished turn rotates the head to the tail.

use std::collections::VecDeque;

use serde::Serialize;

use super::entity::EntityId;
use crate::error::{ShotRejected, ShotResult};

/// Current phase of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active player may fire
    AwaitingInput,
    /// A shot is travelling
    ProjectileInFlight,
    /// Damage is being applied
    ResolvingImpact,
    /// Fewer than two players left (terminal)
    GameOver,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Sole survivor
    Champion(EntityId),
    /// The last players died in the same explosion
    Draw,
}

/// What follows a resolved impact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnEnd {
    NextTurn(EntityId),
    GameOver(Outcome),
}

/// Round-robin over living players
#[derive(Debug, Clone, Serialize)]
pub struct TurnController {
    order: VecDeque<EntityId>,
    phase: GamePhase,
    /// Who fired the shot currently in play
    shooter: Option<EntityId>,
}

impl TurnController {
    /// Start with `order[0]` to play. Fewer than two players is already over.
    pub fn new(order: impl IntoIterator<Item = EntityId>) -> Self {
        let order: VecDeque<EntityId> = order.into_iter().collect();
        let phase = if order.len() < 2 {
            GamePhase::GameOver
        } else {
            GamePhase::AwaitingInput
        };
        Self {
            order,
            phase,
            shooter: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Player whose turn it is (none once the game is over)
    pub fn active(&self) -> Option<EntityId> {
        match self.phase {
            GamePhase::GameOver => None,
            _ => self.order.front().copied(),
        }
    }

    /// Living players, active first
    pub fn order(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.order.contains(&id)
    }

    /// Check that a shot would be accepted right now, without committing it
    pub fn accepting(&self) -> ShotResult<EntityId> {
        match self.phase {
            GamePhase::AwaitingInput => self.order.front().copied().ok_or(ShotRejected::GameOver),
            GamePhase::GameOver => Err(ShotRejected::GameOver),
            phase => Err(ShotRejected::NotAwaitingInput { phase }),
        }
    }

    /// Commit the active player's shot for this turn
    pub fn begin_flight(&mut self) -> ShotResult<EntityId> {
        let shooter = self.accepting()?;
        self.phase = GamePhase::ProjectileInFlight;
        self.shooter = Some(shooter);
        Ok(shooter)
    }

    /// Projectile has landed
    pub fn begin_resolution(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::ProjectileInFlight);
        self.phase = GamePhase::ResolvingImpact;
    }

    /// Drop a dead player from the order immediately
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.order.iter().position(|&e| e == id) {
            Some(index) => {
                self.order.remove(index);
                true
            }
            None => false,
        }
    }

    /// Close the turn: end the game or hand over to the next player
    pub fn finish_turn(&mut self) -> TurnEnd {
        debug_assert_eq!(self.phase, GamePhase::ResolvingImpact);
        let shooter = self.shooter.take();

        if self.order.len() < 2 {
            self.phase = GamePhase::GameOver;
            return TurnEnd::GameOver(match self.order.front() {
                Some(&champion) => Outcome::Champion(champion),
                None => Outcome::Draw,
            });
        }

        // A shooter who blew themselves up is already gone and the next
        // player is at the head
        if self.order.front().copied() == shooter {
            self.order.rotate_left(1);
        }
        self.phase = GamePhase::AwaitingInput;
        TurnEnd::NextTurn(self.order[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<EntityId> {
        (1..=n).map(EntityId).collect()
    }

    fn play_turn(turns: &mut TurnController, dead: &[EntityId]) -> TurnEnd {
        turns.begin_flight().unwrap();
        turns.begin_resolution();
        for &id in dead {
            turns.remove(id);
        }
        turns.finish_turn()
    }

    #[test]
    fn test_round_robin() {
        let mut turns = TurnController::new(ids(3));
        assert_eq!(turns.active(), Some(EntityId(1)));
        assert_eq!(play_turn(&mut turns, &[]), TurnEnd::NextTurn(EntityId(2)));
        assert_eq!(play_turn(&mut turns, &[]), TurnEnd::NextTurn(EntityId(3)));
        assert_eq!(play_turn(&mut turns, &[]), TurnEnd::NextTurn(EntityId(1)));
        assert_eq!(turns.order().collect::<Vec<_>>(), ids(3));
    }

    #[test]
    fn test_one_shot_per_turn() {
        let mut turns = TurnController::new(ids(2));
        turns.begin_flight().unwrap();
        assert_eq!(
            turns.begin_flight(),
            Err(ShotRejected::NotAwaitingInput {
                phase: GamePhase::ProjectileInFlight
            })
        );
        turns.begin_resolution();
        assert_eq!(
            turns.accepting(),
            Err(ShotRejected::NotAwaitingInput {
                phase: GamePhase::ResolvingImpact
            })
        );
    }

    #[test]
    fn test_champion() {
        let mut turns = TurnController::new(ids(2));
        let end = play_turn(&mut turns, &[EntityId(2)]);
        assert_eq!(end, TurnEnd::GameOver(Outcome::Champion(EntityId(1))));
        assert_eq!(turns.phase(), GamePhase::GameOver);
        assert_eq!(turns.active(), None);
        assert_eq!(turns.begin_flight(), Err(ShotRejected::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut turns = TurnController::new(ids(2));
        let end = play_turn(&mut turns, &[EntityId(1), EntityId(2)]);
        assert_eq!(end, TurnEnd::GameOver(Outcome::Draw));
    }

    #[test]
    fn test_shooter_suicide_does_not_skip_next_player() {
        let mut turns = TurnController::new(ids(3));
        let end = play_turn(&mut turns, &[EntityId(1)]);
        assert_eq!(end, TurnEnd::NextTurn(EntityId(2)));
        assert_eq!(turns.order().collect::<Vec<_>>(), vec![EntityId(2), EntityId(3)]);
    }

    #[test]
    fn test_dead_player_leaves_order_mid_queue() {
        let mut turns = TurnController::new(ids(3));
        assert_eq!(play_turn(&mut turns, &[EntityId(2)]), TurnEnd::NextTurn(EntityId(3)));
        assert_eq!(play_turn(&mut turns, &[]), TurnEnd::NextTurn(EntityId(1)));
    }

    #[test]
    fn test_too_few_players_is_over() {
        let turns = TurnController::new(ids(1));
        assert_eq!(turns.phase(), GamePhase::GameOver);
    }
}
