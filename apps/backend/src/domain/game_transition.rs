use crate::domain::state::{GameState, Phase, Seat, Winner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: a second player took a seat.
    PlayerJoined { seat: Seat },

    /// Edge-triggered: the phase moved forward (or reset).
    PhaseChanged { from: Phase, to: Phase },

    /// Edge-triggered: a fresh hand was dealt.
    HandDealt { deal_number: u8 },

    /// Edge-triggered: the turn passed to a specific seat during play.
    TurnBecame { seat: Seat },

    /// Edge-triggered: game reached `finished`.
    GameEnded { winner: Winner },
}

/// Derive transitions from before/after documents.
pub fn derive_game_transitions(before: &GameState, after: &GameState) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    for player in &after.players {
        if before.player(player.id).is_none() {
            transitions.push(GameTransition::PlayerJoined { seat: player.id });
        }
    }

    if before.phase != after.phase {
        transitions.push(GameTransition::PhaseChanged {
            from: before.phase,
            to: after.phase,
        });
    }

    if after.deal_number > before.deal_number {
        transitions.push(GameTransition::HandDealt {
            deal_number: after.deal_number,
        });
    }

    if after.phase.is_play()
        && (before.current_turn != after.current_turn || !before.phase.is_play())
    {
        transitions.push(GameTransition::TurnBecame {
            seat: after.current_turn,
        });
    }

    if before.phase != Phase::Finished && after.phase == Phase::Finished {
        if let Some(winner) = after.winner {
            transitions.push(GameTransition::GameEnded { winner });
        }
    }

    transitions
}
