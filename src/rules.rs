use std::fmt;

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::position::Position;


// A move as offered by the rules engine, together with the position it leads to. The resulting
// position is what the board is expected to show once the move is physically completed.
#[derive(Clone, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct LegalMove {
    pub notation: String,
    pub resulting_position: Position,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GameEnding {
    Checkmate,
    Stalemate,
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
    OtherDraw,
}

impl GameEnding {
    // The winner is the side that delivered mate, i.e. the side that is *not* to move in the final
    // position. All other endings are draws.
    pub fn winner(self, final_position: &Position) -> Option<Force> {
        match self {
            GameEnding::Checkmate => Some(final_position.side_to_move.opponent()),
            _ => None,
        }
    }

    pub fn message(self, final_position: &Position) -> String {
        match self {
            GameEnding::Checkmate => format!(
                "The game has ended in checkmate! {} wins.",
                self.winner(final_position).map_or("Nobody", Force::name)
            ),
            GameEnding::Stalemate => "The game has ended in stalemate!".to_owned(),
            GameEnding::ThreefoldRepetition => {
                "The game has ended in a draw by threefold repetition.".to_owned()
            }
            GameEnding::InsufficientMaterial => {
                "The game has ended in a draw due to insufficient material.".to_owned()
            }
            GameEnding::FiftyMoveRule => {
                "The game has ended in a draw by the fifty-move rule.".to_owned()
            }
            GameEnding::OtherDraw => "The game has ended.".to_owned(),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RulesError {
    IllegalMove(String),
}

impl fmt::Display for RulesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RulesError::IllegalMove(notation) => write!(f, "illegal move: {notation}"),
        }
    }
}

impl std::error::Error for RulesError {}


// Chess rules as seen by the reconciler. Implementations own the game: its current position and
// the history of applied moves. The reconciler never tries to reason about chess on its own.
pub trait RulesEngine {
    // Resets to the standard starting position with an empty history.
    fn reset(&mut self);

    // Legal moves in the engine's current position; there is no way to ask about an arbitrary
    // position. The reconciler only calls this right after `reset`, `apply_move` or
    // `undo_last_move`, and caches the result for as long as it needs moves of an older position.
    // The order must be deterministic: when several moves lead to the same placement, the first
    // one wins.
    fn legal_moves(&self) -> Vec<LegalMove>;

    fn apply_move(&mut self, mv: &LegalMove) -> Result<(), RulesError>;

    fn undo_last_move(&mut self) -> Option<LegalMove>;

    // `Some` iff the game is over in the current position.
    fn ending(&self) -> Option<GameEnding>;

    fn current_position(&self) -> Position;

    fn side_to_move(&self) -> Force { self.current_position().side_to_move }

    fn move_history(&self) -> Vec<LegalMove>;
}
