use std::fmt;

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::fen;
use crate::force::Force;
use crate::placement::{INITIAL, Placement};


#[derive(Clone, PartialEq, Eq, Hash, new, Serialize, Deserialize)]
pub struct Position {
    pub placement: Placement,
    pub side_to_move: Force,
}

impl Position {
    pub fn initial() -> Self { Position::new(INITIAL.clone(), Force::White) }

    pub fn is_initial(&self) -> bool {
        self.side_to_move == Force::White && self.placement.is_initial()
    }

    pub fn from_fen(fen: &str) -> Result<Self, String> { fen::position_from_fen(fen) }
    pub fn to_fen(&self) -> String { fen::position_to_fen(self) }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
