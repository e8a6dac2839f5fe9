use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::force::Force;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::placement::Placement;
use crate::position::Position;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum SquareFeedback {
    // A piece of the side to move has been picked up and is not on the board yet.
    Lifted { piece: Piece },
    // Anything else the board shows that the expected position cannot explain. `prior_piece` is
    // what should be standing on the square.
    Error { prior_piece: Option<Piece> },
}

// How an observed placement differs from the expected position, square by square.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoardFeedback {
    squares: Grid<SquareFeedback>,
}

impl BoardFeedback {
    pub fn empty() -> Self { BoardFeedback { squares: Grid::new() } }

    pub fn build(expected: &Position, observed: &Placement) -> Self {
        let mut squares = Grid::from_fn(|coord| {
            let prior_piece = expected.placement[coord];
            let observed_piece = observed[coord];
            if prior_piece == observed_piece {
                return None;
            }
            match (prior_piece, observed_piece) {
                (Some(piece), None) if piece.force == expected.side_to_move => {
                    Some(SquareFeedback::Lifted { piece })
                }
                _ => Some(SquareFeedback::Error { prior_piece }),
            }
        });

        // One piece in hand is fine. With two or more we cannot tell what the player is doing.
        let lifted: Vec<_> = squares
            .occupied()
            .filter(|(_, feedback)| matches!(feedback, SquareFeedback::Lifted { .. }))
            .map(|(coord, _)| coord)
            .collect();
        if lifted.len() > 1 {
            for coord in lifted {
                squares[coord] = Some(SquareFeedback::Error { prior_piece: None });
            }
        }

        BoardFeedback { squares }
    }

    pub fn squares(&self) -> &Grid<SquareFeedback> { &self.squares }

    pub fn is_empty(&self) -> bool { self.squares.is_empty() }

    pub fn has_errors(&self) -> bool {
        self.squares
            .occupied()
            .any(|(_, feedback)| matches!(feedback, SquareFeedback::Error { .. }))
    }

    // True iff the only discrepancy is a single lifted piece of the given side.
    pub fn is_lifted_only_for(&self, force: Force) -> bool {
        let mut occupied = self.squares.occupied();
        match (occupied.next(), occupied.next()) {
            (Some((_, SquareFeedback::Lifted { piece })), None) => piece.force == force,
            _ => false,
        }
    }
}

impl fmt::Debug for BoardFeedback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let squares = self
            .squares
            .occupied()
            .map(|(coord, feedback)| match feedback {
                SquareFeedback::Lifted { piece } => format!("{coord}: lifted {}", piece.to_ascii()),
                SquareFeedback::Error { prior_piece } => format!(
                    "{coord}: error, expected {}",
                    prior_piece.map_or('-', |piece| piece.to_ascii())
                ),
            })
            .join(", ");
        write!(f, "BoardFeedback({squares})")
    }
}
