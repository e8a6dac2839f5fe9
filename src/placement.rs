use std::fmt;
use std::ops;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::coord::{Col, Coord, Row};
use crate::fen;
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, PieceKind};


lazy_static! {
    pub static ref INITIAL: Placement = Placement::initial();
    pub static ref EMPTY: Placement = Placement::empty();
}


// What stands on each of the 64 squares, regardless of whose turn it is.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    squares: Grid<Piece>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SquareChange {
    pub from: Option<Piece>,
    pub to: Option<Piece>,
}

impl SquareChange {
    pub fn reversed(self) -> Self { SquareChange { from: self.to, to: self.from } }
}

pub type PlacementDiff = Grid<SquareChange>;

impl Placement {
    pub fn empty() -> Self { Placement { squares: Grid::new() } }

    pub fn initial() -> Self {
        use PieceKind::*;
        const BACK_ROW: [PieceKind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut squares = Grid::new();
        for (col, kind) in Col::all().zip(BACK_ROW) {
            squares[Coord::new(Row::_1, col)] = Some(Piece::new(kind, Force::White));
            squares[Coord::new(Row::_2, col)] = Some(Piece::new(Pawn, Force::White));
            squares[Coord::new(Row::_7, col)] = Some(Piece::new(Pawn, Force::Black));
            squares[Coord::new(Row::_8, col)] = Some(Piece::new(kind, Force::Black));
        }
        Placement { squares }
    }

    pub fn from_grid(squares: Grid<Piece>) -> Self { Placement { squares } }

    pub fn grid(&self) -> &Grid<Piece> { &self.squares }

    pub fn is_initial(&self) -> bool { *self == *INITIAL }

    pub fn with_piece(mut self, coord: Coord, piece: Option<Piece>) -> Self {
        self.squares[coord] = piece;
        self
    }

    pub fn num_pieces(&self) -> usize { self.squares.count() }

    // Per-square change from `self` to `other`; unchanged squares are `None`.
    pub fn diff(&self, other: &Placement) -> PlacementDiff {
        Grid::from_fn(|coord| {
            let from = self[coord];
            let to = other[coord];
            (from != to).then_some(SquareChange { from, to })
        })
    }

    pub fn to_fen(&self) -> String { fen::placement_to_fen(self) }
}

impl ops::Index<Coord> for Placement {
    type Output = Option<Piece>;
    fn index(&self, coord: Coord) -> &Self::Output { &self.squares[coord] }
}

impl Default for Placement {
    fn default() -> Self { Self::empty() }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Placement({})", self.to_fen())
    }
}
