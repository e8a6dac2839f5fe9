use log::debug;
use shakmaty::fen::Fen;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, Color, EnPassantMode, File, Move, Position as _, Rank,
    Role, Square,
};

use crate::coord::Coord;
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, PieceKind};
use crate::placement::Placement;
use crate::position::Position;
use crate::rules::{GameEnding, LegalMove, RulesEngine, RulesError};


const FIFTY_MOVE_RULE_HALFMOVES: u32 = 100;
const REPETITIONS_FOR_DRAW: usize = 3;


// Everything that makes two positions "the same" for the purpose of the repetition draw.
#[derive(Clone, PartialEq, Eq)]
struct RepetitionKey {
    board: Board,
    turn: Color,
    castling_rights: Bitboard,
    ep_square: Option<Square>,
}

impl RepetitionKey {
    fn of(chess: &Chess) -> Self {
        RepetitionKey {
            board: chess.board().clone(),
            turn: chess.turn(),
            castling_rights: chess.castles().castling_rights(),
            ep_square: chess.ep_square(EnPassantMode::Legal),
        }
    }
}

#[derive(Clone)]
struct AppliedMove {
    before: Chess,
    mv: LegalMove,
}

// Standard chess rules backed by `shakmaty`.
#[derive(Clone)]
pub struct StandardRules {
    chess: Chess,
    history: Vec<AppliedMove>,
    // One entry per position reached, including the starting one.
    repetition_keys: Vec<RepetitionKey>,
}

impl StandardRules {
    pub fn new() -> Self { Self::from_chess(Chess::default()) }

    // Starts from an arbitrary position. The history is empty, so moves made before this position
    // do not count towards repetition.
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let setup: Fen = fen.parse().map_err(|err| format!("invalid FEN: {err}"))?;
        let chess: Chess = setup
            .into_position(CastlingMode::Standard)
            .map_err(|err| format!("invalid position: {err}"))?;
        Ok(Self::from_chess(chess))
    }

    fn from_chess(chess: Chess) -> Self {
        let repetition_keys = vec![RepetitionKey::of(&chess)];
        StandardRules { chess, history: Vec::new(), repetition_keys }
    }

    fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.repetition_keys.last() else {
            return false;
        };
        self.repetition_keys.iter().filter(|&key| key == current).count() >= REPETITIONS_FOR_DRAW
    }
}

impl Default for StandardRules {
    fn default() -> Self { Self::new() }
}

impl RulesEngine for StandardRules {
    fn reset(&mut self) { *self = Self::new(); }

    fn legal_moves(&self) -> Vec<LegalMove> {
        self.chess
            .legal_moves()
            .iter()
            .map(|m| {
                let mut after = self.chess.clone();
                after.play_unchecked(m);
                LegalMove::new(move_notation(m), position_from_chess(&after))
            })
            .collect()
    }

    fn apply_move(&mut self, mv: &LegalMove) -> Result<(), RulesError> {
        let m = self
            .chess
            .legal_moves()
            .into_iter()
            .find(|m| move_notation(m) == mv.notation)
            .ok_or_else(|| RulesError::IllegalMove(mv.notation.clone()))?;
        let before = self.chess.clone();
        self.chess.play_unchecked(&m);
        debug!("Applied {}, now {}", mv.notation, position_from_chess(&self.chess).to_fen());
        self.history.push(AppliedMove {
            before,
            mv: LegalMove::new(mv.notation.clone(), position_from_chess(&self.chess)),
        });
        self.repetition_keys.push(RepetitionKey::of(&self.chess));
        Ok(())
    }

    fn undo_last_move(&mut self) -> Option<LegalMove> {
        let applied = self.history.pop()?;
        self.chess = applied.before;
        self.repetition_keys.pop();
        Some(applied.mv)
    }

    fn ending(&self) -> Option<GameEnding> {
        if self.chess.is_checkmate() {
            Some(GameEnding::Checkmate)
        } else if self.chess.is_stalemate() {
            Some(GameEnding::Stalemate)
        } else if self.chess.is_insufficient_material() {
            Some(GameEnding::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            Some(GameEnding::ThreefoldRepetition)
        } else if self.chess.halfmoves() >= FIFTY_MOVE_RULE_HALFMOVES {
            Some(GameEnding::FiftyMoveRule)
        } else {
            None
        }
    }

    fn current_position(&self) -> Position { position_from_chess(&self.chess) }

    fn side_to_move(&self) -> Force { force_from_color(self.chess.turn()) }

    fn move_history(&self) -> Vec<LegalMove> {
        self.history.iter().map(|applied| applied.mv.clone()).collect()
    }
}


// Long algebraic notation, e.g. "e2e4", "e7e8q", "e1g1".
fn move_notation(m: &Move) -> String { m.to_uci(CastlingMode::Standard).to_string() }

fn force_from_color(color: Color) -> Force {
    match color {
        Color::White => Force::White,
        Color::Black => Force::Black,
    }
}

fn kind_from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn to_square(coord: Coord) -> Square {
    Square::from_coords(
        File::new(coord.col.to_zero_based().into()),
        Rank::new(coord.row.to_zero_based().into()),
    )
}

fn position_from_chess(chess: &Chess) -> Position {
    let board = chess.board();
    let placement = Placement::from_grid(Grid::from_fn(|coord| {
        board
            .piece_at(to_square(coord))
            .map(|piece| Piece::new(kind_from_role(piece.role), force_from_color(piece.color)))
    }));
    Position::new(placement, force_from_color(chess.turn()))
}
