// Only the first two FEN fields matter here: the placement and the side to move. Castling
// rights, en passant target and move counters are the rules engine's business.

use itertools::Itertools;

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::placement::Placement;
use crate::position::Position;


pub fn placement_to_fen(placement: &Placement) -> String {
    placement
        .grid()
        .ranks()
        .map(|rank| {
            let mut rank_notation = String::new();
            let mut empty_col_count: u8 = 0;
            for square in rank {
                if let Some(piece) = square {
                    if empty_col_count > 0 {
                        rank_notation.push_str(&empty_col_count.to_string());
                        empty_col_count = 0;
                    }
                    rank_notation.push(piece.to_ascii());
                } else {
                    empty_col_count += 1;
                }
            }
            if empty_col_count > 0 {
                rank_notation.push_str(&empty_col_count.to_string());
            }
            rank_notation
        })
        .join("/")
}

// Accepts a bare placement field as well as a full FEN: everything after the first
// whitespace-delimited token is ignored.
pub fn placement_from_fen(fen: &str) -> Result<Placement, String> {
    let placement_notation =
        fen.split_whitespace().next().ok_or_else(|| "invalid FEN: empty string".to_owned())?;
    let ranks = placement_notation.split('/').collect_vec();
    if ranks.len() != NUM_ROWS as usize {
        return Err(format!("invalid FEN: has {} ranks, expected {}", ranks.len(), NUM_ROWS));
    }
    let mut grid = Grid::new();
    for (rank_idx, rank_notation) in ranks.iter().enumerate() {
        let mut col: u32 = 0;
        for ch in rank_notation.chars() {
            if let Some(n) = ch.to_digit(10) {
                col += n;
            } else if let Some(piece) = Piece::from_ascii(ch) {
                if col >= NUM_COLS as u32 {
                    return Err(format!("invalid FEN: rank {} is too long", rank_idx + 1));
                }
                grid[Coord::from_grid_index(rank_idx as u8, col as u8)] = Some(piece);
                col += 1;
            } else {
                return Err(format!("invalid FEN: unknown piece: {ch}"));
            }
        }
        if col != NUM_COLS as u32 {
            return Err(format!(
                "invalid FEN: rank {} has {} columns, expected {}",
                rank_idx + 1,
                col,
                NUM_COLS
            ));
        }
    }
    Ok(Placement::from_grid(grid))
}

pub fn position_to_fen(position: &Position) -> String {
    format!("{} {}", placement_to_fen(&position.placement), position.side_to_move.to_fen())
}

// A missing side field means white to move.
pub fn position_from_fen(fen: &str) -> Result<Position, String> {
    let placement = placement_from_fen(fen)?;
    let side_to_move = match fen.split_whitespace().nth(1) {
        None => Force::White,
        Some(side) => side
            .chars()
            .exactly_one()
            .ok()
            .and_then(Force::from_fen)
            .ok_or_else(|| format!("invalid FEN: invalid side to move: {side}"))?,
    };
    Ok(Position::new(placement, side_to_move))
}
