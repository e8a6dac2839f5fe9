// Sensor payload codec. Every byte of the 32-byte payload describes two adjacent squares of one
// rank, one per nibble. Within a rank the bytes run from the h-side to the a-side, and the low
// nibble holds the square further towards the h-file.

use std::fmt;

use enum_map::EnumMap;
use lazy_static::lazy_static;
use static_assertions::const_assert_eq;

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, PieceKind};
use crate::placement::Placement;


pub const PAYLOAD_LEN: usize = 32;

const BYTES_PER_RANK: usize = 4;

// Index is the nibble value; zero means an empty square.
const PIECE_CODES: [Option<Piece>; 13] = {
    use Force::*;
    use PieceKind::*;
    [
        None,
        Some(Piece { kind: Queen, force: Black }),
        Some(Piece { kind: King, force: Black }),
        Some(Piece { kind: Bishop, force: Black }),
        Some(Piece { kind: Pawn, force: Black }),
        Some(Piece { kind: Knight, force: Black }),
        Some(Piece { kind: Rook, force: White }),
        Some(Piece { kind: Pawn, force: White }),
        Some(Piece { kind: Rook, force: Black }),
        Some(Piece { kind: Bishop, force: White }),
        Some(Piece { kind: Knight, force: White }),
        Some(Piece { kind: Queen, force: White }),
        Some(Piece { kind: King, force: White }),
    ]
};

lazy_static! {
    static ref CODE_BY_PIECE: EnumMap<Force, EnumMap<PieceKind, u8>> = {
        let mut codes: EnumMap<Force, EnumMap<PieceKind, u8>> = EnumMap::default();
        for (code, piece) in PIECE_CODES.iter().enumerate() {
            if let Some(piece) = piece {
                codes[piece.force][piece.kind] = code as u8;
            }
        }
        codes
    };
}

const_assert_eq!(PAYLOAD_LEN * 2, (NUM_ROWS * NUM_COLS) as usize);
const_assert_eq!(PAYLOAD_LEN, BYTES_PER_RANK * NUM_ROWS as usize);


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodeError {
    WrongLength { expected: usize, actual: usize },
    InvalidPieceCode { byte_index: usize, code: u8 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::WrongLength { expected, actual } => {
                write!(f, "placement payload has {actual} bytes, expected {expected}")
            }
            DecodeError::InvalidPieceCode { byte_index, code } => {
                write!(f, "invalid piece code {code} in payload byte {byte_index}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Nibble {
    Low,
    High,
}

fn nibble_coord(byte_index: usize, nibble: Nibble) -> Coord {
    let rank_idx = byte_index / BYTES_PER_RANK;
    let pair_idx = (PAYLOAD_LEN - 1 - byte_index) % BYTES_PER_RANK;
    let file_idx = match nibble {
        Nibble::Low => pair_idx * 2 + 1,
        Nibble::High => pair_idx * 2,
    };
    Coord::from_grid_index(rank_idx as u8, file_idx as u8)
}

fn piece_from_code(code: u8, byte_index: usize) -> Result<Option<Piece>, DecodeError> {
    PIECE_CODES
        .get(code as usize)
        .copied()
        .ok_or(DecodeError::InvalidPieceCode { byte_index, code })
}

fn piece_to_code(piece: Option<Piece>) -> u8 {
    piece.map_or(0, |piece| CODE_BY_PIECE[piece.force][piece.kind])
}

pub fn decode_placement(payload: &[u8]) -> Result<Placement, DecodeError> {
    if payload.len() != PAYLOAD_LEN {
        return Err(DecodeError::WrongLength { expected: PAYLOAD_LEN, actual: payload.len() });
    }
    let mut grid = Grid::new();
    for (byte_index, &byte) in payload.iter().enumerate() {
        grid[nibble_coord(byte_index, Nibble::Low)] = piece_from_code(byte & 0x0F, byte_index)?;
        grid[nibble_coord(byte_index, Nibble::High)] = piece_from_code(byte >> 4, byte_index)?;
    }
    Ok(Placement::from_grid(grid))
}

// Inverse of `decode_placement`. This is what a board (real or virtual) would send.
pub fn encode_placement(placement: &Placement) -> [u8; PAYLOAD_LEN] {
    let mut payload = [0; PAYLOAD_LEN];
    for (byte_index, byte) in payload.iter_mut().enumerate() {
        let low = piece_to_code(placement[nibble_coord(byte_index, Nibble::Low)]);
        let high = piece_to_code(placement[nibble_coord(byte_index, Nibble::High)]);
        *byte = (high << 4) | low;
    }
    payload
}
