use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


const fn const_char_sub(a: char, b: char) -> u8 {
    let a_idx = a as u32;
    let b_idx = b as u32;
    assert!(a_idx >= b_idx);
    let diff = a_idx - b_idx;
    assert!(diff <= u8::MAX as u32);
    diff as u8
}


// Algebraic row: `Row::_1` is white's home row.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Row {
    idx: u8, // 0-based
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub const fn from_algebraic(idx: char) -> Self {
        Self::from_zero_based(const_char_sub(idx, '1'))
    }
    pub fn try_from_algebraic(idx: char) -> Option<Self> {
        ('1'..='8').contains(&idx).then(|| Self::from_algebraic(idx))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'1') as char }

    // Index in the rank-major layout used by FEN and by the sensor payload: 0 is the 8th rank.
    pub const fn from_rank_index(rank_idx: u8) -> Self {
        assert!(rank_idx < NUM_ROWS);
        Self::from_zero_based(NUM_ROWS - rank_idx - 1)
    }
    pub const fn to_rank_index(self) -> u8 { NUM_ROWS - self.idx - 1 }

    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Col {
    idx: u8, // 0-based
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Col {
        assert!(idx < NUM_COLS);
        Col { idx }
    }
    pub const fn from_algebraic(idx: char) -> Self {
        Self::from_zero_based(const_char_sub(idx, 'a'))
    }
    pub fn try_from_algebraic(idx: char) -> Option<Self> {
        ('a'..='h').contains(&idx).then(|| Self::from_algebraic(idx))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }

    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (col, row) = s.chars().collect_tuple()?;
        Some(Coord {
            row: Row::try_from_algebraic(row)?,
            col: Col::try_from_algebraic(col)?,
        })
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }

    pub const fn from_grid_index(rank_idx: u8, file_idx: u8) -> Self {
        Coord::new(Row::from_rank_index(rank_idx), Col::from_zero_based(file_idx))
    }
    pub const fn to_grid_index(self) -> (u8, u8) {
        (self.row.to_rank_index(), self.col.to_zero_based())
    }

    // Iterates in FEN order: a8, b8, ..., h8, a7, ..., h1.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..NUM_ROWS)
            .cartesian_product(0..NUM_COLS)
            .map(|(rank_idx, file_idx)| Coord::from_grid_index(rank_idx, file_idx))
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({}{})", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}


impl Row {
    pub const _1: Row = Row::from_algebraic('1');
    pub const _2: Row = Row::from_algebraic('2');
    pub const _7: Row = Row::from_algebraic('7');
    pub const _8: Row = Row::from_algebraic('8');
}

macro_rules! coord_constants {
    ($($name:ident = $col:literal $row:literal),* $(,)?) => {
        impl Coord {
            $(pub const $name: Coord = Coord::new(Row::from_algebraic($row), Col::from_algebraic($col));)*
        }
    };
}

coord_constants! {
    A1 = 'a' '1', B1 = 'b' '1', C1 = 'c' '1', D1 = 'd' '1',
    E1 = 'e' '1', F1 = 'f' '1', G1 = 'g' '1', H1 = 'h' '1',
    A2 = 'a' '2', B2 = 'b' '2', C2 = 'c' '2', D2 = 'd' '2',
    E2 = 'e' '2', F2 = 'f' '2', G2 = 'g' '2', H2 = 'h' '2',
    A3 = 'a' '3', B3 = 'b' '3', C3 = 'c' '3', D3 = 'd' '3',
    E3 = 'e' '3', F3 = 'f' '3', G3 = 'g' '3', H3 = 'h' '3',
    A4 = 'a' '4', B4 = 'b' '4', C4 = 'c' '4', D4 = 'd' '4',
    E4 = 'e' '4', F4 = 'f' '4', G4 = 'g' '4', H4 = 'h' '4',
    A5 = 'a' '5', B5 = 'b' '5', C5 = 'c' '5', D5 = 'd' '5',
    E5 = 'e' '5', F5 = 'f' '5', G5 = 'g' '5', H5 = 'h' '5',
    A6 = 'a' '6', B6 = 'b' '6', C6 = 'c' '6', D6 = 'd' '6',
    E6 = 'e' '6', F6 = 'f' '6', G6 = 'g' '6', H6 = 'h' '6',
    A7 = 'a' '7', B7 = 'b' '7', C7 = 'c' '7', D7 = 'd' '7',
    E7 = 'e' '7', F7 = 'f' '7', G7 = 'g' '7', H7 = 'h' '7',
    A8 = 'a' '8', B8 = 'b' '8', C8 = 'c' '8', D8 = 'd' '8',
    E8 = 'e' '8', F8 = 'f' '8', G8 = 'g' '8', H8 = 'h' '8',
}
