use enum_map::Enum;
use serde::{Deserialize, Serialize};
use strum::EnumIter;


#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    pub fn to_fen(self) -> char {
        match self {
            Force::White => 'w',
            Force::Black => 'b',
        }
    }

    pub fn from_fen(ch: char) -> Option<Force> {
        match ch {
            'w' => Some(Force::White),
            'b' => Some(Force::Black),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Force::White => "White",
            Force::Black => "Black",
        }
    }
}
