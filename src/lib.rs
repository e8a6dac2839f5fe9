#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod coord;
pub mod error;
pub mod feedback;
pub mod fen;
pub mod force;
pub mod game_log;
pub mod grid;
pub mod move_matcher;
pub mod piece;
pub mod placement;
pub mod position;
pub mod reconciler;
pub mod report;
pub mod rules;
pub mod sensor;
pub mod session;
pub mod standard_rules;
pub mod test_util;
