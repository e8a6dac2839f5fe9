// Test utilities shared by unit tests, integration tests and the console.

use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use crate::coord::Coord;
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{Piece, PieceKind};
use crate::placement::Placement;
use crate::report::PLACEMENT_REPORT_ID;
use crate::sensor::{PAYLOAD_LEN, encode_placement};


// In theory random tests verify properties that should always hold, but let's fix the seed to
// avoid sporadic failures.
pub fn deterministic_rng() -> impl Rng { rand::rngs::StdRng::from_seed([0; 32]) }

// Not necessarily a legal chess position: sensors can report anything.
pub fn random_placement(rng: &mut impl Rng) -> Placement {
    let kinds: Vec<PieceKind> = PieceKind::iter().collect();
    Placement::from_grid(Grid::from_fn(|_: Coord| {
        if rng.random_bool(0.4) {
            let kind = kinds[rng.random_range(0..kinds.len())];
            let force = if rng.random_bool(0.5) { Force::White } else { Force::Black };
            Some(Piece::new(kind, force))
        } else {
            None
        }
    }))
}

// The raw report a board would send for the given placement: report id plus a sub-header byte
// followed by the payload.
pub fn placement_report(placement: &Placement) -> (u8, Vec<u8>) {
    let mut data = Vec::with_capacity(PAYLOAD_LEN + 1);
    data.push(0x3d);
    data.extend_from_slice(&encode_placement(placement));
    (PLACEMENT_REPORT_ID, data)
}
