use crate::feedback::BoardFeedback;
use crate::placement::Placement;
use crate::rules::LegalMove;


// Finds the move that explains the observed placement. When several moves lead to the same
// placement (this can only happen with fake or variant rules), the earliest one in engine order
// wins.
pub fn find_matching_move<'a>(
    legal_moves: &'a [LegalMove], observed: &Placement,
) -> Option<&'a LegalMove> {
    legal_moves
        .iter()
        .find(|mv| BoardFeedback::build(&mv.resulting_position, observed).is_empty())
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Coord;
    use crate::force::Force;
    use crate::piece::{Piece, PieceKind};
    use crate::placement::INITIAL;
    use crate::position::Position;
    use crate::rules::RulesEngine;
    use crate::standard_rules::StandardRules;

    #[test]
    fn finds_completed_move() {
        let moves = StandardRules::new().legal_moves();
        let observed = INITIAL
            .clone()
            .with_piece(Coord::G1, None)
            .with_piece(Coord::F3, Some(Piece::new(PieceKind::Knight, Force::White)));
        assert_eq!(find_matching_move(&moves, &observed).unwrap().notation, "g1f3");
    }

    #[test]
    fn half_made_move_does_not_match() {
        let moves = StandardRules::new().legal_moves();
        let observed = INITIAL.clone().with_piece(Coord::G1, None);
        assert_eq!(find_matching_move(&moves, &observed), None);
        assert_eq!(find_matching_move(&moves, &INITIAL), None);
    }

    #[test]
    fn first_match_wins() {
        let target = INITIAL.clone().with_piece(Coord::A2, None);
        let moves = vec![
            LegalMove::new("x".to_owned(), Position::initial()),
            LegalMove::new("first".to_owned(), Position::new(target.clone(), Force::Black)),
            LegalMove::new("second".to_owned(), Position::new(target.clone(), Force::Black)),
        ];
        assert_eq!(find_matching_move(&moves, &target).unwrap().notation, "first");
    }
}
