use chessboard_sense::coord::{Col, Coord, Row};
use chessboard_sense::feedback::{BoardFeedback, SquareFeedback};
use chessboard_sense::placement::Placement;
use chessboard_sense::reconciler::GameState;
use console::Style;
use itertools::Itertools;


pub fn render_state(state: &GameState) -> String {
    match state {
        GameState::SettingUp { observed_placement, can_start_game } => {
            let status = if *can_start_game {
                "Pieces are in the starting position."
            } else {
                "Set up the pieces."
            };
            format!("{}{}", render_grid(observed_placement, None), status)
        }
        GameState::Playing {
            position,
            feedback,
            returned,
            pending_side,
            turn_side,
        } => {
            let mut status = format!("{} to move.", turn_side.name());
            if let Some(pending_side) = pending_side {
                status.push_str(&format!(" {} can still change their move.", pending_side.name()));
            }
            if feedback.has_errors() {
                status.push_str(" The board does not match the game.");
            } else if *returned {
                status.push_str(" Board is in sync.");
            }
            format!("{}{}", render_grid(&position.placement, Some(feedback)), status)
        }
        GameState::GameOver { position, ending } => {
            format!("{}{}", render_grid(&position.placement, None), ending.message(position))
        }
    }
}

fn render_grid(placement: &Placement, feedback: Option<&BoardFeedback>) -> String {
    let colors = [
        Style::new().color256(233).on_color256(222),
        Style::new().color256(233).on_color256(230),
    ];
    let lifted = Style::new().color256(233).on_yellow();
    let error = Style::new().white().on_red();
    let mut ret = String::new();
    for row in Row::all().collect_vec().into_iter().rev() {
        ret.push_str(&format_square(row.to_algebraic()));
        for col in Col::all() {
            let coord = Coord::new(row, col);
            let square_feedback = feedback.and_then(|f| f.squares()[coord].as_ref());
            let square = match square_feedback {
                None => {
                    let color_idx = (coord.row.to_zero_based() + coord.col.to_zero_based()) % 2;
                    colors[usize::from(color_idx)]
                        .apply_to(format_square(pictogram(placement, coord)))
                        .to_string()
                }
                Some(SquareFeedback::Lifted { piece }) => {
                    lifted.apply_to(format_square(piece.to_pictogram())).to_string()
                }
                Some(SquareFeedback::Error { .. }) => {
                    error.apply_to(format_square(pictogram(placement, coord))).to_string()
                }
            };
            ret.push_str(&square);
        }
        ret.push('\n');
    }
    ret.push_str(&format_square(' '));
    ret.push_str(&Col::all().map(|col| format_square(col.to_algebraic())).join(""));
    ret.push('\n');
    ret
}

fn pictogram(placement: &Placement, coord: Coord) -> char {
    placement[coord].map_or(' ', |piece| piece.to_pictogram())
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }
