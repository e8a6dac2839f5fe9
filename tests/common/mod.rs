// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::sync::mpsc;

use chessboard_sense::placement::Placement;
use chessboard_sense::reconciler::{GameState, Reconciler};
use chessboard_sense::rules::RulesEngine;
use chessboard_sense::session::{NoopSessionHooks, SessionHooks};
use chessboard_sense::standard_rules::StandardRules;
use chessboard_sense::test_util::placement_report;


#[macro_export]
macro_rules! piece {
    ($force:ident $kind:ident) => {
        chessboard_sense::piece::Piece {
            force: chessboard_sense::force::Force::$force,
            kind: chessboard_sense::piece::PieceKind::$kind,
        }
    };
}


// A reconciler wired to a virtual board: tests put pieces on the board and read back the states
// the UI would receive.
pub struct TestBoard<R: RulesEngine> {
    pub reconciler: Reconciler<R>,
    events_rx: mpsc::Receiver<GameState>,
}

impl<R: RulesEngine> TestBoard<R> {
    #[allow(dead_code)]
    pub fn new(rules: R) -> Self { Self::with_hooks(rules, Box::new(NoopSessionHooks {})) }

    #[allow(dead_code)]
    pub fn with_hooks(rules: R, hooks: Box<dyn SessionHooks + Send>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        let mut reconciler = Reconciler::with_hooks(rules, hooks);
        reconciler.subscribe(events_tx);
        TestBoard { reconciler, events_rx }
    }

    #[allow(dead_code)]
    pub fn show(&mut self, placement: &Placement) {
        let (report_id, data) = placement_report(placement);
        self.reconciler.handle_report(report_id, &data);
    }

    // Shows the placement and returns the states emitted in response.
    #[allow(dead_code)]
    pub fn show_and_take(&mut self, placement: &Placement) -> Vec<GameState> {
        self.show(placement);
        self.take_events()
    }

    #[allow(dead_code)]
    pub fn take_events(&self) -> Vec<GameState> { self.events_rx.try_iter().collect() }

    #[allow(dead_code)]
    pub fn history(&self) -> Vec<String> {
        self.reconciler.rules().move_history().into_iter().map(|mv| mv.notation).collect()
    }
}

// Board showing the starting layout with the game started. Setup events are discarded.
#[allow(dead_code)]
pub fn started_board() -> TestBoard<StandardRules> {
    let mut board = TestBoard::new(StandardRules::new());
    board.show(&Placement::initial());
    board.reconciler.start_game();
    board.take_events();
    board
}

// Plays the moves (long algebraic, space-separated) from the starting position and makes the
// board show the result of each one in turn.
#[allow(dead_code)]
pub fn play_on_board<R: RulesEngine>(board: &mut TestBoard<R>, moves: &str) {
    let mut rules = StandardRules::new();
    for notation in moves.split_whitespace() {
        apply(&mut rules, notation);
        board.show(&rules.current_position().placement);
    }
}

#[allow(dead_code)]
pub fn placement_after(moves: &str) -> Placement {
    let mut rules = StandardRules::new();
    for notation in moves.split_whitespace() {
        apply(&mut rules, notation);
    }
    rules.current_position().placement
}

fn apply(rules: &mut StandardRules, notation: &str) {
    let mv = rules
        .legal_moves()
        .into_iter()
        .find(|mv| mv.notation == notation)
        .unwrap_or_else(|| panic!("{notation} is not legal"));
    rules.apply_move(&mv).unwrap();
}
