// Reconciles what the board sensors report with the game as the rules engine knows it.
//
// The board cannot tell us which move was made, only where the pieces stand. So after every
// report we ask: does the board match the expected position? If not, is a single piece in hand?
// Was the last move physically taken back? Does the board show the result of a legal move, or of
// a different legal move than the one we already recorded? If nothing fits, the discrepancy is
// shown to the player and we wait for the board to change.

use std::sync::mpsc;

use instant::Instant;
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::feedback::BoardFeedback;
use crate::force::Force;
use crate::game_log::GameLog;
use crate::log_internal_error;
use crate::move_matcher::find_matching_move;
use crate::placement::Placement;
use crate::position::Position;
use crate::report::{SensorReport, classify_report};
use crate::rules::{GameEnding, LegalMove, RulesEngine};
use crate::sensor::{DecodeError, decode_placement};
use crate::session::{NoopSessionHooks, SessionHooks};


#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum GameState {
    // Pieces are being arranged; no game yet.
    SettingUp {
        observed_placement: Placement,
        can_start_game: bool,
    },
    Playing {
        // Expected position according to the moves recognized so far.
        position: Position,
        // How the board differs from `position`.
        feedback: BoardFeedback,
        // The board has been confirmed to match `position` (after a lift, an undo or a take-back).
        returned: bool,
        // Side whose last move can still be undone or corrected on the board.
        pending_side: Option<Force>,
        turn_side: Force,
    },
    GameOver {
        position: Position,
        ending: GameEnding,
    },
}

impl GameState {
    pub fn position(&self) -> Option<&Position> {
        match self {
            GameState::SettingUp { .. } => None,
            GameState::Playing { position, .. } | GameState::GameOver { position, .. } => {
                Some(position)
            }
        }
    }
}

struct TurnSide {
    side: Force,
    legal_moves: Vec<LegalMove>,
}

// Kept after a move is applied so that the move can be recognized as physically reverted or
// replaced by another move of the same side.
struct PendingSide {
    side: Force,
    return_placement: Placement,
    legal_moves: Vec<LegalMove>,
}

pub struct Reconciler<R: RulesEngine> {
    rules: R,
    hooks: Box<dyn SessionHooks + Send>,
    state: GameState,
    turn_side: Option<TurnSide>,
    pending_side: Option<PendingSide>,
    last_payload: Option<Vec<u8>>,
    // What the board showed last, regardless of the game phase.
    last_placement: Placement,
    subscriber: Option<mpsc::Sender<GameState>>,
    game_log: GameLog,
}

impl<R: RulesEngine> Reconciler<R> {
    pub fn new(rules: R) -> Self { Self::with_hooks(rules, Box::new(NoopSessionHooks {})) }

    pub fn with_hooks(rules: R, hooks: Box<dyn SessionHooks + Send>) -> Self {
        Reconciler {
            rules,
            hooks,
            state: GameState::SettingUp {
                observed_placement: Placement::empty(),
                can_start_game: false,
            },
            turn_side: None,
            pending_side: None,
            last_payload: None,
            last_placement: Placement::empty(),
            subscriber: None,
            game_log: GameLog::new(Instant::now()),
        }
    }

    pub fn state(&self) -> &GameState { &self.state }
    pub fn rules(&self) -> &R { &self.rules }
    pub fn game_log(&self) -> &GameLog { &self.game_log }
    pub fn last_placement(&self) -> &Placement { &self.last_placement }

    pub fn can_start_game(&self) -> bool {
        matches!(self.state, GameState::SettingUp { can_start_game: true, .. })
    }

    // True until the first move of a game has been recognized.
    pub fn game_starting(&self) -> bool {
        match self.state {
            GameState::SettingUp { .. } => true,
            GameState::Playing { .. } => self.rules.move_history().is_empty(),
            GameState::GameOver { .. } => false,
        }
    }

    // Replaces the previous subscriber, if any.
    pub fn subscribe(&mut self, events_tx: mpsc::Sender<GameState>) {
        self.subscriber = Some(events_tx);
    }
    pub fn unsubscribe(&mut self) { self.subscriber = None; }

    pub fn handle_report(&mut self, report_id: u8, data: &[u8]) {
        match classify_report(report_id, data) {
            SensorReport::Placement(payload) => {
                if let Err(err) = self.handle_payload(payload) {
                    warn!("Dropping placement report: {err}");
                }
            }
            SensorReport::Heartbeat | SensorReport::UnknownAck(_) | SensorReport::Other { .. } => {}
        }
    }

    // Processes one placement payload. Identical consecutive payloads are ignored.
    pub fn handle_payload(&mut self, payload: &[u8]) -> Result<(), DecodeError> {
        if self.last_payload.as_deref() == Some(payload) {
            trace!("Placement unchanged");
            return Ok(());
        }
        let placement = decode_placement(payload)?;
        debug!("Placement changed: {}", placement.to_fen());
        self.last_payload = Some(payload.to_vec());
        self.game_log.add_payload(payload, Instant::now());
        self.last_placement = placement.clone();
        self.handle_placement(placement);
        Ok(())
    }

    pub fn start_game(&mut self) {
        if !self.can_start_game() {
            debug!("Ignoring start: board is not in the starting layout");
            return;
        }
        self.rules.reset();
        let position = self.rules.current_position();
        self.turn_side = Some(TurnSide {
            side: position.side_to_move,
            legal_moves: self.rules.legal_moves(),
        });
        self.pending_side = None;
        // One log per game, opening with the starting layout so that it replays on its own.
        let now = Instant::now();
        self.game_log = GameLog::new(now);
        if let Some(payload) = &self.last_payload {
            self.game_log.add_payload(payload, now);
        }
        info!("Game started");
        if let Err(err) = self.hooks.on_game_started() {
            warn!("Game start hook failed: {err}");
        }
        self.set_playing(position, BoardFeedback::empty(), false);
    }

    // Reverts the last recognized move, whatever the board shows.
    pub fn take_back(&mut self) {
        if !matches!(self.state, GameState::Playing { .. }) {
            debug!("Ignoring take-back: no game in progress");
            return;
        }
        if self.rules.move_history().is_empty() {
            debug!("Ignoring take-back: no moves made");
            return;
        }
        let Some(mv) = self.rules.undo_last_move() else {
            log_internal_error!("rules engine has history but cannot undo");
            return;
        };
        info!("Took back {}", mv.notation);
        let position = self.rules.current_position();
        let feedback = BoardFeedback::build(&position, &self.last_placement);
        let returned = feedback.is_empty();
        self.turn_side = Some(TurnSide {
            side: position.side_to_move,
            legal_moves: self.rules.legal_moves(),
        });
        self.pending_side = None;
        self.set_playing(position, feedback, returned);
    }

    fn handle_placement(&mut self, placement: Placement) {
        match &self.state {
            GameState::SettingUp { .. } => {
                let can_start_game = placement.is_initial();
                self.state = GameState::SettingUp { observed_placement: placement, can_start_game };
                self.emit();
            }
            GameState::Playing { position, .. } => {
                let position = position.clone();
                self.reconcile(position, placement);
            }
            GameState::GameOver { .. } => {
                trace!("Game is over, ignoring placement");
            }
        }
    }

    fn reconcile(&mut self, position: Position, observed: Placement) {
        let Some(turn_force) = self.turn_side.as_ref().map(|t| t.side) else {
            log_internal_error!("playing without turn side");
            return;
        };

        let feedback = BoardFeedback::build(&position, &observed);
        if feedback.is_empty() {
            self.set_playing(position, feedback, true);
            return;
        }

        if feedback.is_lifted_only_for(turn_force) {
            self.pending_side = None;
            self.set_playing(position, feedback, false);
            return;
        }

        if self.pending_side.as_ref().is_some_and(|p| p.return_placement == observed)
            && self.undo_pending_move()
        {
            return;
        }

        let turn_move = self
            .turn_side
            .as_ref()
            .and_then(|turn| find_matching_move(&turn.legal_moves, &observed))
            .cloned();
        if let Some(mv) = turn_move {
            if self.apply_turn_move(&position, mv) {
                return;
            }
        }

        let correction = self
            .pending_side
            .as_ref()
            .and_then(|pending| find_matching_move(&pending.legal_moves, &observed))
            .cloned();
        if let Some(mv) = correction {
            if self.apply_correction(mv) {
                return;
            }
        }

        self.set_playing(position, feedback, false);
    }

    // The board is back where it was before the last move.
    fn undo_pending_move(&mut self) -> bool {
        let Some(mv) = self.rules.undo_last_move() else {
            log_internal_error!("pending move missing from history");
            self.pending_side = None;
            return false;
        };
        let Some(pending) = self.pending_side.take() else {
            return false;
        };
        info!("Move {} reverted on the board", mv.notation);
        let position = Position::new(pending.return_placement, pending.side);
        self.turn_side = Some(TurnSide {
            side: pending.side,
            legal_moves: pending.legal_moves,
        });
        self.set_playing(position, BoardFeedback::empty(), true);
        true
    }

    fn apply_turn_move(&mut self, position: &Position, mv: LegalMove) -> bool {
        if let Err(err) = self.rules.apply_move(&mv) {
            log_internal_error!("cannot apply listed move: {err}");
            return false;
        }
        info!("Detected move: {}", mv.notation);
        let Some(turn_side) = self.turn_side.take() else {
            return false;
        };
        self.pending_side = Some(PendingSide {
            side: turn_side.side,
            return_placement: position.placement.clone(),
            legal_moves: turn_side.legal_moves,
        });
        self.after_move(mv.resulting_position, turn_side.side.opponent());
        true
    }

    // The board shows a different move by the side that has just moved: replace the recorded
    // move with this one.
    fn apply_correction(&mut self, mv: LegalMove) -> bool {
        let Some(previous) = self.rules.undo_last_move() else {
            log_internal_error!("corrected move missing from history");
            return false;
        };
        if let Err(err) = self.rules.apply_move(&mv) {
            log_internal_error!("cannot apply listed move: {err}");
            if let Err(err) = self.rules.apply_move(&previous) {
                log_internal_error!("cannot restore move: {err}");
            }
            return false;
        }
        info!("Detected move: {} (instead of {})", mv.notation, previous.notation);
        let Some(pending_side) = self.pending_side.as_ref().map(|p| p.side) else {
            return false;
        };
        self.after_move(mv.resulting_position, pending_side.opponent());
        true
    }

    fn after_move(&mut self, position: Position, next_side: Force) {
        if let Some(ending) = self.rules.ending() {
            info!("Game over: {ending:?}");
            self.turn_side = None;
            self.pending_side = None;
            if let Err(err) = self.hooks.on_game_over(ending) {
                warn!("Game over hook failed: {err}");
            }
            self.state = GameState::GameOver { position, ending };
            self.emit();
            return;
        }
        self.turn_side = Some(TurnSide {
            side: next_side,
            legal_moves: self.rules.legal_moves(),
        });
        self.set_playing(position, BoardFeedback::empty(), false);
    }

    fn set_playing(&mut self, position: Position, feedback: BoardFeedback, returned: bool) {
        let turn_side = self.turn_side.as_ref().map_or(position.side_to_move, |t| t.side);
        self.state = GameState::Playing {
            position,
            feedback,
            returned,
            pending_side: self.pending_side.as_ref().map(|p| p.side),
            turn_side,
        };
        self.emit();
    }

    fn emit(&mut self) {
        debug!("New state: {:?}", self.state);
        if let Some(events_tx) = &self.subscriber {
            if events_tx.send(self.state.clone()).is_err() {
                debug!("Subscriber is gone");
                self.subscriber = None;
            }
        }
    }
}
