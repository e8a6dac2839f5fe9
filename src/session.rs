use std::sync::{Arc, Mutex, MutexGuard, PoisonError, mpsc};

use crate::reconciler::{GameState, Reconciler};
use crate::rules::{GameEnding, RulesEngine};
use crate::sensor::DecodeError;


// Side effects tied to session boundaries, e.g. keeping the screen awake while a game is in
// progress. Errors are reported back so the reconciler can log them; they never affect the game.
pub trait SessionHooks {
    fn on_game_started(&mut self) -> Result<(), String>;
    fn on_game_over(&mut self, ending: GameEnding) -> Result<(), String>;
}

pub struct NoopSessionHooks {}

impl SessionHooks for NoopSessionHooks {
    fn on_game_started(&mut self) -> Result<(), String> { Ok(()) }
    fn on_game_over(&mut self, _ending: GameEnding) -> Result<(), String> { Ok(()) }
}


// Board reports and user commands may arrive from different threads. All of them go through the
// same lock, so a command can never interleave with a report half-way through reconciliation.
pub struct SharedReconciler<R: RulesEngine> {
    inner: Arc<Mutex<Reconciler<R>>>,
}

impl<R: RulesEngine> Clone for SharedReconciler<R> {
    fn clone(&self) -> Self { SharedReconciler { inner: Arc::clone(&self.inner) } }
}

impl<R: RulesEngine> SharedReconciler<R> {
    pub fn new(reconciler: Reconciler<R>) -> Self {
        SharedReconciler { inner: Arc::new(Mutex::new(reconciler)) }
    }

    // A panic in one handler must not wedge the board: the state is consistent between calls,
    // so recovering from poisoning is safe.
    pub fn lock(&self) -> MutexGuard<'_, Reconciler<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn handle_report(&self, report_id: u8, data: &[u8]) {
        self.lock().handle_report(report_id, data);
    }
    pub fn handle_payload(&self, payload: &[u8]) -> Result<(), DecodeError> {
        self.lock().handle_payload(payload)
    }
    pub fn start_game(&self) { self.lock().start_game(); }
    pub fn take_back(&self) { self.lock().take_back(); }
    pub fn state(&self) -> GameState { self.lock().state().clone() }
    pub fn subscribe(&self, events_tx: mpsc::Sender<GameState>) { self.lock().subscribe(events_tx); }
    pub fn unsubscribe(&self) { self.lock().unsubscribe(); }
}
