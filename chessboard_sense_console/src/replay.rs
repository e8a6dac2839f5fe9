use std::sync::mpsc;
use std::thread;

use anyhow::{Context, anyhow};
use chessboard_sense::game_log::GameLog;
use chessboard_sense::reconciler::{GameState, Reconciler};
use chessboard_sense::rules::RulesEngine;
use chessboard_sense::standard_rules::StandardRules;
use instant::Instant;
use itertools::Itertools;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::tui;


#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    // Start the game as soon as the board shows the starting layout.
    pub auto_start_game: bool,
    pub render_boards: bool,
    // Print every state as a JSON line.
    pub json_events: bool,
    // Wait between payloads as long as the recording did.
    pub realtime: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            auto_start_game: true,
            render_boards: true,
            json_events: false,
            realtime: false,
        }
    }
}

pub fn run(log_file: &str, config: &ConsoleConfig) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(log_file)
        .with_context(|| format!("Failed to read game log '{log_file}'."))?;
    let entries = GameLog::parse(&text).map_err(|err| anyhow!("{log_file}: {err}"))?;
    info!("Replaying {} payloads from {log_file}", entries.len());

    let (events_tx, events_rx) = mpsc::channel();
    let mut reconciler = Reconciler::new(StandardRules::new());
    reconciler.subscribe(events_tx);

    let replay_start = Instant::now();
    for (idx, entry) in entries.iter().enumerate() {
        if config.realtime {
            let target = replay_start + entry.elapsed;
            let now = Instant::now();
            if target > now {
                thread::sleep(target - now);
            }
        }
        if let Err(err) = reconciler.handle_payload(&entry.payload) {
            warn!("Payload {}: {err}", idx + 1);
            continue;
        }
        if config.auto_start_game && reconciler.can_start_game() {
            reconciler.start_game();
        }
        for state in events_rx.try_iter() {
            print_state(&state, config)?;
        }
    }

    let moves = reconciler.rules().move_history().iter().map(|mv| &mv.notation).join(" ");
    println!("Moves: {moves}");
    if let GameState::GameOver { position, ending } = reconciler.state() {
        println!("{}", ending.message(position));
    }
    Ok(())
}

fn print_state(state: &GameState, config: &ConsoleConfig) -> anyhow::Result<()> {
    if config.json_events {
        println!("{}", serde_json::to_string(state).context("Failed to serialize state.")?);
    }
    if config.render_boards {
        println!("{}\n", tui::render_state(state));
    }
    Ok(())
}
