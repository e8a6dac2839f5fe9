// Log of raw placement payloads, for reproducing what happened on the physical board. One line
// per payload: the bytes as hex in groups of four joined by dashes, then the number of
// milliseconds since the log was started:
//
//   58233185-44444444-...-a6c99b6a 1534
//
// The same format is read back by `parse`, so a recorded game can be replayed.

use std::time::Duration;

use instant::Instant;
use itertools::Itertools;


const BYTES_PER_GROUP: usize = 4;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameLogEntry {
    pub payload: Vec<u8>,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct GameLog {
    start: Instant,
    entries: Vec<GameLogEntry>,
}

impl GameLog {
    pub fn new(start: Instant) -> Self { GameLog { start, entries: Vec::new() } }

    pub fn add_payload(&mut self, payload: &[u8], now: Instant) {
        self.entries.push(GameLogEntry {
            payload: payload.to_vec(),
            elapsed: now.saturating_duration_since(self.start),
        });
    }

    pub fn entries(&self) -> &[GameLogEntry] { &self.entries }

    pub fn to_text(&self) -> String { self.entries.iter().map(format_entry).join("\n") }

    pub fn parse(text: &str) -> Result<Vec<GameLogEntry>, String> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                parse_entry(line).map_err(|err| format!("line {}: {}", line_idx + 1, err))
            })
            .collect()
    }
}

pub fn format_payload(payload: &[u8]) -> String {
    payload
        .chunks(BYTES_PER_GROUP)
        .map(|group| group.iter().map(|b| format!("{b:02x}")).join(""))
        .join("-")
}

pub fn parse_payload(s: &str) -> Result<Vec<u8>, String> {
    let digits = s.chars().filter(|&ch| ch != '-').collect_vec();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in {s}"));
    }
    digits
        .chunks(2)
        .map(|pair| {
            let byte: String = pair.iter().collect();
            u8::from_str_radix(&byte, 16).map_err(|_| format!("invalid hex byte: {byte}"))
        })
        .collect()
}

fn format_entry(entry: &GameLogEntry) -> String {
    format!("{} {}", format_payload(&entry.payload), entry.elapsed.as_millis())
}

// The timestamp is optional.
fn parse_entry(line: &str) -> Result<GameLogEntry, String> {
    let mut parts = line.split_whitespace();
    let payload = parse_payload(parts.next().unwrap_or_default())?;
    let elapsed = match parts.next() {
        None => Duration::ZERO,
        Some(ms) => Duration::from_millis(
            ms.parse().map_err(|_| format!("invalid timestamp: {ms}"))?,
        ),
    };
    if let Some(extra) = parts.next() {
        return Err(format!("unexpected token: {extra}"));
    }
    Ok(GameLogEntry { payload, elapsed })
}
