#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod payload_tools;
mod replay;
mod tui;

use anyhow::Context;
use clap::{Command, arg};
use replay::ConsoleConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Chessboard sense")
        .version(clap::crate_version!())
        .about("Diagnostic tools for sensor chessboards")
        .subcommand_required(true)
        .subcommand(
            Command::new("replay")
                .about("Feeds a recorded game log through the reconciler and prints every state")
                .arg(arg!(<log_file> "Game log: one hex payload per line, optionally timestamped"))
                .arg(arg!(--"config" <config_file> "Yaml-serialized ConsoleConfig")),
        )
        .subcommand(
            Command::new("decode")
                .about("Decodes a placement payload and prints its FEN")
                .arg(arg!(<payload> "32 bytes in hex, dashes allowed")),
        )
        .subcommand(
            Command::new("encode")
                .about("Prints the payload a board would send for a placement")
                .arg(arg!(<fen> "Piece placement in FEN")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("replay", sub_matches)) => {
            let config = match sub_matches.get_one::<String>("config") {
                Some(filename) => read_config_file(filename)?,
                None => ConsoleConfig::default(),
            };
            let log_file = sub_matches
                .get_one::<String>("log_file")
                .context("Missing log file")?;
            replay::run(log_file, &config)
        }
        Some(("decode", sub_matches)) => {
            let payload =
                sub_matches.get_one::<String>("payload").context("Missing payload")?;
            println!("{}", payload_tools::decode(payload)?);
            Ok(())
        }
        Some(("encode", sub_matches)) => {
            let fen = sub_matches.get_one::<String>("fen").context("Missing FEN")?;
            println!("{}", payload_tools::encode(fen)?);
            Ok(())
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}

fn read_config_file(filename: &str) -> anyhow::Result<ConsoleConfig> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read config file '{filename}'."))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file '{filename}'."))
}
