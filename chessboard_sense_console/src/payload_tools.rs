use anyhow::{Context, anyhow};
use chessboard_sense::fen::placement_from_fen;
use chessboard_sense::game_log::{format_payload, parse_payload};
use chessboard_sense::sensor::{decode_placement, encode_placement};


pub fn decode(hex: &str) -> anyhow::Result<String> {
    let payload = parse_payload(hex.trim()).map_err(|err| anyhow!(err))?;
    let placement = decode_placement(&payload).context("Not a placement payload")?;
    Ok(placement.to_fen())
}

pub fn encode(fen: &str) -> anyhow::Result<String> {
    let placement = placement_from_fen(fen).map_err(|err| anyhow!(err))?;
    Ok(format_payload(&encode_placement(&placement)))
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const STARTING_LAYOUT: &str =
        "58233185-44444444-00000000-00000000-00000000-00000000-77777777-a6c99b6a";

    #[test]
    fn encode_starting_layout() {
        assert_eq!(
            encode("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap(),
            STARTING_LAYOUT
        );
    }

    #[test]
    fn decode_starting_layout() {
        assert_eq!(decode(STARTING_LAYOUT).unwrap(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
    }

    #[test]
    fn decode_rejects_short_payload() {
        assert!(decode("58233185").is_err());
        assert!(decode("zz").is_err());
    }
}
