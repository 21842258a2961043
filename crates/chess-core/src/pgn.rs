//! PGN parsing utilities — lightweight regex-based parser.

use regex::Regex;
use thiserror::Error;

use crate::game_data::{GameData, GameMetadata};

#[derive(Error, Debug)]
pub enum PgnError {
    #[error("invalid PGN: {0}")]
    Invalid(&'static str),
}

/// Parse a PGN string into a GameData struct.
///
/// Headers the analysis does not use are ignored. A transcript with tag
/// headers but no movetext is a valid empty game; a transcript with
/// neither is a parse failure, distinct from the empty-game case.
pub fn parse_pgn(pgn: &str) -> Result<GameData, PgnError> {
    if pgn.trim().is_empty() {
        return Err(PgnError::Invalid("empty input"));
    }

    let header_re = Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#)
        .map_err(|_| PgnError::Invalid("header pattern"))?;

    let mut metadata = GameMetadata::default();
    let mut saw_header = false;

    for cap in header_re.captures_iter(pgn) {
        saw_header = true;
        let value = cap[2].to_string();
        match &cap[1] {
            "White" => metadata.white = value,
            "Black" => metadata.black = value,
            "Date" => metadata.date = value,
            "Result" => metadata.result = value,
            _ => {}
        }
    }

    let moves = extract_moves(pgn);

    if !saw_header && moves.is_empty() {
        return Err(PgnError::Invalid("no headers and no movetext"));
    }

    Ok(GameData { metadata, moves })
}

/// Extract SAN moves from PGN text (after removing headers, comments, variations).
fn extract_moves(pgn: &str) -> Vec<String> {
    // Remove headers
    let header_re = Regex::new(r"\[[^\]]*\]").unwrap();
    let no_headers = header_re.replace_all(pgn, "");

    // Remove comments
    let comment_re = Regex::new(r"\{[^}]*\}").unwrap();
    let no_comments = comment_re.replace_all(&no_headers, "");

    // Remove variations
    let variation_re = Regex::new(r"\([^)]*\)").unwrap();
    let no_variations = variation_re.replace_all(&no_comments, "");

    // Extract moves
    let move_re =
        Regex::new(r"[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](?:=[QRBN])?[+#]?|O-O-O|O-O").unwrap();

    move_re
        .find_iter(&no_variations)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pgn_basic() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[Date "2025.01.15"]

1. e4 e5 2. Nf3 Nc6 1-0"#;

        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.metadata.white, "Player1");
        assert_eq!(game.metadata.black, "Player2");
        assert_eq!(game.metadata.result, "1-0");
        assert_eq!(game.metadata.date, "2025.01.15");
        assert_eq!(game.moves.len(), 4);
        assert_eq!(game.moves[0], "e4");
    }

    #[test]
    fn test_missing_headers_default() {
        let game = parse_pgn("1. d4 d5 2. c4").unwrap();
        assert_eq!(game.metadata.white, "Unknown");
        assert_eq!(game.metadata.black, "Unknown");
        assert_eq!(game.metadata.date, "Unknown");
        assert_eq!(game.metadata.result, "*");
        assert_eq!(game.moves, vec!["d4", "d5", "c4"]);
    }

    #[test]
    fn test_comments_and_variations_stripped() {
        let pgn = r#"[White "A"]

1. e4 {best by test} e5 (1... c5 2. Nf3) 2. Nf3 *"#;
        let game = parse_pgn(pgn).unwrap();
        assert_eq!(game.moves, vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_headers_but_no_moves_is_empty_game() {
        let pgn = r#"[White "A"]
[Black "B"]
"#;
        let game = parse_pgn(pgn).unwrap();
        assert!(game.moves.is_empty());
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(parse_pgn("not a chess game at all, sorry").is_err());
        assert!(parse_pgn("   ").is_err());
    }
}
