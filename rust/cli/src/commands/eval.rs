//! Eval command handler: best-hand evaluation from card codes.

use std::io::Write;

use gambit_engine::cards::Card;
use gambit_engine::hand::evaluate_best_hand;

use crate::error::CliError;

/// Parses a whitespace-separated card-code list such as `"As Kd"`.
fn parse_cards(input: &str) -> Result<Vec<Card>, CliError> {
    input
        .split_whitespace()
        .map(|code| code.parse::<Card>().map_err(CliError::InvalidInput))
        .collect()
}

/// Evaluates the best hand from hole cards plus optional community cards
/// and prints the tier, kickers and contributing cards.
pub fn handle_eval_command(
    hole: &str,
    community: Option<&str>,
    out: &mut dyn Write,
    _err: &mut dyn Write,
) -> Result<(), CliError> {
    let hole = parse_cards(hole)?;
    if hole.len() != 2 {
        return Err(CliError::InvalidInput(format!(
            "expected 2 hole cards, got {}",
            hole.len()
        )));
    }
    let community = match community {
        Some(c) => parse_cards(c)?,
        None => Vec::new(),
    };
    if community.len() > 5 {
        return Err(CliError::InvalidInput(format!(
            "expected at most 5 community cards, got {}",
            community.len()
        )));
    }

    let hand = evaluate_best_hand(&hole, &community);
    let cards: Vec<String> = hand.cards.iter().map(|c| c.to_string()).collect();
    writeln!(out, "tier: {:?}", hand.tier)?;
    writeln!(out, "kickers: {:?}", hand.kickers)?;
    writeln!(out, "cards: {}", cards.join(" "))?;
    Ok(())
}
