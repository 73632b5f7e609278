//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "gambit",
    version,
    about = "Hybrid chess/poker combat engine CLI"
)]
pub struct GambitCli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run AI-vs-AI match simulations and record JSONL summaries
    Sim {
        /// Number of matches to simulate
        #[arg(long, default_value_t = 1)]
        matches: u64,
        /// Base RNG seed (match i uses seed + i)
        #[arg(long)]
        seed: Option<u64>,
        /// Path to save match summaries (JSONL format)
        #[arg(long)]
        output: Option<String>,
        /// Path to save per-hand combat histories (JSONL format)
        #[arg(long)]
        hands: Option<String>,
        /// Abort a match after this many board moves
        #[arg(long, default_value_t = 300)]
        max_turns: u32,
    },
    /// Evaluate the best combat hand from card codes
    Eval {
        /// Hole cards, e.g. "As Kd"
        #[arg(long)]
        hole: String,
        /// Community cards, e.g. "Qs Js Ts 7h 2c"
        #[arg(long)]
        community: Option<String>,
    },
}
