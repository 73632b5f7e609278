//! # Gambit CLI Library
//!
//! Command-line interface for the hybrid chess/poker combat engine. The
//! primary entry point is [`run`], which parses arguments and dispatches to
//! the subcommand handlers with injected output streams so tests can
//! capture everything the binary would print.
//!
//! ## Available Subcommands
//!
//! - `sim`: Run AI-vs-AI match simulations and record JSONL summaries
//! - `eval`: Evaluate the best combat hand from card codes
//!
//! ## Example Usage
//!
//! ```
//! use std::io;
//! let args = vec!["gambit", "eval", "--hole", "As Ks"];
//! let code = gambit_cli::run(args, &mut io::sink(), &mut io::sink());
//! assert_eq!(code, 0);
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;

pub mod cli;
mod commands;
mod error;

use cli::{Commands, GambitCli};
use commands::{handle_eval_command, handle_sim_command};
pub use error::CliError;

/// Parses command-line arguments and executes the selected subcommand.
///
/// Returns the process exit code: `0` for success (help and version
/// included), `2` for errors.
pub fn run<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let parsed = match GambitCli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(out, "{}", e);
                    0
                }
                _ => {
                    let _ = write!(err, "{}", e);
                    2
                }
            };
            return code;
        }
    };

    let result = match parsed.command {
        Commands::Sim {
            matches,
            seed,
            output,
            hands,
            max_turns,
        } => handle_sim_command(matches, output, hands, seed, max_turns, out, err),
        Commands::Eval { hole, community } => {
            handle_eval_command(&hole, community.as_deref(), out, err)
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "error: {}", e);
            2
        }
    }
}
