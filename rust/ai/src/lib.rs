//! # gambit-ai: AI Opponent for the Hybrid Combat Engine
//!
//! Provides the opponent implementations the match loop plays against.
//! Strategy strength is intentionally modest: a greedy single-ply board
//! heuristic and a threshold betting policy, both driven by a seeded RNG so
//! simulations replay exactly.
//!
//! ## Core Components
//!
//! - [`Opponent`] - Trait defining the interface for AI decision-making
//! - [`greedy`] - The greedy baseline implementation
//! - [`create_ai`] - Factory function for creating opponents by name
//!
//! ## Quick Start
//!
//! ```rust
//! use gambit_ai::{create_ai, Opponent};
//! use gambit_engine::army::ArmyConfig;
//! use gambit_engine::engine::{Engine, MatchConfig};
//!
//! let mut engine = Engine::new(MatchConfig::default());
//! engine
//!     .initialize_board(&ArmyConfig::standard(), &ArmyConfig::standard())
//!     .expect("standard armies are valid");
//!
//! let mut ai = create_ai("greedy", 42);
//! let planned = ai.choose_move(&engine);
//! assert!(planned.is_some());
//! ```

use gambit_engine::combatant::CombatAction;
use gambit_engine::engine::Engine;
use gambit_engine::board::Pos;
use gambit_engine::piece::{PieceId, Side};

pub mod greedy;

pub use greedy::GreedyOpponent;

/// Interface for AI opponents. One implementor drives both layers: board
/// move selection while the match is in play, and betting actions while a
/// combat is running.
pub trait Opponent: Send + Sync {
    /// Picks a move for the side whose turn it is. `None` means the side
    /// has no legal move at all (the engine will already have ended the
    /// match by then).
    fn choose_move(&mut self, engine: &Engine) -> Option<(PieceId, Pos)>;

    /// Picks a betting action for `side` in the current combat.
    fn choose_combat_action(&mut self, engine: &Engine, side: Side) -> CombatAction;

    /// Identifier of this opponent implementation.
    fn name(&self) -> &str;
}

/// Factory for opponents by type string. Unknown names fall back to the
/// greedy baseline.
pub fn create_ai(kind: &str, seed: u64) -> Box<dyn Opponent> {
    match kind {
        "greedy" => Box::new(GreedyOpponent::with_seed(seed)),
        _ => Box::new(GreedyOpponent::with_seed(seed)),
    }
}
