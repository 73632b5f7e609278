//! # gambit-engine: Hybrid Chess/Poker Combat Engine Core
//!
//! A deterministic two-layer combat engine for a turn-based board game:
//! a chess-like positional layer decides *who* fights, and a poker-based
//! resolution layer decides *who wins* each fight and by how much.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Poker hand evaluation under the 10-tier combat ladder
//! - [`piece`] / [`board`] - Units, positions and match state
//! - [`moves`] - Move/attack legality, check and checkmate detection
//! - [`army`] / [`elements`] - Army configuration and elemental advantage
//! - [`combatant`] / [`rules`] / [`combat`] - The betting resolution engine
//! - [`engine`] - The orchestrator gluing both layers together
//! - [`logger`] - Combat history records and JSONL serialization
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use gambit_engine::cards::{Card, Rank, Suit};
//! use gambit_engine::hand::{evaluate_hand, Tier};
//!
//! // Evaluate a 5-card combat hand
//! let cards = [
//!     Card::new(Suit::Hearts, Rank::Ace),
//!     Card::new(Suit::Hearts, Rank::King),
//!     Card::new(Suit::Hearts, Rank::Queen),
//!     Card::new(Suit::Hearts, Rank::Jack),
//!     Card::new(Suit::Hearts, Rank::Ten),
//! ];
//! let hand = evaluate_hand(&cards);
//! assert_eq!(hand.tier, Tier::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All combat outcomes are reproducible using seeded RNG:
//!
//! ```rust
//! use gambit_engine::deck::Deck;
//!
//! // Same seed produces the same shuffle
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.deal_card(), deck2.deal_card());
//! ```
//!
//! ## Action Validation
//!
//! Betting actions validate against the acting side's health and stamina:
//!
//! ```rust
//! use gambit_engine::rules::{validate_action, ValidatedAction};
//! use gambit_engine::combatant::CombatAction;
//!
//! // Committing more HP than the side has left becomes an all-in
//! let validated = validate_action(8, 2, 0, CombatAction::Attack(20));
//! assert_eq!(validated, Ok(ValidatedAction::AllIn(8)));
//! ```

pub mod army;
pub mod board;
pub mod cards;
pub mod combat;
pub mod combatant;
pub mod deck;
pub mod elements;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod moves;
pub mod piece;
pub mod rules;
