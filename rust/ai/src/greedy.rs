//! Greedy baseline opponent.
//!
//! Board play is a single-ply material grab: attacks are scored by target
//! value, quiet moves by forward progress, and a small seeded jitter breaks
//! ties so repeated matches do not loop through identical games. The
//! betting policy is a threshold scheme over the current best-hand preview.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use gambit_engine::board::Pos;
use gambit_engine::combatant::CombatAction;
use gambit_engine::engine::Engine;
use gambit_engine::hand::Tier;
use gambit_engine::moves::legal_moves;
use gambit_engine::piece::{PieceId, PieceKind, Side};

use crate::Opponent;

/// Greedy single-ply opponent with reproducible tie-breaking.
#[derive(Debug, Clone)]
pub struct GreedyOpponent {
    rng: ChaCha20Rng,
}

impl GreedyOpponent {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }

    fn jitter(&mut self) -> i32 {
        self.rng.random_range(0..3)
    }
}

impl Opponent for GreedyOpponent {
    fn choose_move(&mut self, engine: &Engine) -> Option<(PieceId, Pos)> {
        let board = engine.board();
        let side = board.side_to_move();
        let mut best: Option<(i32, PieceId, Pos)> = None;

        let ids: Vec<PieceId> = board.pieces_of(side).map(|p| p.id()).collect();
        for id in ids {
            let piece = match board.piece(id) {
                Some(p) => p,
                None => continue,
            };
            let set = legal_moves(board, id);

            for &target in &set.attacks {
                let mut score = board
                    .piece_at(target)
                    .map(|t| Self::piece_value(t.kind()) * 10)
                    .unwrap_or(0);
                // Finishing captures skip the betting gamble entirely.
                let finishing = matches!(piece.kind(), PieceKind::Pawn | PieceKind::King)
                    || board
                        .piece_at(target)
                        .is_some_and(|t| t.kind() == PieceKind::Pawn);
                if finishing {
                    score += 5;
                }
                score += self.jitter();
                if best.map(|(s, _, _)| score > s).unwrap_or(true) {
                    best = Some((score, id, target));
                }
            }

            for &target in &set.moves {
                let advance = (target.y - piece.pos().y) as i32 * side.forward() as i32;
                let center = 3 - (target.x as i32 - 3).abs().min(3);
                let score = advance * 2 + center + self.jitter();
                if best.map(|(s, _, _)| score > s).unwrap_or(true) {
                    best = Some((score, id, target));
                }
            }
        }

        best.map(|(_, id, pos)| (id, pos))
    }

    fn choose_combat_action(&mut self, engine: &Engine, side: Side) -> CombatAction {
        let combat = match engine.combat() {
            Some(c) => c,
            None => return CombatAction::Defend,
        };
        let me = combat.combatant(side);
        let to_match = combat.outstanding(side);
        let tier = combat.preview(side).tier;

        // Strong made hands press the attack while stamina allows.
        if tier >= Tier::Straight {
            if me.stamina() > 0 && me.health() > to_match {
                let raise = (me.health() / 4).max(1);
                return if to_match == 0 {
                    CombatAction::Attack(raise)
                } else {
                    CombatAction::CounterAttack(raise)
                };
            }
            return if to_match == 0 {
                CombatAction::Defend
            } else {
                CombatAction::Engage
            };
        }

        if tier >= Tier::OnePair {
            if to_match == 0 {
                return CombatAction::Defend;
            }
            if to_match <= me.health() / 4 {
                return CombatAction::Engage;
            }
            return CombatAction::Brace;
        }

        if to_match == 0 {
            CombatAction::Defend
        } else if to_match <= me.health() / 10 {
            CombatAction::Engage
        } else {
            CombatAction::Brace
        }
    }

    fn name(&self) -> &str {
        "GreedyOpponent"
    }
}
