//! The combat orchestrator: sequences legality, trigger decisions, betting
//! and board mutation into one synchronous surface.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::army::ArmyConfig;
use crate::board::{BoardState, GameStatus, Pos};
use crate::combat::{
    CombatConfig, CombatResolution, CombatState, Phase, FIRST_STRIKE_DAMAGE, STARTING_MANA,
};
use crate::combatant::{CombatAction, CombatantState};
use crate::deck::Deck;
use crate::elements::elemental_advantage;
use crate::errors::EngineError;
use crate::moves::{self, MateKind, MoveSet};
use crate::piece::{PieceId, PieceKind, Side};
use crate::rules::ValidatedAction;

/// Match-level tunables shared by every combat in the match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Base RNG seed; each combat derives its deck seed from this and the
    /// move counter, so a whole match replays from one number.
    pub seed: u64,
    pub blind: u32,
    pub max_turn_time: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0xB0A4_D99E,
            blind: 0,
            max_turn_time: crate::combat::DEFAULT_MAX_TURN_TIME,
        }
    }
}

/// An attack move that landed on an occupied enemy square. Consumed by the
/// trigger resolver; never persisted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Collision {
    pub attacker: PieceId,
    pub defender: PieceId,
    pub from: Pos,
    pub to: Pos,
    /// True when the attacker is a pawn or king, or the defender is a pawn;
    /// such captures bypass the betting engine entirely.
    pub instant_kill: bool,
}

/// Core game engine gluing the positional layer to the betting layer.
/// All calls are synchronous; the only suspension points are the attack
/// animation handshake and the hand-transition flag.
#[derive(Debug)]
pub struct Engine {
    board: BoardState,
    combat: Option<CombatState>,
    pending_collision: Option<Collision>,
    animation_complete: bool,
    active_collision: Option<Collision>,
    selected_moves: Option<MoveSet>,
    armies: Option<(ArmyConfig, ArmyConfig)>,
    config: MatchConfig,
}

impl Engine {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            board: BoardState::new(),
            combat: None,
            pending_collision: None,
            animation_complete: false,
            active_collision: None,
            selected_moves: None,
            armies: None,
            config,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut BoardState {
        &mut self.board
    }

    pub fn combat(&self) -> Option<&CombatState> {
        self.combat.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    pub fn side_to_move(&self) -> Side {
        self.board.side_to_move()
    }

    pub fn pending_collision(&self) -> Option<Collision> {
        self.pending_collision
    }

    /// Builds the board from two army configurations and opens play.
    pub fn initialize_board(
        &mut self,
        white: &ArmyConfig,
        black: &ArmyConfig,
    ) -> Result<(), EngineError> {
        self.board.setup(white, black)?;
        self.combat = None;
        self.pending_collision = None;
        self.animation_complete = false;
        self.active_collision = None;
        self.selected_moves = None;
        self.armies = Some((white.clone(), black.clone()));
        Ok(())
    }

    /// Selects a piece of the side to move and caches its legal squares.
    pub fn select_piece(&mut self, id: PieceId) -> Result<&MoveSet, EngineError> {
        self.require_playing()?;
        let piece = self.board.piece(id).ok_or(EngineError::PieceNotFound(id))?;
        if piece.side() != self.board.side_to_move() {
            return Err(EngineError::NotYourTurn { side: piece.side() });
        }
        let set = moves::legal_moves(&self.board, id);
        self.board.set_selected(Some(id));
        self.selected_moves = Some(set);
        // cached set lives exactly as long as the selection
        Ok(self.selected_moves.as_ref().unwrap_or(&EMPTY_MOVES))
    }

    /// Legal moves and attacks for any piece, without changing the selection.
    pub fn valid_moves(&self, id: PieceId) -> Result<MoveSet, EngineError> {
        if self.board.piece(id).is_none() {
            return Err(EngineError::PieceNotFound(id));
        }
        Ok(moves::legal_moves(&self.board, id))
    }

    /// Moves the selected piece. A quiet move mutates the board and passes
    /// the turn. An attack returns a `Collision`: instant kills resolve on
    /// the spot, anything else parks behind the animation handshake until
    /// [`Engine::complete_attack_animation`] is called.
    pub fn move_piece(&mut self, target: Pos) -> Result<Option<Collision>, EngineError> {
        self.require_playing()?;
        let id = self.board.selected().ok_or(EngineError::NoSelection)?;
        let set = self
            .selected_moves
            .clone()
            .ok_or(EngineError::NoSelection)?;

        if set.contains_move(target) {
            self.board.apply_move(id, target)?;
            self.finish_turn();
            return Ok(None);
        }

        if set.contains_attack(target) {
            let attacker = self.board.piece(id).ok_or(EngineError::PieceNotFound(id))?;
            let defender = match self.board.piece_at(target) {
                Some(d) => d,
                None => {
                    warn!("attack target {} is empty, rejecting", target);
                    return Err(EngineError::IllegalMove { to: target });
                }
            };
            let collision = Collision {
                attacker: attacker.id(),
                defender: defender.id(),
                from: attacker.pos(),
                to: target,
                instant_kill: matches!(attacker.kind(), PieceKind::Pawn | PieceKind::King)
                    || defender.kind() == PieceKind::Pawn,
            };
            if collision.instant_kill {
                self.board.remove_piece(collision.defender);
                self.board.apply_move(collision.attacker, target)?;
                self.finish_turn();
            } else {
                self.pending_collision = Some(collision);
                self.animation_complete = false;
                self.board.set_selected(None);
                self.selected_moves = None;
            }
            return Ok(Some(collision));
        }

        Err(EngineError::IllegalMove { to: target })
    }

    /// Signals that the attack animation finished; the pending collision can
    /// now escalate into combat.
    pub fn complete_attack_animation(&mut self) -> Result<Collision, EngineError> {
        let collision = self
            .pending_collision
            .ok_or(EngineError::NoPendingAnimation)?;
        self.animation_complete = true;
        Ok(collision)
    }

    /// Escalates the acknowledged collision into the betting engine. Seeds
    /// elemental armor/buffs and the first-strike bonus, snapshots both
    /// pieces into combatants and freezes the board in `Combat` status.
    pub fn initialize_poker_combat(&mut self) -> Result<(), EngineError> {
        if self.combat.is_some() {
            return Err(EngineError::CombatInProgress);
        }
        let collision = self
            .pending_collision
            .ok_or(EngineError::NoPendingAnimation)?;
        if !self.animation_complete {
            return Err(EngineError::AnimationPending);
        }

        let (atk_element, def_element) = {
            let attacker = self
                .board
                .piece(collision.attacker)
                .ok_or(EngineError::PieceNotFound(collision.attacker))?;
            let defender = self
                .board
                .piece(collision.defender)
                .ok_or(EngineError::PieceNotFound(collision.defender))?;
            (attacker.element(), defender.element())
        };
        let atk_bonus = elemental_advantage(atk_element, def_element);
        let def_bonus = elemental_advantage(def_element, atk_element);

        // Health bonus lands on the piece before the pre-combat snapshot.
        if atk_bonus.has_advantage {
            if let Some(p) = self.board.piece_mut(collision.attacker) {
                p.heal(atk_bonus.health_bonus);
            }
        }
        if def_bonus.has_advantage {
            if let Some(p) = self.board.piece_mut(collision.defender) {
                p.heal(def_bonus.health_bonus);
            }
        }

        let make_combatant = |board: &BoardState, id: PieceId, bonus| -> Result<CombatantState, EngineError> {
            let piece = board.piece(id).ok_or(EngineError::PieceNotFound(id))?;
            Ok(CombatantState::new(
                piece.side(),
                id,
                piece.health(),
                piece.max_health(),
                piece.stamina(),
                piece.stamina_cap(),
                STARTING_MANA,
                bonus,
            ))
        };
        let attacker = make_combatant(&self.board, collision.attacker, atk_bonus)?;
        let defender = make_combatant(&self.board, collision.defender, def_bonus)?;

        let first_strike = atk_bonus.has_advantage.then_some(defender.side());
        let combat_config = CombatConfig {
            blind: self.config.blind,
            max_turn_time: self.config.max_turn_time,
            first_strike,
            first_strike_damage: FIRST_STRIKE_DAMAGE + atk_bonus.attack_bonus,
        };

        let seed = self
            .config
            .seed
            .wrapping_add((self.board.move_count() as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();

        self.combat = Some(CombatState::new(attacker, defender, deck, combat_config)?);
        self.active_collision = Some(collision);
        self.pending_collision = None;
        self.animation_complete = false;
        self.board.set_status(GameStatus::Combat);
        Ok(())
    }

    pub fn perform_poker_action(
        &mut self,
        side: Side,
        action: CombatAction,
    ) -> Result<ValidatedAction, EngineError> {
        self.combat_mut()?.perform_action(side, action)
    }

    pub fn advance_poker_phase(&mut self) -> Result<Phase, EngineError> {
        self.combat_mut()?.advance_phase()
    }

    pub fn poker_mulligan(&mut self, side: Side, redraw: bool) -> Result<(), EngineError> {
        self.combat_mut()?.mulligan(side, redraw)
    }

    /// Accrues decision time and applies timeout defaults. See
    /// [`CombatState::tick`].
    pub fn tick_combat(&mut self, elapsed: u32) -> Result<Vec<(Side, CombatAction)>, EngineError> {
        Ok(self.combat_mut()?.tick(elapsed))
    }

    pub fn resolve_poker_combat(&mut self) -> Result<CombatResolution, EngineError> {
        self.combat_mut()?.resolve()
    }

    /// Starts the next hand of an undecided combat. Health carries forward;
    /// stakes and community reset.
    pub fn start_next_hand(&mut self, resolution: &CombatResolution) -> Result<(), EngineError> {
        if resolution.attacker_health == 0 || resolution.defender_health == 0 {
            return Err(EngineError::CombatFinished);
        }
        self.combat_mut()?.next_hand()
    }

    /// Applies a decided combat to the board: health and stamina fold back
    /// into the pieces, the dead piece is removed, a victorious attacker
    /// advances into the vacated square, and the turn passes.
    pub fn resolve_combat(&mut self, resolution: &CombatResolution) -> Result<(), EngineError> {
        let combat = self.combat.as_ref().ok_or(EngineError::NoCombatInProgress)?;
        if resolution.attacker_health != combat.attacker().health()
            || resolution.defender_health != combat.defender().health()
        {
            warn!("stale combat resolution, applying current combat state");
        }
        let attacker_down = combat.attacker().health() == 0;
        let defender_down = combat.defender().health() == 0;
        if !attacker_down && !defender_down {
            return Err(EngineError::CombatUnfinished);
        }

        let collision = self.active_collision.ok_or(EngineError::NoCombatInProgress)?;
        for combatant in [combat.attacker().clone(), combat.defender().clone()] {
            match self.board.piece_mut(combatant.piece_id()) {
                Some(piece) => {
                    piece.set_health(combatant.health());
                    piece.set_stamina(combatant.stamina());
                }
                None => warn!(
                    "combatant piece {} vanished before resolution, skipping",
                    combatant.piece_id()
                ),
            }
        }

        if defender_down {
            self.board.remove_piece(collision.defender);
            self.board.apply_move(collision.attacker, collision.to)?;
        } else {
            self.board.remove_piece(collision.attacker);
        }

        self.combat = None;
        self.active_collision = None;
        self.board.set_status(GameStatus::Playing);
        self.finish_turn();
        Ok(())
    }

    /// Divine Command callback: mines only ever ask for a stamina deduction
    /// on the piece that landed on them.
    pub fn deduct_stamina(&mut self, id: PieceId, amount: u32) -> Result<(), EngineError> {
        match self.board.piece_mut(id) {
            Some(piece) => {
                piece.drain_stamina(amount);
                Ok(())
            }
            None => {
                warn!("stamina deduction for missing piece {}, skipping", id);
                Err(EngineError::PieceNotFound(id))
            }
        }
    }

    fn combat_mut(&mut self) -> Result<&mut CombatState, EngineError> {
        self.combat.as_mut().ok_or(EngineError::NoCombatInProgress)
    }

    fn require_playing(&self) -> Result<(), EngineError> {
        if self.board.status() != GameStatus::Playing {
            return Err(EngineError::NotPlaying);
        }
        if self.pending_collision.is_some() {
            return Err(EngineError::AnimationPending);
        }
        Ok(())
    }

    /// Promotion, check re-evaluation, mate detection and turn handoff.
    fn finish_turn(&mut self) {
        let mover = self.board.side_to_move();

        if let Some(pawn_id) = moves::promotable_pawn(&self.board, mover) {
            let queen = self.armies.as_ref().map(|(white, black)| match mover {
                Side::White => white.queen.clone(),
                Side::Black => black.queen.clone(),
            });
            match queen {
                Some(queen) => {
                    let _ = self.board.promote_pawn(pawn_id, &queen);
                }
                None => warn!("no army configuration for promotion, leaving pawn"),
            }
        }

        self.board.pass_turn();
        self.selected_moves = None;
        let next = self.board.side_to_move();

        if self.board.king_of(next).is_none() {
            self.board.set_status(GameStatus::SideWins(mover));
            return;
        }

        let checked = moves::is_king_in_check(&self.board, next);
        self.board.set_in_check(checked.then_some(next));

        match moves::mate_state(&self.board, next) {
            Some(MateKind::Checkmate) | Some(MateKind::Stalemate) => {
                self.board.set_status(GameStatus::SideWins(mover));
            }
            None => {}
        }
    }
}

static EMPTY_MOVES: MoveSet = MoveSet {
    moves: Vec::new(),
    attacks: Vec::new(),
};
