use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::elements::ElementalBonus;
use crate::errors::EngineError;
use crate::piece::{PieceId, Side};

/// A betting-round action. Health is the only currency: committing HP is
/// how a side attacks, and running out of committable HP is the all-in.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum CombatAction {
    /// Open the round by committing HP over the current match point.
    Attack(u32),
    /// Re-raise an outstanding commitment by an additional amount.
    CounterAttack(u32),
    /// Commit exactly enough to match the opponent's outstanding bet.
    Engage,
    /// Fold. Ends the hand immediately; the committed HP is forfeit.
    Brace,
    /// No stake change; restores one stamina point to the fighting piece.
    Defend,
}

/// Per-side state while a collision resolves through the betting engine.
/// Created when a collision escalates past the instant-kill check and folded
/// back into the owning piece when combat completes.
#[derive(Debug, Clone)]
pub struct CombatantState {
    side: Side,
    piece_id: PieceId,
    hole: [Option<Card>; 2],
    /// HP committed this hand, blind included.
    committed: u32,
    /// One-time forced contribution posted when the hand starts.
    blind: u32,
    /// HP committed since the current street was dealt.
    round_committed: u32,
    pre_combat_health: u32,
    health: u32,
    max_health: u32,
    armor: u32,
    mana: u32,
    stamina: u32,
    stamina_cap: u32,
    buff: ElementalBonus,
    ready: bool,
    mulligan_used: bool,
    /// Seconds spent on the current decision; compared against the combat's
    /// turn-time budget.
    turn_timer: u32,
}

impl CombatantState {
    pub fn new(
        side: Side,
        piece_id: PieceId,
        health: u32,
        max_health: u32,
        stamina: u32,
        stamina_cap: u32,
        mana: u32,
        buff: ElementalBonus,
    ) -> Self {
        Self {
            side,
            piece_id,
            hole: [None, None],
            committed: 0,
            blind: 0,
            round_committed: 0,
            pre_combat_health: health,
            health,
            max_health,
            armor: 0,
            mana,
            stamina,
            stamina_cap,
            buff,
            ready: false,
            mulligan_used: false,
            turn_timer: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }
    pub fn piece_id(&self) -> PieceId {
        self.piece_id
    }
    pub fn committed(&self) -> u32 {
        self.committed
    }
    pub fn blind(&self) -> u32 {
        self.blind
    }
    pub fn round_committed(&self) -> u32 {
        self.round_committed
    }
    pub fn pre_combat_health(&self) -> u32 {
        self.pre_combat_health
    }
    pub fn health(&self) -> u32 {
        self.health
    }
    pub fn max_health(&self) -> u32 {
        self.max_health
    }
    pub fn armor(&self) -> u32 {
        self.armor
    }
    pub fn mana(&self) -> u32 {
        self.mana
    }
    pub fn stamina(&self) -> u32 {
        self.stamina
    }
    pub fn buff(&self) -> ElementalBonus {
        self.buff
    }
    pub fn is_ready(&self) -> bool {
        self.ready
    }
    pub fn mulligan_used(&self) -> bool {
        self.mulligan_used
    }
    pub fn turn_timer(&self) -> u32 {
        self.turn_timer
    }

    pub fn hole_cards(&self) -> Vec<Card> {
        self.hole.iter().flatten().copied().collect()
    }

    pub fn give_card(&mut self, c: Card) -> Result<(), EngineError> {
        if self.hole[0].is_none() {
            self.hole[0] = Some(c);
            Ok(())
        } else if self.hole[1].is_none() {
            self.hole[1] = Some(c);
            Ok(())
        } else {
            Err(EngineError::HoleCardsFull)
        }
    }

    pub fn clear_cards(&mut self) {
        self.hole = [None, None];
    }

    pub(crate) fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
        if ready {
            self.turn_timer = 0;
        }
    }

    pub(crate) fn mark_mulligan_used(&mut self) {
        self.mulligan_used = true;
    }

    /// Moves HP from health into the hand's stake. Caller caps `amount` at
    /// current health; committing everything is the all-in.
    pub(crate) fn commit(&mut self, amount: u32) {
        let amount = amount.min(self.health);
        self.health -= amount;
        self.committed += amount;
        self.round_committed += amount;
    }

    pub(crate) fn post_blind(&mut self, amount: u32) {
        let amount = amount.min(self.health);
        self.health -= amount;
        self.committed += amount;
        self.blind = amount;
    }

    /// Returns committed HP to the pool, clamped at max health.
    pub(crate) fn refund(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Applies a direct HP loss, armor absorbing point-for-point first.
    /// Returns the portion the armor soaked.
    pub(crate) fn absorb_loss(&mut self, amount: u32) -> u32 {
        let absorbed = self.armor.min(amount);
        self.armor -= absorbed;
        self.health = self.health.saturating_sub(amount - absorbed);
        absorbed
    }

    /// Armor absorption for a loss already paid out of health (a forfeited
    /// commitment): the soaked portion flows back as HP. Returns the amount
    /// absorbed.
    pub(crate) fn soak_committed_loss(&mut self, loss: u32) -> u32 {
        let absorbed = self.armor.min(loss);
        self.armor -= absorbed;
        self.health = self.health.saturating_add(absorbed).min(self.max_health);
        absorbed
    }

    pub(crate) fn grant_armor(&mut self, amount: u32) {
        self.armor = amount;
    }

    pub(crate) fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub(crate) fn spend_stamina(&mut self) {
        self.stamina = self.stamina.saturating_sub(1);
    }

    pub(crate) fn restore_stamina(&mut self) {
        self.stamina = self.stamina.saturating_add(1).min(self.stamina_cap);
    }

    pub(crate) fn accrue_timer(&mut self, elapsed: u32) -> u32 {
        self.turn_timer = self.turn_timer.saturating_add(elapsed);
        self.turn_timer
    }

    /// Resets per-hand state for the next hand. Health, armor seeding and
    /// blinds are the combat engine's concern.
    pub(crate) fn reset_for_next_hand(&mut self) {
        self.hole = [None, None];
        self.committed = 0;
        self.blind = 0;
        self.round_committed = 0;
        self.pre_combat_health = self.health;
        self.ready = false;
        self.mulligan_used = false;
        self.turn_timer = 0;
    }

    pub(crate) fn reset_round(&mut self) {
        self.round_committed = 0;
        self.ready = false;
        self.turn_timer = 0;
    }
}
