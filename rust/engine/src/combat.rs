//! The betting resolution engine: a phase machine that turns a board
//! collision into a health-transfer outcome over shared community cards.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::combatant::{CombatAction, CombatantState};
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::hand::{compare_hands, evaluate_best_hand, EvaluatedHand};
use crate::piece::Side;
use crate::rules::{validate_action, ValidatedAction};

/// Fixed pre-betting damage applied by the first-strike bonus.
pub const FIRST_STRIKE_DAMAGE: u32 = 3;
/// HP the showdown loser pays when neither side wagered anything.
pub const CHECK_THROUGH_TAX: u32 = 2;
/// Default per-decision time budget in seconds.
pub const DEFAULT_MAX_TURN_TIME: u32 = 30;
/// Mana pool each combatant brings into the spell window.
pub const STARTING_MANA: u32 = 10;

/// Combat phases, strictly ordered. Faith, Foresight and Destiny deal
/// community cards (3, 1, 1) and each hosts one betting round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    FirstStrike,
    Mulligan,
    SpellPet,
    Faith,
    Foresight,
    Destiny,
    Resolution,
}

impl Phase {
    pub fn name(self) -> &'static str {
        match self {
            Phase::FirstStrike => "first_strike",
            Phase::Mulligan => "mulligan",
            Phase::SpellPet => "spell_pet",
            Phase::Faith => "faith",
            Phase::Foresight => "foresight",
            Phase::Destiny => "destiny",
            Phase::Resolution => "resolution",
        }
    }

    fn is_betting(self) -> bool {
        matches!(self, Phase::Faith | Phase::Foresight | Phase::Destiny)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum ResolutionKind {
    Fold,
    Showdown,
}

/// Immutable outcome of one combat hand, consumed exactly once by the
/// orchestrator. Hands are absent on a fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResolution {
    pub winner: Option<Side>,
    pub kind: ResolutionKind,
    /// (attacker, defender) showdown hands; `None` on fold.
    pub hands: Option<(EvaluatedHand, EvaluatedHand)>,
    /// Net HP the loser actually lost after armor absorption.
    pub damage: u32,
    pub attacker_health: u32,
    pub defender_health: u32,
    /// Fold only: who folded and the HP they forfeited.
    pub fold_penalty: Option<(Side, u32)>,
}

/// Tunables for one combat. The designated `first_strike` side takes the
/// pre-betting damage on the opening hand.
#[derive(Debug, Clone)]
pub struct CombatConfig {
    pub blind: u32,
    pub max_turn_time: u32,
    pub first_strike: Option<Side>,
    pub first_strike_damage: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            blind: 0,
            max_turn_time: DEFAULT_MAX_TURN_TIME,
            first_strike: None,
            first_strike_damage: FIRST_STRIKE_DAMAGE,
        }
    }
}

/// The stateful betting machine for a single collision. Runs hand after
/// hand (health carries over, stakes reset) until a combatant's health
/// reaches zero or the orchestrator ends the combat.
#[derive(Debug)]
pub struct CombatState {
    phase: Phase,
    deck: Deck,
    community: Vec<Card>,
    attacker: CombatantState,
    defender: CombatantState,
    config: CombatConfig,
    all_in: bool,
    hand_count: u32,
    pending_resolution: Option<CombatResolution>,
    transition_pending: bool,
}

impl CombatState {
    /// Starts the first hand: armor seeding, blinds, hole cards. The deck is
    /// dealt as given; shuffle it beforehand unless the deal is scripted.
    pub fn new(
        mut attacker: CombatantState,
        mut defender: CombatantState,
        deck: Deck,
        config: CombatConfig,
    ) -> Result<Self, EngineError> {
        seed_armor(&mut attacker);
        seed_armor(&mut defender);
        let mut combat = Self {
            phase: Phase::FirstStrike,
            deck,
            community: Vec::with_capacity(5),
            attacker,
            defender,
            config,
            all_in: false,
            hand_count: 1,
            pending_resolution: None,
            transition_pending: false,
        };
        combat.post_blinds();
        combat.deal_hole()?;
        Ok(combat)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn hand_count(&self) -> u32 {
        self.hand_count
    }
    pub fn transition_pending(&self) -> bool {
        self.transition_pending
    }

    pub fn attacker(&self) -> &CombatantState {
        &self.attacker
    }
    pub fn defender(&self) -> &CombatantState {
        &self.defender
    }

    pub fn combatant(&self, side: Side) -> &CombatantState {
        if self.attacker.side() == side {
            &self.attacker
        } else {
            &self.defender
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut CombatantState {
        if self.attacker.side() == side {
            &mut self.attacker
        } else {
            &mut self.defender
        }
    }

    pub fn pot(&self) -> u32 {
        self.attacker.committed() + self.defender.committed()
    }

    /// Outstanding HP `side` would have to commit to match the opponent.
    pub fn outstanding(&self, side: Side) -> u32 {
        let opp = self.combatant(side.opponent()).committed();
        opp.saturating_sub(self.combatant(side).committed())
    }

    /// Best hand `side` currently holds, a high-card placeholder before the
    /// Faith cards land.
    pub fn preview(&self, side: Side) -> EvaluatedHand {
        evaluate_best_hand(&self.combatant(side).hole_cards(), &self.community)
    }

    /// Applies one betting action for `side`. Only valid at dealt-card
    /// phases; an all-in showdown closes betting for the rest of the hand.
    pub fn perform_action(
        &mut self,
        side: Side,
        action: CombatAction,
    ) -> Result<ValidatedAction, EngineError> {
        if !self.phase.is_betting() {
            return Err(EngineError::WrongPhase {
                phase: self.phase.name(),
            });
        }
        if self.all_in || self.pending_resolution.is_some() {
            return Err(EngineError::BettingClosed);
        }

        let to_match = self.outstanding(side);
        let actor = self.combatant(side);
        let validated = validate_action(actor.health(), actor.stamina(), to_match, action.clone())?;

        match &validated {
            ValidatedAction::Brace => {
                self.fold(side);
                return Ok(validated);
            }
            ValidatedAction::Defend => {
                let actor = self.combatant_mut(side);
                actor.restore_stamina();
                actor.set_ready(true);
            }
            ValidatedAction::Engage(amount) => {
                let actor = self.combatant_mut(side);
                actor.commit(*amount);
                actor.set_ready(true);
            }
            ValidatedAction::Attack(amount) => {
                let actor = self.combatant_mut(side);
                actor.commit(*amount);
                actor.spend_stamina();
                actor.set_ready(true);
                self.combatant_mut(side.opponent()).set_ready(false);
            }
            ValidatedAction::CounterAttack(total) => {
                let actor = self.combatant_mut(side);
                actor.commit(*total);
                actor.spend_stamina();
                actor.set_ready(true);
                self.combatant_mut(side.opponent()).set_ready(false);
            }
            ValidatedAction::AllIn(amount) => {
                let raising = matches!(
                    action,
                    CombatAction::Attack(_) | CombatAction::CounterAttack(_)
                );
                let raises_over = *amount > to_match;
                let actor = self.combatant_mut(side);
                actor.commit(*amount);
                if raising {
                    actor.spend_stamina();
                }
                actor.set_ready(true);
                if raises_over {
                    self.combatant_mut(side.opponent()).set_ready(false);
                }
            }
        }

        if self.attacker.health() == 0 && self.defender.health() == 0 {
            self.all_in = true;
        }
        Ok(validated)
    }

    fn commitments_matched(&self) -> bool {
        let a = self.attacker.committed();
        let d = self.defender.committed();
        if a == d {
            return true;
        }
        // All-in short-call: the side that cannot cover the difference has
        // nothing left to commit.
        let short = if a < d { &self.attacker } else { &self.defender };
        short.health() == 0
    }

    /// A round settles when both sides are ready and either checked through
    /// or matched the outstanding bet.
    pub fn round_settled(&self) -> bool {
        if self.all_in {
            return true;
        }
        if !(self.attacker.is_ready() && self.defender.is_ready()) {
            return false;
        }
        let checked_through =
            self.attacker.round_committed() == 0 && self.defender.round_committed() == 0;
        checked_through || self.commitments_matched()
    }

    /// Advances the phase machine, dealing community cards as phases open.
    /// Betting phases refuse to advance until their round settles.
    pub fn advance_phase(&mut self) -> Result<Phase, EngineError> {
        if self.pending_resolution.is_some() {
            return Err(EngineError::HandComplete);
        }
        match self.phase {
            Phase::FirstStrike => {
                if let Some(struck) = self.config.first_strike {
                    let damage = self.config.first_strike_damage;
                    self.combatant_mut(struck).absorb_loss(damage);
                }
                self.phase = Phase::Mulligan;
            }
            Phase::Mulligan => {
                self.phase = Phase::SpellPet;
            }
            Phase::SpellPet => {
                self.deal_community(3)?;
                self.open_round(Phase::Faith);
            }
            Phase::Faith => {
                self.require_settled()?;
                self.deal_community(1)?;
                self.open_round(Phase::Foresight);
            }
            Phase::Foresight => {
                self.require_settled()?;
                self.deal_community(1)?;
                self.open_round(Phase::Destiny);
            }
            Phase::Destiny => {
                self.require_settled()?;
                self.phase = Phase::Resolution;
            }
            Phase::Resolution => return Err(EngineError::HandComplete),
        }
        Ok(self.phase)
    }

    fn require_settled(&self) -> Result<(), EngineError> {
        if self.round_settled() {
            Ok(())
        } else {
            Err(EngineError::RoundNotSettled)
        }
    }

    fn open_round(&mut self, phase: Phase) {
        self.phase = phase;
        self.attacker.reset_round();
        self.defender.reset_round();
    }

    /// Hole-card redraw during the mulligan window, once per side per hand.
    pub fn mulligan(&mut self, side: Side, redraw: bool) -> Result<(), EngineError> {
        if self.phase != Phase::Mulligan {
            return Err(EngineError::WrongPhase {
                phase: self.phase.name(),
            });
        }
        if !redraw {
            return Ok(());
        }
        if self.combatant(side).mulligan_used() {
            return Err(EngineError::MulliganUsed);
        }
        self.combatant_mut(side).clear_cards();
        for _ in 0..2 {
            let card = self.deck.deal_card().ok_or(EngineError::DeckExhausted)?;
            self.combatant_mut(side).give_card(card)?;
        }
        self.combatant_mut(side).mark_mulligan_used();
        Ok(())
    }

    /// Accrues decision time against the side(s) still to act. A side that
    /// exhausts the budget gets a default action applied: fold facing an
    /// outstanding bet, defend otherwise. Returns the auto-applied actions.
    pub fn tick(&mut self, elapsed: u32) -> Vec<(Side, CombatAction)> {
        let mut applied = Vec::new();
        if !self.phase.is_betting() || self.all_in || self.pending_resolution.is_some() {
            return applied;
        }
        for side in [self.attacker.side(), self.defender.side()] {
            if self.pending_resolution.is_some() {
                break;
            }
            if self.combatant(side).is_ready() {
                continue;
            }
            let timer = self.combatant_mut(side).accrue_timer(elapsed);
            if timer < self.config.max_turn_time {
                continue;
            }
            let action = if self.outstanding(side) > 0 {
                CombatAction::Brace
            } else {
                CombatAction::Defend
            };
            if self.perform_action(side, action.clone()).is_ok() {
                applied.push((side, action));
            }
        }
        applied
    }

    fn fold(&mut self, folder: Side) {
        let survivor = folder.opponent();
        let recovered = self.combatant(survivor).committed();
        self.combatant_mut(survivor).refund(recovered);

        let penalty = self.combatant(folder).committed();
        let absorbed = self.combatant_mut(folder).soak_committed_loss(penalty);

        let resolution = CombatResolution {
            winner: Some(survivor),
            kind: ResolutionKind::Fold,
            hands: None,
            damage: penalty - absorbed,
            attacker_health: self.attacker.health(),
            defender_health: self.defender.health(),
            fold_penalty: Some((folder, penalty)),
        };
        self.pending_resolution = Some(resolution);
        self.transition_pending = true;
        self.phase = Phase::Resolution;
    }

    /// Resolves the hand. Folds resolve the moment they happen; a showdown
    /// evaluates both hole-card sets against the full community.
    pub fn resolve(&mut self) -> Result<CombatResolution, EngineError> {
        if let Some(resolution) = &self.pending_resolution {
            return Ok(resolution.clone());
        }
        if self.phase != Phase::Resolution {
            return Err(EngineError::HandInProgress);
        }

        let attacker_hand = self.preview(self.attacker.side());
        let defender_hand = self.preview(self.defender.side());
        let winner = match compare_hands(&attacker_hand, &defender_hand) {
            std::cmp::Ordering::Greater => Some(self.attacker.side()),
            std::cmp::Ordering::Less => Some(self.defender.side()),
            std::cmp::Ordering::Equal => None,
        };

        let damage = match winner {
            None => {
                // Draw: both stakes come home, nobody pays the tax.
                let a = self.attacker.committed();
                let d = self.defender.committed();
                self.attacker.refund(a);
                self.defender.refund(d);
                0
            }
            Some(w) => {
                let l = w.opponent();
                let recovered = self.combatant(w).committed();
                self.combatant_mut(w).refund(recovered);

                let committed = self.combatant(l).committed();
                if self.pot() == 0 {
                    // Checked through to showdown: the loser still pays a
                    // small fixed tax.
                    let absorbed = self.combatant_mut(l).absorb_loss(CHECK_THROUGH_TAX);
                    CHECK_THROUGH_TAX - absorbed
                } else {
                    let absorbed = self.combatant_mut(l).soak_committed_loss(committed);
                    committed - absorbed
                }
            }
        };

        let resolution = CombatResolution {
            winner,
            kind: ResolutionKind::Showdown,
            hands: Some((attacker_hand, defender_hand)),
            damage,
            attacker_health: self.attacker.health(),
            defender_health: self.defender.health(),
            fold_penalty: None,
        };
        self.pending_resolution = Some(resolution.clone());
        self.transition_pending = true;
        Ok(resolution)
    }

    /// Begins the next hand after a resolution: stakes, ready flags and
    /// community reset; health carries forward; armor is re-seeded. The
    /// single transition flag keeps rapid repeated resolution events from
    /// double-starting a hand.
    pub fn next_hand(&mut self) -> Result<(), EngineError> {
        if !self.transition_pending {
            return Err(EngineError::NoTransitionPending);
        }
        self.transition_pending = false;
        self.pending_resolution = None;
        self.all_in = false;
        self.hand_count += 1;
        self.community.clear();
        self.deck.shuffle();
        self.attacker.reset_for_next_hand();
        self.defender.reset_for_next_hand();
        seed_armor(&mut self.attacker);
        seed_armor(&mut self.defender);
        self.post_blinds();
        self.deal_hole()?;
        // First strike is an opening-hand bonus only.
        self.phase = Phase::Mulligan;
        Ok(())
    }

    fn post_blinds(&mut self) {
        let blind = self.config.blind;
        if blind > 0 {
            self.attacker.post_blind(blind);
            self.defender.post_blind(blind);
        }
    }

    fn deal_hole(&mut self) -> Result<(), EngineError> {
        for _ in 0..2 {
            let card = self.deck.deal_card().ok_or(EngineError::DeckExhausted)?;
            self.attacker.give_card(card)?;
            let card = self.deck.deal_card().ok_or(EngineError::DeckExhausted)?;
            self.defender.give_card(card)?;
        }
        Ok(())
    }

    fn deal_community(&mut self, n: usize) -> Result<(), EngineError> {
        self.deck.burn_card();
        for _ in 0..n {
            let card = self.deck.deal_card().ok_or(EngineError::DeckExhausted)?;
            self.community.push(card);
        }
        Ok(())
    }
}

fn seed_armor(combatant: &mut CombatantState) {
    let buff = combatant.buff();
    if buff.has_advantage {
        combatant.grant_armor(buff.armor_bonus);
    }
}
