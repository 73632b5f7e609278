use crate::combatant::CombatAction as A;
use crate::errors::EngineError;

/// A combat action after validation against the acting side's health,
/// stamina and the outstanding commitment. Raise payloads carry the TOTAL
/// HP to commit now (outstanding match included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Brace,
    Defend,
    Engage(u32),
    Attack(u32),
    CounterAttack(u32),
    AllIn(u32),
}

/// Validates a combat action according to the betting rules.
///
/// Converts a [`crate::combatant::CombatAction`] into a [`ValidatedAction`],
/// enforcing the HP-as-stakes rules: commitments are capped at the acting
/// side's current health (over-commits become `AllIn` rather than errors),
/// matching a bet the side cannot cover is an all-in short-call, and raising
/// costs one stamina point.
///
/// # Arguments
///
/// * `health` - the acting side's committable HP
/// * `stamina` - the acting piece's remaining stamina points
/// * `to_match` - outstanding commitment the side would need to match
/// * `action` - the requested action
///
/// # Errors
///
/// * [`EngineError::DefendFacingBet`] - defending while a commitment is outstanding
/// * [`EngineError::InvalidCommitment`] - a zero-HP attack
/// * [`EngineError::OutOfStamina`] - raising with no stamina points left
pub fn validate_action(
    health: u32,
    stamina: u32,
    to_match: u32,
    action: A,
) -> Result<ValidatedAction, EngineError> {
    match action {
        A::Brace => Ok(ValidatedAction::Brace),
        A::Defend => {
            if to_match == 0 {
                Ok(ValidatedAction::Defend)
            } else {
                Err(EngineError::DefendFacingBet { to_match })
            }
        }
        A::Engage => {
            if health <= to_match {
                Ok(ValidatedAction::AllIn(health))
            } else {
                Ok(ValidatedAction::Engage(to_match))
            }
        }
        A::Attack(amount) | A::CounterAttack(amount) => {
            if amount == 0 {
                return Err(EngineError::InvalidCommitment {
                    amount,
                    available: health,
                });
            }
            if stamina == 0 {
                return Err(EngineError::OutOfStamina);
            }
            let total = to_match.saturating_add(amount);
            if total >= health {
                Ok(ValidatedAction::AllIn(health))
            } else if to_match == 0 {
                Ok(ValidatedAction::Attack(amount))
            } else {
                Ok(ValidatedAction::CounterAttack(total))
            }
        }
    }
}
