use serde::{Deserialize, Serialize};

/// Elemental affinity carried by every unit. Advantage runs in a cycle:
/// Fire > Nature > Water > Fire. Neutral units neither gain nor grant bonuses.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Nature,
    Neutral,
}

/// Bonuses granted to the advantaged side of a collision. Consumed once per
/// combat hand to seed armor and buffs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ElementalBonus {
    pub has_advantage: bool,
    pub attack_bonus: u32,
    pub health_bonus: u32,
    pub armor_bonus: u32,
}

impl ElementalBonus {
    pub fn none() -> Self {
        Self {
            has_advantage: false,
            attack_bonus: 0,
            health_bonus: 0,
            armor_bonus: 0,
        }
    }
}

pub const ADVANTAGE_ATTACK_BONUS: u32 = 2;
pub const ADVANTAGE_HEALTH_BONUS: u32 = 3;
pub const ADVANTAGE_ARMOR_BONUS: u32 = 4;

/// Looks up the bonus `attacker` receives against `defender`.
pub fn elemental_advantage(attacker: Element, defender: Element) -> ElementalBonus {
    use Element::*;
    let advantaged = matches!(
        (attacker, defender),
        (Fire, Nature) | (Nature, Water) | (Water, Fire)
    );
    if advantaged {
        ElementalBonus {
            has_advantage: true,
            attack_bonus: ADVANTAGE_ATTACK_BONUS,
            health_bonus: ADVANTAGE_HEALTH_BONUS,
            armor_bonus: ADVANTAGE_ARMOR_BONUS,
        }
    } else {
        ElementalBonus::none()
    }
}
