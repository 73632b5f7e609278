use serde::{Deserialize, Serialize};

use crate::elements::Element;
use crate::errors::EngineError;
use crate::piece::PieceKind;

/// Base configuration for one unit type, consumed only at board
/// initialization (and at pawn promotion, which reuses the queen entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitConfig {
    pub max_health: u32,
    pub element: Element,
}

/// A side's army: one configuration per piece kind. Hero selection and
/// artwork live with the caller; the engine only sees health and affinity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmyConfig {
    pub king: UnitConfig,
    pub queen: UnitConfig,
    pub rook: UnitConfig,
    pub bishop: UnitConfig,
    pub knight: UnitConfig,
    pub pawn: UnitConfig,
}

impl ArmyConfig {
    /// Baseline army used by simulations and tests.
    pub fn standard() -> Self {
        Self {
            king: UnitConfig {
                max_health: 100,
                element: Element::Neutral,
            },
            queen: UnitConfig {
                max_health: 80,
                element: Element::Fire,
            },
            rook: UnitConfig {
                max_health: 60,
                element: Element::Nature,
            },
            bishop: UnitConfig {
                max_health: 50,
                element: Element::Water,
            },
            knight: UnitConfig {
                max_health: 50,
                element: Element::Fire,
            },
            pawn: UnitConfig {
                max_health: 20,
                element: Element::Neutral,
            },
        }
    }

    pub fn unit(&self, kind: PieceKind) -> &UnitConfig {
        match kind {
            PieceKind::King => &self.king,
            PieceKind::Queen => &self.queen,
            PieceKind::Rook => &self.rook,
            PieceKind::Bishop => &self.bishop,
            PieceKind::Knight => &self.knight,
            PieceKind::Pawn => &self.pawn,
        }
    }

    /// Rejects configurations the engine cannot field.
    pub fn validate(&self) -> Result<(), EngineError> {
        let entries = [
            (PieceKind::King, &self.king),
            (PieceKind::Queen, &self.queen),
            (PieceKind::Rook, &self.rook),
            (PieceKind::Bishop, &self.bishop),
            (PieceKind::Knight, &self.knight),
            (PieceKind::Pawn, &self.pawn),
        ];
        for (kind, unit) in entries {
            if unit.max_health == 0 {
                return Err(EngineError::InvalidArmy(format!(
                    "{:?} has zero max health",
                    kind
                )));
            }
        }
        Ok(())
    }
}
