use serde::{Deserialize, Serialize};

use crate::board::Pos;
use crate::elements::Element;

/// The two sides of a match. White armies deploy on ranks 1-2 and move up
/// the board; Black mirrors them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Forward direction of this side's pawns along the y axis.
    pub fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

pub type PieceId = u32;

/// A unit on the board. Health doubles as the betting currency once the
/// piece is dragged into combat; stamina fuels combat raises and is capped
/// at `max_health / 10`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    side: Side,
    pos: Pos,
    health: u32,
    max_health: u32,
    stamina: u32,
    element: Element,
    has_moved: bool,
}

impl Piece {
    pub fn new(id: PieceId, kind: PieceKind, side: Side, pos: Pos, max_health: u32, element: Element) -> Self {
        let mut p = Self {
            id,
            kind,
            side,
            pos,
            health: max_health,
            max_health,
            stamina: 0,
            element,
            has_moved: false,
        };
        p.stamina = p.stamina_cap();
        p
    }

    pub fn id(&self) -> PieceId {
        self.id
    }
    pub fn kind(&self) -> PieceKind {
        self.kind
    }
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn pos(&self) -> Pos {
        self.pos
    }
    pub fn health(&self) -> u32 {
        self.health
    }
    pub fn max_health(&self) -> u32 {
        self.max_health
    }
    pub fn stamina(&self) -> u32 {
        self.stamina
    }
    pub fn element(&self) -> Element {
        self.element
    }
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    pub fn stamina_cap(&self) -> u32 {
        self.max_health / 10
    }

    pub fn set_pos(&mut self, pos: Pos) {
        self.pos = pos;
        self.has_moved = true;
    }

    /// Clamped to `0..=max_health`; negative health never escapes the engine.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn set_stamina(&mut self, stamina: u32) {
        self.stamina = stamina.min(self.stamina_cap());
    }

    pub fn drain_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_sub(amount);
    }

    pub fn restore_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_add(amount).min(self.stamina_cap());
    }
}
