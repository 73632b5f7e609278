use std::fmt;

use serde::{Deserialize, Serialize};

use crate::army::{ArmyConfig, UnitConfig};
use crate::errors::EngineError;
use crate::piece::{Piece, PieceId, PieceKind, Side};

pub const BOARD_SIZE: i8 = 8;

/// A board square. `x` is the file (0..8 left to right from White's seat),
/// `y` the rank (0..8 bottom to top).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

impl Pos {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.x) && (0..BOARD_SIZE).contains(&self.y)
    }

    pub fn offset(self, dx: i8, dy: i8) -> Pos {
        Pos {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.x.clamp(0, 7) as u8) as char;
        write!(f, "{}{}", file, self.y + 1)
    }
}

/// Match lifecycle. `Combat` freezes the board while a collision resolves
/// through the betting engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum GameStatus {
    Setup,
    Playing,
    Combat,
    SideWins(Side),
}

/// The positional layer's entire mutable state: piece set, turn, check
/// markers and match status. Mutation happens only through legality-checked
/// moves or combat resolution.
#[derive(Debug, Clone)]
pub struct BoardState {
    pieces: Vec<Piece>,
    side_to_move: Side,
    status: GameStatus,
    move_count: u32,
    in_check: Option<Side>,
    selected: Option<PieceId>,
    next_id: PieceId,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            pieces: Vec::with_capacity(32),
            side_to_move: Side::White,
            status: GameStatus::Setup,
            move_count: 0,
            in_check: None,
            selected: None,
            next_id: 1,
        }
    }

    /// Places both armies in the standard arrangement and opens play.
    pub fn setup(&mut self, white: &ArmyConfig, black: &ArmyConfig) -> Result<(), EngineError> {
        white.validate()?;
        black.validate()?;
        self.pieces.clear();
        self.place_army(Side::White, white);
        self.place_army(Side::Black, black);
        self.side_to_move = Side::White;
        self.status = GameStatus::Playing;
        self.move_count = 0;
        self.in_check = None;
        self.selected = None;
        Ok(())
    }

    fn place_army(&mut self, side: Side, config: &ArmyConfig) {
        use PieceKind::*;
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let (back_rank, pawn_rank) = match side {
            Side::White => (0, 1),
            Side::Black => (7, 6),
        };
        for (x, &kind) in back.iter().enumerate() {
            self.spawn(kind, side, Pos::new(x as i8, back_rank), config.unit(kind));
        }
        for x in 0..BOARD_SIZE {
            self.spawn(Pawn, side, Pos::new(x, pawn_rank), config.unit(Pawn));
        }
    }

    /// Places a single piece outside the standard setup. Scripted scenarios
    /// build sparse boards with this.
    pub fn place(&mut self, kind: PieceKind, side: Side, pos: Pos, unit: &UnitConfig) -> PieceId {
        self.spawn(kind, side, pos, unit)
    }

    fn spawn(&mut self, kind: PieceKind, side: Side, pos: Pos, unit: &UnitConfig) -> PieceId {
        let id = self.next_id;
        self.next_id += 1;
        self.pieces
            .push(Piece::new(id, kind, side, pos, unit.max_health, unit.element));
        id
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.side() == side)
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id() == id)
    }

    pub fn piece_at(&self, pos: Pos) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.pos() == pos)
    }

    pub fn king_of(&self, side: Side) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.side() == side && p.kind() == PieceKind::King)
    }

    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let idx = self.pieces.iter().position(|p| p.id() == id)?;
        Some(self.pieces.remove(idx))
    }

    /// Relocates a piece, capturing whatever occupies the target square.
    /// Legality is the caller's responsibility; this is the primitive used
    /// both by real moves and by self-check simulation.
    pub fn apply_move(&mut self, id: PieceId, to: Pos) -> Result<(), EngineError> {
        if self.piece(id).is_none() {
            return Err(EngineError::PieceNotFound(id));
        }
        if let Some(victim) = self.piece_at(to).map(|p| p.id()) {
            if victim != id {
                self.remove_piece(victim);
            }
        }
        if let Some(piece) = self.piece_mut(id) {
            piece.set_pos(to);
        }
        Ok(())
    }

    /// Replaces a promoted pawn in place with a fresh queen built from the
    /// owning side's queen configuration.
    pub fn promote_pawn(&mut self, id: PieceId, queen: &UnitConfig) -> Result<PieceId, EngineError> {
        let pawn = self.remove_piece(id).ok_or(EngineError::PieceNotFound(id))?;
        let new_id = self.spawn(PieceKind::Queen, pawn.side(), pawn.pos(), queen);
        Ok(new_id)
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, side: Side) {
        self.side_to_move = side;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn in_check(&self) -> Option<Side> {
        self.in_check
    }

    pub fn set_in_check(&mut self, side: Option<Side>) {
        self.in_check = side;
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    pub fn set_selected(&mut self, id: Option<PieceId>) {
        self.selected = id;
    }

    pub fn pass_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.move_count += 1;
        self.selected = None;
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}
