//! Move and attack legality over the positional layer.
//!
//! Generation runs in two passes: piece-pattern expansion (`pseudo_legal`)
//! and a self-check filter that simulates each candidate on a cloned piece
//! set (`legal_moves`). An enemy king's square is never a legal attack
//! target; reaching it only yields the derived check status.

use crate::board::{BoardState, Pos, BOARD_SIZE};
use crate::piece::{Piece, PieceId, PieceKind, Side};

/// Legal destinations for one piece, split into quiet moves and attacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSet {
    pub moves: Vec<Pos>,
    pub attacks: Vec<Pos>,
}

impl MoveSet {
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty() && self.attacks.is_empty()
    }

    pub fn contains_move(&self, pos: Pos) -> bool {
        self.moves.contains(&pos)
    }

    pub fn contains_attack(&self, pos: Pos) -> bool {
        self.attacks.contains(&pos)
    }
}

/// How a side with no legal moves loses.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MateKind {
    Checkmate,
    /// No legal moves while not in check. Unlike standard chess this is an
    /// immediate loss for the stalemated side.
    Stalemate,
}

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ROYAL_DIRS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Expands a piece's movement pattern without considering check.
pub fn pseudo_legal(board: &BoardState, piece: &Piece) -> MoveSet {
    let mut set = MoveSet::default();
    match piece.kind() {
        PieceKind::Queen => slide(board, piece, &ROYAL_DIRS, &mut set),
        PieceKind::Rook => slide(board, piece, &ROOK_DIRS, &mut set),
        PieceKind::Bishop => slide(board, piece, &BISHOP_DIRS, &mut set),
        PieceKind::King => step(board, piece, &ROYAL_DIRS, &mut set),
        PieceKind::Knight => step(board, piece, &KNIGHT_OFFSETS, &mut set),
        PieceKind::Pawn => pawn_pattern(board, piece, &mut set),
    }
    set
}

fn slide(board: &BoardState, piece: &Piece, dirs: &[(i8, i8)], set: &mut MoveSet) {
    for &(dx, dy) in dirs {
        let mut pos = piece.pos().offset(dx, dy);
        while pos.in_bounds() {
            match board.piece_at(pos) {
                None => set.moves.push(pos),
                Some(other) => {
                    // Enemy kings block the line but are never a target.
                    if other.side() != piece.side() && other.kind() != PieceKind::King {
                        set.attacks.push(pos);
                    }
                    break;
                }
            }
            pos = pos.offset(dx, dy);
        }
    }
}

fn step(board: &BoardState, piece: &Piece, offsets: &[(i8, i8)], set: &mut MoveSet) {
    for &(dx, dy) in offsets {
        let pos = piece.pos().offset(dx, dy);
        if !pos.in_bounds() {
            continue;
        }
        match board.piece_at(pos) {
            None => set.moves.push(pos),
            Some(other) => {
                if other.side() != piece.side() && other.kind() != PieceKind::King {
                    set.attacks.push(pos);
                }
            }
        }
    }
}

fn pawn_pattern(board: &BoardState, piece: &Piece, set: &mut MoveSet) {
    let dy = piece.side().forward();
    let ahead = piece.pos().offset(0, dy);
    if ahead.in_bounds() && board.piece_at(ahead).is_none() {
        set.moves.push(ahead);
    }
    for dx in [-1, 1] {
        let diag = piece.pos().offset(dx, dy);
        if !diag.in_bounds() {
            continue;
        }
        if let Some(other) = board.piece_at(diag) {
            if other.side() != piece.side() && other.kind() != PieceKind::King {
                set.attacks.push(diag);
            }
        }
    }
}

/// Whether `piece` threatens `target` under its movement rules. Unlike move
/// generation this treats occupied king squares as reachable, which is what
/// turns an adjacent line into the derived check status.
pub fn threatens(board: &BoardState, piece: &Piece, target: Pos) -> bool {
    let from = piece.pos();
    match piece.kind() {
        PieceKind::Queen => line_threat(board, from, target, &ROYAL_DIRS),
        PieceKind::Rook => line_threat(board, from, target, &ROOK_DIRS),
        PieceKind::Bishop => line_threat(board, from, target, &BISHOP_DIRS),
        PieceKind::King => {
            (from.x - target.x).abs() <= 1 && (from.y - target.y).abs() <= 1 && from != target
        }
        PieceKind::Knight => KNIGHT_OFFSETS
            .iter()
            .any(|&(dx, dy)| from.offset(dx, dy) == target),
        PieceKind::Pawn => {
            let dy = piece.side().forward();
            from.offset(-1, dy) == target || from.offset(1, dy) == target
        }
    }
}

fn line_threat(board: &BoardState, from: Pos, target: Pos, dirs: &[(i8, i8)]) -> bool {
    for &(dx, dy) in dirs {
        let mut pos = from.offset(dx, dy);
        while pos.in_bounds() {
            if pos == target {
                return true;
            }
            if board.piece_at(pos).is_some() {
                break;
            }
            pos = pos.offset(dx, dy);
        }
    }
    false
}

pub fn is_king_in_check(board: &BoardState, side: Side) -> bool {
    let king_pos = match board.king_of(side) {
        Some(k) => k.pos(),
        None => return false,
    };
    board
        .pieces_of(side.opponent())
        .any(|p| threatens(board, p, king_pos))
}

/// Pseudo-legal moves filtered by self-check simulation. Applies uniformly
/// to every piece type, not only the king.
pub fn legal_moves(board: &BoardState, piece_id: PieceId) -> MoveSet {
    let piece = match board.piece(piece_id) {
        Some(p) => p.clone(),
        None => return MoveSet::default(),
    };
    let candidate = pseudo_legal(board, &piece);
    let keep = |pos: &Pos| !leaves_own_king_in_check(board, piece_id, *pos, piece.side());
    MoveSet {
        moves: candidate.moves.into_iter().filter(|p| keep(p)).collect(),
        attacks: candidate.attacks.into_iter().filter(|p| keep(p)).collect(),
    }
}

fn leaves_own_king_in_check(board: &BoardState, piece_id: PieceId, to: Pos, side: Side) -> bool {
    let mut sim = board.clone();
    if sim.apply_move(piece_id, to).is_err() {
        return true;
    }
    is_king_in_check(&sim, side)
}

pub fn has_any_legal_move(board: &BoardState, side: Side) -> bool {
    let ids: Vec<PieceId> = board.pieces_of(side).map(|p| p.id()).collect();
    ids.iter().any(|&id| !legal_moves(board, id).is_empty())
}

pub fn is_checkmate(board: &BoardState, side: Side) -> bool {
    is_king_in_check(board, side) && !has_any_legal_move(board, side)
}

/// Terminal state for `side`, if any: checkmate when checked with no moves,
/// stalemate (also a loss here) when unchecked with no moves.
pub fn mate_state(board: &BoardState, side: Side) -> Option<MateKind> {
    if has_any_legal_move(board, side) {
        return None;
    }
    if is_king_in_check(board, side) {
        Some(MateKind::Checkmate)
    } else {
        Some(MateKind::Stalemate)
    }
}

/// A pawn standing on the opposite back rank, ready for promotion.
pub fn promotable_pawn(board: &BoardState, side: Side) -> Option<PieceId> {
    let back_rank = match side {
        Side::White => BOARD_SIZE - 1,
        Side::Black => 0,
    };
    board
        .pieces_of(side)
        .find(|p| p.kind() == PieceKind::Pawn && p.pos().y == back_rank)
        .map(|p| p.id())
}
