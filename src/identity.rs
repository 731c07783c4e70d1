//! Position identity keys.
//!
//! A [`Key`] is a truncated SHA-256 of a canonical serialisation of the
//! board, optionally followed by the player to move and the last move. It is
//! the only identity used for deduplication, memoisation and visited sets.
//! Distinct positions whose truncated digests collide are treated as the
//! same node.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::board::{Board, Player, Point};
use crate::constants::KEY_LEN;

/// Which parts of a position contribute to its key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IdentityScheme {
    /// Board contents only. Positions reached by different move orders or
    /// with a different player to move share a key.
    Board,
    /// Board contents and player to move.
    BoardTurn,
    /// Board contents, player to move and last move.
    Full,
}

impl IdentityScheme {
    fn includes_turn(self) -> bool {
        matches!(self, IdentityScheme::BoardTurn | IdentityScheme::Full)
    }

    fn includes_last_move(self) -> bool {
        self == IdentityScheme::Full
    }
}

/// Fixed-width position digest.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key([u8; KEY_LEN]);

impl Key {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({self})")
    }
}

/// Compute the key of `(board, turn, last_move)` under `scheme`.
///
/// Deterministic: equal inputs always give equal keys.
pub fn identity(
    board: &Board,
    turn: Player,
    last_move: Option<Point>,
    scheme: IdentityScheme,
) -> Key {
    let mut hasher = Sha256::new();
    hasher.update((board.rows() as u64).to_le_bytes());
    hasher.update((board.cols() as u64).to_le_bytes());
    for row in board.to_codes() {
        let bytes: Vec<u8> = row.iter().map(|&c| c as u8).collect();
        hasher.update(&bytes);
    }
    if scheme.includes_turn() {
        hasher.update([b'T', turn.code() as u8]);
    }
    if scheme.includes_last_move() {
        match last_move {
            Some((r, c)) => {
                hasher.update([b'M']);
                hasher.update((r as u64).to_le_bytes());
                hasher.update((c as u64).to_le_bytes());
            }
            None => hasher.update([b'-']),
        }
    }
    let digest = hasher.finalize();
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&digest[..KEY_LEN]);
    Key(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_identity_is_deterministic() {
        let b = board("0,1\n-1,2\n");
        for scheme in [
            IdentityScheme::Board,
            IdentityScheme::BoardTurn,
            IdentityScheme::Full,
        ] {
            assert_eq!(
                identity(&b, Player::Black, Some((0, 1)), scheme),
                identity(&b.clone(), Player::Black, Some((0, 1)), scheme)
            );
        }
    }

    #[test]
    fn test_scheme_controls_what_is_hashed() {
        let b = board("0,1\n0,0\n");
        let black = identity(&b, Player::Black, Some((0, 1)), IdentityScheme::Board);
        let white = identity(&b, Player::White, None, IdentityScheme::Board);
        assert_eq!(black, white, "board-only keys ignore turn and last move");

        let black = identity(&b, Player::Black, Some((0, 1)), IdentityScheme::BoardTurn);
        let white = identity(&b, Player::White, Some((0, 1)), IdentityScheme::BoardTurn);
        let black_no_move = identity(&b, Player::Black, None, IdentityScheme::BoardTurn);
        assert_ne!(black, white);
        assert_eq!(black, black_no_move);

        let a = identity(&b, Player::Black, Some((0, 1)), IdentityScheme::Full);
        let c = identity(&b, Player::Black, None, IdentityScheme::Full);
        assert_ne!(a, c);
    }

    #[test]
    fn test_dimensions_are_part_of_identity() {
        let wide = Board::parse("0,0,0,0\n", crate::board::Shape::Rectangular).unwrap();
        let tall = Board::parse("0\n0\n0\n0\n", crate::board::Shape::Rectangular).unwrap();
        assert_ne!(
            identity(&wide, Player::Black, None, IdentityScheme::Board),
            identity(&tall, Player::Black, None, IdentityScheme::Board)
        );
    }

    #[test]
    fn test_key_display_is_hex() {
        let key = identity(&board("0\n"), Player::Black, None, IdentityScheme::Board);
        let s = key.to_string();
        assert_eq!(s.len(), KEY_LEN * 2);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
