//! Constants for cell encoding, identity digests and exploration defaults.
//!
//! Board files store one integer per cell: a player's stone is `±1` and
//! that player's reserved marker is twice the stone code.

// =============================================================================
// Cell Codes (board file encoding)
// =============================================================================

/// White-only reserved point.
pub const CODE_WHITE_RESERVED: i8 = -2;

/// White stone.
pub const CODE_WHITE: i8 = -1;

/// Empty point.
pub const CODE_EMPTY: i8 = 0;

/// Black stone.
pub const CODE_BLACK: i8 = 1;

/// Black-only reserved point.
pub const CODE_BLACK_RESERVED: i8 = 2;

// =============================================================================
// Display Glyphs
// =============================================================================

pub const GLYPH_BLACK: char = 'X';
pub const GLYPH_WHITE: char = 'O';
pub const GLYPH_EMPTY: char = '.';
pub const GLYPH_BLACK_RESERVED: char = 'b';
pub const GLYPH_WHITE_RESERVED: char = 'w';

// =============================================================================
// Identity
// =============================================================================

/// Number of digest bytes kept in a position key.
///
/// Keys are a truncated SHA-256; two positions whose truncated digests
/// collide are treated as the same node.
pub const KEY_LEN: usize = 10;

// =============================================================================
// Exploration Defaults
// =============================================================================

/// Default depth bound for tree building and value listings.
pub const DEFAULT_DEPTH: usize = 3;

/// Orthogonal neighbour offsets (row, col): North, East, South, West.
pub const DELTA: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
