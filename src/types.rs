use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::fmt;

/// Number of distinct tile kinds: 9 man, 9 pin, 9 sou, 4 winds, 3 dragons.
pub const TILE_KINDS: usize = 34;

/// Total physical tiles in a deal (four copies of each kind).
pub const TOTAL_TILES: usize = 136;

/// 136-format IDs of the red fives (5m, 5p, 5s).
pub const RED_FIVES: [u8; 3] = [16, 52, 88];

pub fn kind_of(tile_136: u8) -> u8 {
    tile_136 / 4
}

pub fn is_honor(kind: u8) -> bool {
    kind >= 27
}

pub fn is_number_terminal(kind: u8) -> bool {
    kind < 27 && (kind % 9 == 0 || kind % 9 == 8)
}

/// Terminal or honor ("yaochuu") kind.
pub fn is_terminal_or_honor(kind: u8) -> bool {
    is_honor(kind) || is_number_terminal(kind)
}

/// The thirteen kinds a thirteen-orphans hand is built from.
pub const ORPHAN_KINDS: [u8; 13] = [0, 8, 9, 17, 18, 26, 27, 28, 29, 30, 31, 32, 33];

/// A multiset of tile kinds kept as a histogram over the 34 kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileCounts {
    pub counts: [u8; TILE_KINDS],
}

impl TileCounts {
    pub fn new() -> Self {
        TileCounts {
            counts: [0; TILE_KINDS],
        }
    }

    pub fn from_kinds(kinds: &[u8]) -> Self {
        let mut c = Self::new();
        for &k in kinds {
            c.add(k);
        }
        c
    }

    pub fn add(&mut self, kind: u8) {
        if (kind as usize) < TILE_KINDS {
            self.counts[kind as usize] += 1;
        }
    }

    pub fn remove(&mut self, kind: u8) {
        if (kind as usize) < TILE_KINDS && self.counts[kind as usize] > 0 {
            self.counts[kind as usize] -= 1;
        }
    }

    pub fn total(&self) -> u8 {
        self.counts.iter().sum()
    }

    pub fn get(&self, kind: u8) -> u8 {
        self.counts[kind as usize]
    }
}

impl Default for TileCounts {
    fn default() -> Self {
        Self::new()
    }
}

#[pyclass(eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeldKind {
    /// Claimed sequence.
    Chi = 0,
    /// Claimed triplet.
    Pon = 1,
    /// Open quad claimed from a discard.
    Kan = 2,
    /// Concealed quad.
    Ankan = 3,
    /// Fourth tile added to an existing pon.
    Kakan = 4,
}

impl MeldKind {
    pub fn is_quad(self) -> bool {
        matches!(self, MeldKind::Kan | MeldKind::Ankan | MeldKind::Kakan)
    }
}

/// A fixed group taken out of the concealed hand. Tiles are 136-format.
/// Immutable once formed; only created by an explicit call/kan declaration.
#[pyclass]
#[derive(Debug, Clone)]
pub struct Meld {
    #[pyo3(get)]
    pub kind: MeldKind,
    #[pyo3(get)]
    pub tiles: Vec<u8>,
    #[pyo3(get)]
    pub open: bool,
}

#[pymethods]
impl Meld {
    #[new]
    pub fn new(kind: MeldKind, tiles: Vec<u8>, open: bool) -> Self {
        Self { kind, tiles, open }
    }

    fn __repr__(&self) -> String {
        format!(
            "Meld(kind={:?}, tiles={:?}, open={})",
            self.kind, self.tiles, self.open
        )
    }
}

impl Meld {
    /// Kind of the meld's defining tile (lowest kind for a chi).
    pub fn base_kind(&self) -> u8 {
        self.tiles.iter().map(|&t| kind_of(t)).min().unwrap_or(0)
    }

    pub fn is_triplet_like(&self) -> bool {
        self.kind != MeldKind::Chi
    }
}

/// Seat and round winds. East is the dealer seat.
#[pyclass(eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wind {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

impl Wind {
    /// The honor kind (27..=30) this wind scores as.
    pub fn kind(self) -> u8 {
        27 + self as u8
    }
}

/// Structurally malformed evaluator input. Fatal; distinct from the ordinary
/// negative outcomes (shape incomplete, no yaku).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidHand {
    TileOutOfRange(u8),
    DuplicateTileId(u8),
    TooManyCopies(u8),
    WrongTileCount { expected: u8, got: u8 },
    WinTileNotInHand(u8),
}

impl fmt::Display for InvalidHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidHand::TileOutOfRange(t) => write!(f, "tile id {t} out of range 0..136"),
            InvalidHand::DuplicateTileId(t) => write!(f, "tile id {t} appears more than once"),
            InvalidHand::TooManyCopies(k) => {
                write!(f, "more than four copies of tile kind {k}")
            }
            InvalidHand::WrongTileCount { expected, got } => {
                write!(f, "hand totals {got} tile-equivalents, expected {expected}")
            }
            InvalidHand::WinTileNotInHand(t) => {
                write!(f, "winning tile id {t} is not part of the hand")
            }
        }
    }
}

impl std::error::Error for InvalidHand {}

impl From<InvalidHand> for PyErr {
    fn from(err: InvalidHand) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
