//! Shuffled 136-tile wall with a dead wall, kan replacement draws and dora
//! indicator reveals.
//!
//! The shuffled order is committed to up front: a salted SHA-256 digest is
//! published at shuffle time so a client can audit the deal afterwards.

use pyo3::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};

use crate::types::TOTAL_TILES;

const DEAD_WALL: usize = 14;
const MAX_INDICATORS: usize = 5;
const MAX_REPLACEMENTS: usize = 4;

/// Dead wall layout, counted from the front of the (reversed) tile vector:
/// indices 0..4 are the replacement tiles, even indices 4..14 the dora
/// indicators and the odd ones beneath them the ura indicators.
#[pyclass]
#[derive(Debug, Clone)]
pub struct Wall {
    tiles: Vec<u8>,
    indicators_revealed: usize,
    replacement_draws: usize,
    #[pyo3(get)]
    pub digest: String,
    #[pyo3(get)]
    pub salt: String,
    seed: Option<u64>,
    hand_index: u64,
}

#[pymethods]
impl Wall {
    #[new]
    #[pyo3(signature = (seed=None))]
    pub fn new(seed: Option<u64>) -> Self {
        let mut wall = Self {
            tiles: Vec::new(),
            indicators_revealed: 0,
            replacement_draws: 0,
            digest: String::new(),
            salt: String::new(),
            seed,
            hand_index: 0,
        };
        wall.shuffle();
        wall
    }

    /// Reshuffle for the next deal. A fixed seed gives a distinct but
    /// reproducible order per hand.
    pub fn shuffle(&mut self) {
        let mut w: Vec<u8> = (0..TOTAL_TILES as u8).collect();
        let mut rng = if let Some(seed) = self.seed {
            StdRng::seed_from_u64(splitmix64(seed.wrapping_add(self.hand_index)))
        } else {
            StdRng::from_entropy()
        };
        self.hand_index = self.hand_index.wrapping_add(1);

        w.shuffle(&mut rng);
        self.salt = format!("{:016x}", rng.next_u64());

        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        for &t in &w {
            hasher.update([t]);
        }
        self.digest = format!("{:x}", hasher.finalize());

        // Draws pop from the end; the dead wall sits at the front.
        w.reverse();
        self.tiles = w;
        self.indicators_revealed = 1;
        self.replacement_draws = 0;
    }

    /// Tiles still available to ordinary draws. Each kan moves one live tile
    /// into the dead wall, so replacement draws shorten this too.
    pub fn live_remaining(&self) -> usize {
        self.tiles
            .len()
            .saturating_sub(DEAD_WALL + self.replacement_draws)
    }

    /// Whether the next ordinary draw is the last one (haitei tile).
    pub fn is_last_draw(&self) -> bool {
        self.live_remaining() == 1
    }

    /// Ordinary draw from the live wall.
    pub fn draw(&mut self) -> Option<u8> {
        if self.live_remaining() == 0 {
            return None;
        }
        self.tiles.pop()
    }

    /// Replacement draw after a kan. At most four per deal.
    pub fn replacement_draw(&mut self) -> Option<u8> {
        if self.replacement_draws >= MAX_REPLACEMENTS {
            return None;
        }
        let tile = self.tiles[self.replacement_draws];
        self.replacement_draws += 1;
        Some(tile)
    }

    /// Flip the next dora indicator (after a kan). At most five total.
    pub fn reveal_indicator(&mut self) -> Option<u8> {
        if self.indicators_revealed >= MAX_INDICATORS {
            return None;
        }
        self.indicators_revealed += 1;
        Some(self.tiles[4 + 2 * (self.indicators_revealed - 1)])
    }

    /// Face-up dora indicators, in reveal order.
    pub fn dora_indicators(&self) -> Vec<u8> {
        (0..self.indicators_revealed)
            .map(|i| self.tiles[4 + 2 * i])
            .collect()
    }

    /// Ura indicators beneath the revealed ones. Only meaningful once a
    /// riichi hand wins; exposed here for the evaluator.
    pub fn ura_indicators(&self) -> Vec<u8> {
        (0..self.indicators_revealed)
            .map(|i| self.tiles[5 + 2 * i])
            .collect()
    }
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
