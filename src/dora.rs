//! Indicator-to-dora mapping and dora counting.
//!
//! An indicator points at the *next* tile in its own cycle: ranks wrap 9 to 1
//! within a suit, winds cycle East-South-West-North, dragons cycle
//! Haku-Hatsu-Chun.

use crate::types::{kind_of, TileCounts};

/// The dora kind named by an indicator kind.
pub fn dora_value(indicator_kind: u8) -> u8 {
    match indicator_kind {
        8 => 0,           // 9m -> 1m
        17 => 9,          // 9p -> 1p
        26 => 18,         // 9s -> 1s
        30 => 27,         // North -> East
        33 => 31,         // Chun -> Haku
        k => k + 1,
    }
}

/// Count dora over the full 14-tile hand, meld tiles included. Every revealed
/// indicator counts each matching tile once, so doubled indicators double.
pub fn count_dora(full_hand: &TileCounts, indicators_136: &[u8]) -> u8 {
    let mut n = 0;
    for &ind in indicators_136 {
        n += full_hand.get(dora_value(kind_of(ind)));
    }
    n
}
