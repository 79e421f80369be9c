//! Text notation for hands: "123m456p11z" plus meld groups.
//!
//! Digits accumulate until a suit letter (m/p/s/z) assigns them; `0` is the
//! red five of its suit. Parenthesised groups are melds:
//!
//! - `(123m)`  claimed sequence
//! - `(p5m)`   pon
//! - `(k1z)`   concealed quad
//! - `(k1z2)`  open quad (trailing digit names the discarder's seat offset)
//! - `(a5s)`   added quad

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use std::iter::Peekable;
use std::str::Chars;

use crate::types::{Meld, MeldKind, TILE_KINDS};

/// Allocates concrete 136-format IDs so no physical tile is handed out
/// twice within one parsed hand. Copy 0 of each five is the red tile, so
/// black fives are served from copies 1..4 first.
struct TileRegistry {
    used: [[bool; 4]; TILE_KINDS],
}

impl TileRegistry {
    fn new() -> Self {
        Self {
            used: [[false; 4]; TILE_KINDS],
        }
    }

    fn take(&mut self, kind: usize, red: bool) -> PyResult<u8> {
        let is_five = kind == 4 || kind == 13 || kind == 22;
        let order: &[usize] = match (is_five, red) {
            (true, true) => &[0],
            (true, false) => &[1, 2, 3, 0],
            (false, _) => &[0, 1, 2, 3],
        };
        let slot = order
            .iter()
            .find(|&&i| !self.used[kind][i])
            .copied()
            .ok_or_else(|| PyValueError::new_err(format!("no copies left of tile kind {kind}")))?;
        self.used[kind][slot] = true;
        Ok((kind * 4 + slot) as u8)
    }
}

fn suit_offset(c: char) -> Option<usize> {
    match c {
        'm' => Some(0),
        'p' => Some(9),
        's' => Some(18),
        'z' => Some(27),
        _ => None,
    }
}

fn digit_to_kind(digit: u32, offset: usize) -> PyResult<(usize, bool)> {
    if digit == 0 {
        if offset == 27 {
            return Err(PyValueError::new_err("honors have no red five"));
        }
        return Ok((offset + 4, true));
    }
    if offset == 27 && digit > 7 {
        return Err(PyValueError::new_err(format!("honor rank {digit} out of range 1..=7")));
    }
    Ok((offset + digit as usize - 1, false))
}

/// Parse hand text into concealed tile IDs and melds.
pub fn parse_hand(text: &str) -> PyResult<(Vec<u8>, Vec<Meld>)> {
    let mut registry = TileRegistry::new();
    let mut tiles = Vec::new();
    let mut melds = Vec::new();
    let mut pending: Vec<u32> = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c == '(' {
            chars.next();
            melds.push(parse_meld(&mut chars, &mut registry)?);
        } else if let Some(d) = c.to_digit(10) {
            chars.next();
            pending.push(d);
        } else if let Some(offset) = suit_offset(c) {
            chars.next();
            for &d in &pending {
                let (kind, red) = digit_to_kind(d, offset)?;
                tiles.push(registry.take(kind, red)?);
            }
            pending.clear();
        } else if c.is_whitespace() {
            chars.next();
        } else {
            return Err(PyValueError::new_err(format!("unexpected character {c:?}")));
        }
    }

    if !pending.is_empty() {
        return Err(PyValueError::new_err("trailing digits without a suit letter"));
    }
    Ok((tiles, melds))
}

/// Parse exactly one tile, e.g. "3p" or "0s" for the red five.
#[pyfunction]
pub fn parse_tile(text: &str) -> PyResult<u8> {
    let (tiles, melds) = parse_hand(text)?;
    if !melds.is_empty() || tiles.len() != 1 {
        return Err(PyValueError::new_err(format!(
            "expected a single tile, got {:?}",
            text
        )));
    }
    Ok(tiles[0])
}

/// Python-facing hand parser.
#[pyfunction]
#[pyo3(name = "parse_hand")]
pub fn parse_hand_py(text: &str) -> PyResult<(Vec<u8>, Vec<Meld>)> {
    parse_hand(text)
}

fn parse_meld(chars: &mut Peekable<Chars>, registry: &mut TileRegistry) -> PyResult<Meld> {
    let mut content = String::new();
    loop {
        match chars.next() {
            Some(')') => break,
            Some(c) => content.push(c),
            None => return Err(PyValueError::new_err("unterminated meld group")),
        }
    }

    let (prefix, rest) = match content.chars().next() {
        Some(p @ ('p' | 'k' | 'a')) => (Some(p), &content[1..]),
        Some(_) => (None, content.as_str()),
        None => return Err(PyValueError::new_err("empty meld group")),
    };

    let body: Vec<char> = rest.chars().collect();
    let mut digits = Vec::new();
    let mut i = 0;
    while i < body.len() {
        match body[i].to_digit(10) {
            Some(d) => digits.push(d),
            None => break,
        }
        i += 1;
    }
    let suit = body
        .get(i)
        .copied()
        .and_then(suit_offset)
        .ok_or_else(|| PyValueError::new_err(format!("meld group {content:?} lacks a suit")))?;
    // An extra digit after the suit marks an open kan's discarder.
    let caller = body.get(i + 1).and_then(|c| c.to_digit(10));

    match prefix {
        None => {
            if digits.len() != 3 {
                return Err(PyValueError::new_err("a claimed sequence needs three ranks"));
            }
            let mut tiles = Vec::with_capacity(3);
            for &d in &digits {
                let (kind, red) = digit_to_kind(d, suit)?;
                tiles.push(registry.take(kind, red)?);
            }
            tiles.sort_unstable();
            let kinds: Vec<u8> = tiles.iter().map(|&t| t / 4).collect();
            if kinds[0] + 1 != kinds[1]
                || kinds[1] + 1 != kinds[2]
                || kinds[0] >= 27
                || kinds[0] % 9 > 6
            {
                return Err(PyValueError::new_err(format!(
                    "meld group {content:?} is not a run"
                )));
            }
            Ok(Meld::new(MeldKind::Chi, tiles, true))
        }
        Some(p) => {
            if digits.len() != 1 {
                return Err(PyValueError::new_err("pon/kan groups name a single rank"));
            }
            let (kind, red) = digit_to_kind(digits[0], suit)?;
            let (meld_kind, count) = match p {
                'p' => (MeldKind::Pon, 3),
                'a' => (MeldKind::Kakan, 4),
                'k' if caller.is_some() => (MeldKind::Kan, 4),
                'k' => (MeldKind::Ankan, 4),
                _ => unreachable!(),
            };
            let mut tiles = Vec::with_capacity(count);
            if red {
                tiles.push(registry.take(kind, true)?);
            }
            // Black copies first; a quad of fives sweeps in the red last.
            while tiles.len() < count {
                tiles.push(registry.take(kind, false)?);
            }
            tiles.sort_unstable();
            let open = meld_kind != MeldKind::Ankan;
            Ok(Meld::new(meld_kind, tiles, open))
        }
    }
}
