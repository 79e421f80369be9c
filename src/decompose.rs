//! Decomposition of a concealed 14-tile-equivalent multiset into the shapes a
//! winning hand can take: four blocks plus a pair, seven distinct pairs, or
//! thirteen orphans.

use crate::types::{TileCounts, ORPHAN_KINDS, TILE_KINDS};

/// One concealed group in a standard decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// Three identical tiles of this kind.
    Triplet(u8),
    /// Consecutive run starting at this kind (start, start+1, start+2).
    Sequence(u8),
}

impl Block {
    pub fn contains(&self, kind: u8) -> bool {
        match *self {
            Block::Triplet(k) => k == kind,
            Block::Sequence(k) => kind >= k && kind <= k + 2,
        }
    }
}

/// A complete split of the concealed tiles: one pair plus triplets/sequences.
/// Blocks already fixed as melds are tracked separately by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub pair: u8,
    pub blocks: Vec<Block>,
}

/// True if a sequence may start at this kind (1..=7 within a number suit).
fn sequence_can_start(kind: usize) -> bool {
    kind < 27 && kind % 9 <= 6
}

/// Enumerate every standard decomposition of the multiset. The concealed part
/// must hold `3n + 2` tiles; melds are accounted for by the caller. The search
/// removes the pair first, then blocks in ascending kind order, so the output
/// order is canonical and deterministic.
pub fn decompositions(counts: &TileCounts) -> Vec<Decomposition> {
    let mut out = Vec::new();
    let mut work = counts.clone();
    for pair in 0..TILE_KINDS as u8 {
        if work.get(pair) < 2 {
            continue;
        }
        work.counts[pair as usize] -= 2;
        let mut blocks = Vec::new();
        collect_blocks(&mut work, 0, &mut blocks, &mut |blocks| {
            out.push(Decomposition {
                pair,
                blocks: blocks.to_vec(),
            });
        });
        work.counts[pair as usize] += 2;
    }
    out
}

fn collect_blocks(
    counts: &mut TileCounts,
    from: usize,
    blocks: &mut Vec<Block>,
    emit: &mut impl FnMut(&[Block]),
) {
    let mut i = from;
    while i < TILE_KINDS && counts.counts[i] == 0 {
        i += 1;
    }
    if i == TILE_KINDS {
        emit(blocks);
        return;
    }

    if counts.counts[i] >= 3 {
        counts.counts[i] -= 3;
        blocks.push(Block::Triplet(i as u8));
        collect_blocks(counts, i, blocks, emit);
        blocks.pop();
        counts.counts[i] += 3;
    }

    if sequence_can_start(i) && counts.counts[i + 1] > 0 && counts.counts[i + 2] > 0 {
        counts.counts[i] -= 1;
        counts.counts[i + 1] -= 1;
        counts.counts[i + 2] -= 1;
        blocks.push(Block::Sequence(i as u8));
        collect_blocks(counts, i, blocks, emit);
        blocks.pop();
        counts.counts[i] += 1;
        counts.counts[i + 1] += 1;
        counts.counts[i + 2] += 1;
    }
}

/// Exactly seven distinct pairs. Four of a kind is not two pairs.
pub fn is_seven_pairs(counts: &TileCounts) -> bool {
    let mut pairs = 0;
    for &c in counts.counts.iter() {
        match c {
            0 => {}
            2 => pairs += 1,
            _ => return false,
        }
    }
    pairs == 7
}

/// One of each terminal/honor kind plus a duplicate of exactly one of them.
pub fn is_thirteen_orphans(counts: &TileCounts) -> bool {
    if counts.total() != 14 {
        return false;
    }
    let mut pair_seen = false;
    for &k in ORPHAN_KINDS.iter() {
        match counts.get(k) {
            1 => {}
            2 if !pair_seen => pair_seen = true,
            _ => return false,
        }
    }
    pair_seen
}

/// Whether the concealed multiset forms any complete shape.
pub fn is_complete(counts: &TileCounts) -> bool {
    if is_thirteen_orphans(counts) || is_seven_pairs(counts) {
        return true;
    }
    has_standard_shape(counts)
}

/// Faster yes/no variant of `decompositions` for tenpai probing.
fn has_standard_shape(counts: &TileCounts) -> bool {
    let mut work = counts.clone();
    for pair in 0..TILE_KINDS {
        if work.counts[pair] < 2 {
            continue;
        }
        work.counts[pair] -= 2;
        let ok = consume_blocks(&mut work, 0);
        work.counts[pair] += 2;
        if ok {
            return true;
        }
    }
    false
}

fn consume_blocks(counts: &mut TileCounts, from: usize) -> bool {
    let mut i = from;
    while i < TILE_KINDS && counts.counts[i] == 0 {
        i += 1;
    }
    if i == TILE_KINDS {
        return true;
    }

    if counts.counts[i] >= 3 {
        counts.counts[i] -= 3;
        let ok = consume_blocks(counts, i);
        counts.counts[i] += 3;
        if ok {
            return true;
        }
    }

    if sequence_can_start(i) && counts.counts[i + 1] > 0 && counts.counts[i + 2] > 0 {
        counts.counts[i] -= 1;
        counts.counts[i + 1] -= 1;
        counts.counts[i + 2] -= 1;
        let ok = consume_blocks(counts, i);
        counts.counts[i] += 1;
        counts.counts[i + 1] += 1;
        counts.counts[i + 2] += 1;
        if ok {
            return true;
        }
    }

    false
}

/// 13-tile-equivalent query: does any drawable kind complete the hand?
pub fn is_tenpai(counts: &TileCounts) -> bool {
    !waits(counts).is_empty()
}

/// Every kind that completes the multiset, ascending. Kinds the hand already
/// holds four of cannot be drawn and are skipped.
pub fn waits(counts: &TileCounts) -> Vec<u8> {
    let mut out = Vec::new();
    let mut work = counts.clone();
    for k in 0..TILE_KINDS as u8 {
        if work.get(k) >= 4 {
            continue;
        }
        work.add(k);
        if is_complete(&work) {
            out.push(k);
        }
        work.remove(k);
    }
    out
}
