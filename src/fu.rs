//! Fu (base point) computation for one chosen decomposition.

use crate::context::WinContext;
use crate::decompose::{Block, Decomposition};
use crate::types::{is_terminal_or_honor, Meld, MeldKind};

/// Where the winning tile completed the hand within a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinPlacement {
    /// The winning tile is the pair (tanki).
    Pair,
    /// The winning tile completed the block at this index.
    Block(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitKind {
    /// Two-sided sequence wait.
    Ryanmen,
    /// Closed interval wait (middle of a sequence).
    Kanchan,
    /// Edge wait (3 completing 12, or 7 completing 89).
    Penchan,
    /// Pair wait.
    Tanki,
    /// Dual-triplet wait.
    Shanpon,
}

impl WaitKind {
    fn fu(self) -> u8 {
        match self {
            WaitKind::Kanchan | WaitKind::Penchan | WaitKind::Tanki => 2,
            WaitKind::Ryanmen | WaitKind::Shanpon => 0,
        }
    }
}

pub fn wait_kind(div: &Decomposition, placement: WinPlacement, win_kind: u8) -> WaitKind {
    match placement {
        WinPlacement::Pair => WaitKind::Tanki,
        WinPlacement::Block(i) => match div.blocks[i] {
            Block::Triplet(_) => WaitKind::Shanpon,
            Block::Sequence(s) => {
                if win_kind == s + 1 {
                    WaitKind::Kanchan
                } else if (win_kind == s + 2 && s % 9 == 0) || (win_kind == s && s % 9 == 6) {
                    WaitKind::Penchan
                } else {
                    WaitKind::Ryanmen
                }
            }
        },
    }
}

fn pair_fu(pair: u8, ctx: &WinContext) -> u8 {
    let mut fu = 0;
    if pair >= 31 {
        fu += 2;
    }
    // Seat and round wind fu stack when the winds coincide.
    if pair == ctx.seat_wind.kind() {
        fu += 2;
    }
    if pair == ctx.round_wind.kind() {
        fu += 2;
    }
    fu
}

fn concealed_triplet_fu(kind: u8, completed_by_ron: bool) -> u8 {
    // A triplet finished by a claimed discard is scored as open.
    let base = if completed_by_ron { 2 } else { 4 };
    if is_terminal_or_honor(kind) {
        base * 2
    } else {
        base
    }
}

fn meld_fu(meld: &Meld) -> u8 {
    if !meld.is_triplet_like() {
        return 0;
    }
    let kind = meld.base_kind();
    let terminal = is_terminal_or_honor(kind);
    let base: u8 = match meld.kind {
        MeldKind::Pon => 2,
        MeldKind::Kan | MeldKind::Kakan => 8,
        MeldKind::Ankan => 16,
        MeldKind::Chi => 0,
    };
    if terminal {
        base * 2
    } else {
        base
    }
}

/// Fu for a non-pinfu, non-chiitoitsu hand. The caller handles the fixed
/// pinfu (20/30) and chiitoitsu (25) values.
pub fn calculate(
    div: &Decomposition,
    melds: &[Meld],
    ctx: &WinContext,
    placement: WinPlacement,
    win_kind: u8,
    closed: bool,
) -> u8 {
    let mut fu: u8 = 20;

    if closed && !ctx.tsumo {
        fu += 10;
    }
    if ctx.tsumo {
        fu += 2;
    }

    fu += wait_kind(div, placement, win_kind).fu();
    fu += pair_fu(div.pair, ctx);

    for (i, block) in div.blocks.iter().enumerate() {
        if let Block::Triplet(k) = *block {
            let ron_completed = !ctx.tsumo && placement == WinPlacement::Block(i);
            fu += concealed_triplet_fu(k, ron_completed);
        }
    }
    for meld in melds {
        fu += meld_fu(meld);
    }

    // An open ron with no fu sources still pays as 30.
    if fu == 20 && !ctx.tsumo && !closed {
        fu = 30;
    }

    fu.div_ceil(10) * 10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Wind;

    fn seq_hand() -> Decomposition {
        // 234m 456p 678s 345m + 5s pair
        Decomposition {
            pair: 22,
            blocks: vec![
                Block::Sequence(1),
                Block::Sequence(12),
                Block::Sequence(23),
                Block::Sequence(2),
            ],
        }
    }

    #[test]
    fn wait_kinds() {
        let div = seq_hand();
        assert_eq!(wait_kind(&div, WinPlacement::Pair, 22), WaitKind::Tanki);
        assert_eq!(
            wait_kind(&div, WinPlacement::Block(1), 13),
            WaitKind::Kanchan
        );
        assert_eq!(
            wait_kind(&div, WinPlacement::Block(0), 1),
            WaitKind::Ryanmen
        );

        let edge = Decomposition {
            pair: 22,
            blocks: vec![
                Block::Sequence(0),
                Block::Sequence(6),
                Block::Sequence(12),
                Block::Sequence(23),
            ],
        };
        // 123 completed by the 3 is penchan, 789 completed by the 7 too.
        assert_eq!(wait_kind(&edge, WinPlacement::Block(0), 2), WaitKind::Penchan);
        assert_eq!(wait_kind(&edge, WinPlacement::Block(1), 6), WaitKind::Penchan);
    }

    #[test]
    fn closed_ron_sequences_score_forty() {
        // 30 menzen ron + 20 base + kanchan 2 -> 52 -> round up? No triplets.
        let div = seq_hand();
        let ctx = WinContext::default();
        let fu = calculate(&div, &[], &ctx, WinPlacement::Block(1), 13, true);
        assert_eq!(fu, 40); // 20 + 10 + 2 -> 32 -> 40
    }

    #[test]
    fn triplet_fu_scales_with_terminals_and_ron() {
        let div = Decomposition {
            pair: 10,
            blocks: vec![
                Block::Triplet(0),  // terminal, concealed: 8
                Block::Triplet(4),  // simple, concealed: 4
                Block::Triplet(33), // honor, concealed: 8
                Block::Sequence(18),
            ],
        };
        let tsumo = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        // 20 + 2 tsumo + 8 + 4 + 8 = 42 -> 50
        assert_eq!(
            calculate(&div, &[], &tsumo, WinPlacement::Block(3), 19, true),
            50
        );

        // Ron completing the simple triplet demotes it to open (2 fu):
        // 20 + 10 menzen + 8 + 2 + 8 = 48 -> 50
        let ron = WinContext::default();
        assert_eq!(
            calculate(&div, &[], &ron, WinPlacement::Block(1), 4, true),
            50
        );
    }

    #[test]
    fn yakuhai_pair_fu_stacks_for_double_wind() {
        let div = Decomposition {
            pair: 27, // East pair
            blocks: vec![
                Block::Sequence(0),
                Block::Sequence(9),
                Block::Sequence(18),
                Block::Triplet(5),
            ],
        };
        let ctx = WinContext {
            tsumo: true,
            seat_wind: Wind::East,
            round_wind: Wind::East,
            ..WinContext::default()
        };
        // 20 + 2 tsumo + 4 pair (seat+round) + 4 triplet = 30
        assert_eq!(
            calculate(&div, &[], &ctx, WinPlacement::Block(0), 0, true),
            30
        );
    }

    #[test]
    fn open_ron_floor_is_thirty() {
        let div = Decomposition {
            pair: 10,
            blocks: vec![
                Block::Sequence(3),
                Block::Sequence(18),
                Block::Sequence(21),
            ],
        };
        let chi = Meld::new(MeldKind::Chi, vec![0, 4, 8], true);
        let ctx = WinContext::default();
        let fu = calculate(&div, &[chi], &ctx, WinPlacement::Block(0), 3, false);
        assert_eq!(fu, 30);
    }
}
