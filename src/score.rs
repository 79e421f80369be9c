//! Han/fu to points conversion and payment splitting.

use serde::{Deserialize, Serialize};

use crate::context::WinContext;
use crate::rules::RuleSet;

fn ceil_100(points: u32) -> u32 {
    points.div_ceil(100) * 100
}

/// Base points ("one share") before the dealer/non-dealer multipliers.
pub fn base_points(han: u8, fu: u8, yakuman: u8, rules: &RuleSet) -> u32 {
    if yakuman > 0 {
        return 8000 * yakuman as u32;
    }
    match han {
        0 => 0,
        13.. => 8000,
        11 | 12 => 6000,
        8..=10 => 4000,
        6 | 7 => 3000,
        5 => 2000,
        _ => {
            let raw = fu as u32 * (1u32 << (2 + han as u32));
            if rules.kiriage_mangan && raw >= 1920 {
                return 2000;
            }
            raw.min(2000)
        }
    }
}

/// Limit-tier label, when the hand reaches one.
pub fn limit_name(base: u32) -> Option<&'static str> {
    match base {
        2000 => Some("Mangan"),
        3000 => Some("Haneman"),
        4000 => Some("Baiman"),
        6000 => Some("Sanbaiman"),
        8000.. => Some("Yakuman"),
        _ => None,
    }
}

/// The winner's take for one hand, honba and riichi sticks included.
/// Per-payer fields are zero when they do not apply to the win type
/// (a dealer collects the same amount from everyone, so a dealer tsumo
/// fills only `pay_tsumo_non_dealer`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub base: u32,
    /// Everything the winner collects: payments, honba, deposit sticks.
    pub total: u32,
    /// What the discarder owes on a ron.
    pub pay_ron: u32,
    /// What the dealer owes on a non-dealer tsumo.
    pub pay_tsumo_dealer: u32,
    /// What each non-dealer owes on a tsumo.
    pub pay_tsumo_non_dealer: u32,
    /// Table notation: a plain number for ron, "N all" for a dealer tsumo,
    /// "a-b" for a non-dealer tsumo.
    pub display: String,
}

pub fn settle(han: u8, fu: u8, yakuman: u8, ctx: &WinContext, rules: &RuleSet) -> Payment {
    let base = base_points(han, fu, yakuman, rules);
    let sticks = ctx.riichi_sticks * 1000;
    let dealer = ctx.is_dealer();

    if ctx.tsumo {
        if dealer {
            let each = ceil_100(base * 2) + ctx.honba * 100;
            Payment {
                base,
                total: each * 3 + sticks,
                pay_ron: 0,
                pay_tsumo_dealer: 0,
                pay_tsumo_non_dealer: each,
                display: format!("{each} all"),
            }
        } else {
            let small = ceil_100(base) + ctx.honba * 100;
            let big = ceil_100(base * 2) + ctx.honba * 100;
            Payment {
                base,
                total: small * 2 + big + sticks,
                pay_ron: 0,
                pay_tsumo_dealer: big,
                pay_tsumo_non_dealer: small,
                display: format!("{small}-{big}"),
            }
        }
    } else {
        let from_discarder = ceil_100(base * if dealer { 6 } else { 4 }) + ctx.honba * 300;
        Payment {
            base,
            total: from_discarder + sticks,
            pay_ron: from_discarder,
            pay_tsumo_dealer: 0,
            pay_tsumo_non_dealer: 0,
            display: from_discarder.to_string(),
        }
    }
}
