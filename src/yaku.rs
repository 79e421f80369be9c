//! Yaku catalog and detection.
//!
//! Detection runs over every decomposition of the concealed tiles (plus the
//! seven-pairs and thirteen-orphans interpretations where they apply) and
//! keeps the interpretation with the best aggregate value. Dora, ura dora and
//! aka dora are counted as plain han but never satisfy the one-yaku minimum.

use crate::context::WinContext;
use crate::decompose::{self, Block, Decomposition};
use crate::fu::{self, WaitKind, WinPlacement};
use crate::rules::RuleSet;
use crate::types::{
    is_honor, is_number_terminal, is_terminal_or_honor, Meld, MeldKind, TileCounts, TILE_KINDS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Yaku {
    // One-han situational and shape yaku.
    Riichi,
    DoubleRiichi,
    Ippatsu,
    MenzenTsumo,
    Pinfu,
    Tanyao,
    Iipeikou,
    RoundWind,
    SeatWind,
    Haku,
    Hatsu,
    Chun,
    Haitei,
    Houtei,
    Rinshan,
    Chankan,
    // Two-plus han shape yaku.
    SanshokuDoujun,
    SanshokuDoukou,
    Ittsu,
    Chanta,
    Junchan,
    Chiitoitsu,
    Toitoi,
    Sanankou,
    Sankantsu,
    Honroutou,
    Shousangen,
    Honitsu,
    Ryanpeikou,
    Chinitsu,
    // Yakuman.
    KokushiMusou,
    Suuankou,
    Daisangen,
    Shousuushii,
    Daisuushii,
    Tsuuiisou,
    Chinroutou,
    Ryuuiisou,
    Suukantsu,
    Tenhou,
    Chihou,
    // Counters reported alongside yaku; never satisfy the one-yaku minimum.
    Dora,
    UraDora,
    AkaDora,
}

impl Yaku {
    pub fn name(self) -> &'static str {
        match self {
            Yaku::Riichi => "Riichi",
            Yaku::DoubleRiichi => "Double Riichi",
            Yaku::Ippatsu => "Ippatsu",
            Yaku::MenzenTsumo => "Menzen Tsumo",
            Yaku::Pinfu => "Pinfu",
            Yaku::Tanyao => "Tanyao",
            Yaku::Iipeikou => "Iipeikou",
            Yaku::RoundWind => "Round Wind",
            Yaku::SeatWind => "Seat Wind",
            Yaku::Haku => "Haku",
            Yaku::Hatsu => "Hatsu",
            Yaku::Chun => "Chun",
            Yaku::Haitei => "Haitei",
            Yaku::Houtei => "Houtei",
            Yaku::Rinshan => "Rinshan",
            Yaku::Chankan => "Chankan",
            Yaku::SanshokuDoujun => "Sanshoku Doujun",
            Yaku::SanshokuDoukou => "Sanshoku Doukou",
            Yaku::Ittsu => "Ittsu",
            Yaku::Chanta => "Chanta",
            Yaku::Junchan => "Junchan",
            Yaku::Chiitoitsu => "Chiitoitsu",
            Yaku::Toitoi => "Toitoi",
            Yaku::Sanankou => "Sanankou",
            Yaku::Sankantsu => "Sankantsu",
            Yaku::Honroutou => "Honroutou",
            Yaku::Shousangen => "Shousangen",
            Yaku::Honitsu => "Honitsu",
            Yaku::Ryanpeikou => "Ryanpeikou",
            Yaku::Chinitsu => "Chinitsu",
            Yaku::KokushiMusou => "Kokushi Musou",
            Yaku::Suuankou => "Suuankou",
            Yaku::Daisangen => "Daisangen",
            Yaku::Shousuushii => "Shousuushii",
            Yaku::Daisuushii => "Daisuushii",
            Yaku::Tsuuiisou => "Tsuuiisou",
            Yaku::Chinroutou => "Chinroutou",
            Yaku::Ryuuiisou => "Ryuuiisou",
            Yaku::Suukantsu => "Suukantsu",
            Yaku::Tenhou => "Tenhou",
            Yaku::Chihou => "Chihou",
            Yaku::Dora => "Dora",
            Yaku::UraDora => "Ura Dora",
            Yaku::AkaDora => "Aka Dora",
        }
    }

    /// Han for a closed or open hand. Closed-only yaku return 0 when open;
    /// callers never emit those for open hands.
    pub fn han(self, closed: bool) -> u8 {
        match self {
            Yaku::Riichi
            | Yaku::Ippatsu
            | Yaku::MenzenTsumo
            | Yaku::Pinfu
            | Yaku::Tanyao
            | Yaku::Iipeikou
            | Yaku::RoundWind
            | Yaku::SeatWind
            | Yaku::Haku
            | Yaku::Hatsu
            | Yaku::Chun
            | Yaku::Haitei
            | Yaku::Houtei
            | Yaku::Rinshan
            | Yaku::Chankan => 1,
            Yaku::DoubleRiichi
            | Yaku::SanshokuDoukou
            | Yaku::Chiitoitsu
            | Yaku::Toitoi
            | Yaku::Sanankou
            | Yaku::Sankantsu
            | Yaku::Honroutou
            | Yaku::Shousangen => 2,
            Yaku::SanshokuDoujun | Yaku::Ittsu | Yaku::Chanta => {
                if closed {
                    2
                } else {
                    1
                }
            }
            Yaku::Junchan | Yaku::Honitsu => {
                if closed {
                    3
                } else {
                    2
                }
            }
            Yaku::Ryanpeikou => 3,
            Yaku::Chinitsu => {
                if closed {
                    6
                } else {
                    5
                }
            }
            Yaku::KokushiMusou
            | Yaku::Suuankou
            | Yaku::Daisangen
            | Yaku::Shousuushii
            | Yaku::Daisuushii
            | Yaku::Tsuuiisou
            | Yaku::Chinroutou
            | Yaku::Ryuuiisou
            | Yaku::Suukantsu
            | Yaku::Tenhou
            | Yaku::Chihou => 13,
            Yaku::Dora | Yaku::UraDora | Yaku::AkaDora => 0,
        }
    }

    pub fn is_counter(self) -> bool {
        matches!(self, Yaku::Dora | Yaku::UraDora | Yaku::AkaDora)
    }
}

/// One scored reading of the hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interpretation {
    pub entries: Vec<(Yaku, u8)>,
    pub han: u8,
    pub fu: u8,
    /// Yakuman multiple; ordinary hands are 0.
    pub yakuman: u8,
}

impl Interpretation {
    fn push(&mut self, yaku: Yaku, han: u8) {
        self.entries.push((yaku, han));
        self.han += han;
    }

    fn push_graded(&mut self, yaku: Yaku, closed: bool) {
        self.push(yaku, yaku.han(closed));
    }

    pub fn has_real_yaku(&self) -> bool {
        self.yakuman > 0 || self.entries.iter().any(|(y, _)| !y.is_counter())
    }

    fn canonical_key(&self) -> Vec<Yaku> {
        let mut ids: Vec<Yaku> = self.entries.iter().map(|&(y, _)| y).collect();
        ids.sort();
        ids
    }
}

/// Deterministic "strictly better" ordering over interpretations.
fn better(a: &Interpretation, b: &Interpretation) -> bool {
    if a.yakuman != b.yakuman {
        return a.yakuman > b.yakuman;
    }
    if a.han != b.han {
        return a.han > b.han;
    }
    if a.fu != b.fu {
        return a.fu > b.fu;
    }
    if a.entries.len() != b.entries.len() {
        return a.entries.len() > b.entries.len();
    }
    a.canonical_key() < b.canonical_key()
}

/// Hand snapshot as the detector sees it: the concealed counts to decompose
/// (`shape14`, winning tile included, meld tiles pre-consumed and absent),
/// the full multiset including every meld tile (`full14`), and the fixed
/// melds themselves.
pub struct HandView<'a> {
    pub shape14: &'a TileCounts,
    pub full14: &'a TileCounts,
    pub melds: &'a [Meld],
    pub win_kind: u8,
}

impl HandView<'_> {
    fn closed(&self) -> bool {
        self.melds.iter().all(|m| !m.open)
    }

    fn meld_sequence_starts(&self) -> Vec<u8> {
        self.melds
            .iter()
            .filter(|m| m.kind == MeldKind::Chi)
            .map(|m| m.base_kind())
            .collect()
    }

    fn meld_triplet_kinds(&self) -> Vec<u8> {
        self.melds
            .iter()
            .filter(|m| m.is_triplet_like())
            .map(|m| m.base_kind())
            .collect()
    }

    fn quad_count(&self) -> usize {
        self.melds.iter().filter(|m| m.kind.is_quad()).count()
    }

    fn ankan_count(&self) -> usize {
        self.melds
            .iter()
            .filter(|m| m.kind == MeldKind::Ankan)
            .count()
    }
}

/// Evaluate the hand and return the best interpretation, without dora
/// counters. `None` means no complete shape consumes the winning tile.
pub fn evaluate(view: &HandView, ctx: &WinContext, rules: &RuleSet) -> Option<Interpretation> {
    if view.melds.is_empty() && decompose::is_thirteen_orphans(view.shape14) {
        return Some(kokushi_interpretation(view, ctx));
    }

    let mut best: Option<Interpretation> = None;
    let mut consider = |cand: Interpretation| {
        if best.as_ref().is_none_or(|b| better(&cand, b)) {
            best = Some(cand);
        }
    };

    if view.melds.is_empty() && decompose::is_seven_pairs(view.shape14) {
        consider(seven_pairs_interpretation(view, ctx));
    }

    for div in decompose::decompositions(view.shape14) {
        for placement in win_placements(&div, view.win_kind) {
            consider(score_division(view, &div, placement, ctx, rules));
        }
    }

    best
}

/// Append dora/ura/aka counter han to a winning interpretation. Yakuman hands
/// are already at the ceiling and take no counters.
pub fn append_counters(interp: &mut Interpretation, dora: u8, ura: u8, aka: u8) {
    if interp.yakuman > 0 {
        return;
    }
    if dora > 0 {
        interp.push(Yaku::Dora, dora);
    }
    if ura > 0 {
        interp.push(Yaku::UraDora, ura);
    }
    if aka > 0 {
        interp.push(Yaku::AkaDora, aka);
    }
}

fn win_placements(div: &Decomposition, win_kind: u8) -> Vec<WinPlacement> {
    let mut out = Vec::new();
    if div.pair == win_kind {
        out.push(WinPlacement::Pair);
    }
    for (i, block) in div.blocks.iter().enumerate() {
        if block.contains(win_kind) {
            out.push(WinPlacement::Block(i));
        }
    }
    out
}

fn kokushi_interpretation(view: &HandView, ctx: &WinContext) -> Interpretation {
    let mut interp = Interpretation::default();
    interp.yakuman = 1;
    interp.push(Yaku::KokushiMusou, 13);
    add_first_turn_yakuman(&mut interp, view, ctx);
    interp
}

fn add_first_turn_yakuman(interp: &mut Interpretation, view: &HandView, ctx: &WinContext) {
    if ctx.first_turn && ctx.tsumo && view.melds.is_empty() {
        interp.yakuman += 1;
        if ctx.is_dealer() {
            interp.push(Yaku::Tenhou, 13);
        } else {
            interp.push(Yaku::Chihou, 13);
        }
    }
}

fn seven_pairs_interpretation(view: &HandView, ctx: &WinContext) -> Interpretation {
    let mut interp = Interpretation::default();

    if all_honors(view.full14) {
        interp.yakuman = 1;
        interp.push(Yaku::Tsuuiisou, 13);
    }
    add_first_turn_yakuman(&mut interp, view, ctx);
    if interp.yakuman > 0 {
        return interp;
    }

    interp.push_graded(Yaku::Chiitoitsu, true);
    interp.fu = 25;
    push_context_yaku(&mut interp, ctx, true);
    if is_tanyao(view.full14) {
        interp.push_graded(Yaku::Tanyao, true);
    }
    match flush_kind(view.full14) {
        Some(Flush::Full) => interp.push_graded(Yaku::Chinitsu, true),
        Some(Flush::Half) => interp.push_graded(Yaku::Honitsu, true),
        None => {}
    }
    if all_terminals_or_honors(view.full14) {
        interp.push_graded(Yaku::Honroutou, true);
    }
    interp
}

fn score_division(
    view: &HandView,
    div: &Decomposition,
    placement: WinPlacement,
    ctx: &WinContext,
    rules: &RuleSet,
) -> Interpretation {
    let closed = view.closed();
    let meld_trips = view.meld_triplet_kinds();
    let meld_seqs = view.meld_sequence_starts();

    let div_triplets: Vec<u8> = div
        .blocks
        .iter()
        .filter_map(|b| match *b {
            Block::Triplet(k) => Some(k),
            _ => None,
        })
        .collect();
    let div_seqs: Vec<u8> = div
        .blocks
        .iter()
        .filter_map(|b| match *b {
            Block::Sequence(s) => Some(s),
            _ => None,
        })
        .collect();

    let triplet_kinds: Vec<u8> = div_triplets
        .iter()
        .chain(meld_trips.iter())
        .copied()
        .collect();
    let seq_starts: Vec<u8> = div_seqs.iter().chain(meld_seqs.iter()).copied().collect();

    // A concealed triplet finished by ron counts as open.
    let ron_completed_triplet = !ctx.tsumo
        && matches!(placement, WinPlacement::Block(i)
            if matches!(div.blocks[i], Block::Triplet(_)));
    let concealed_triplets =
        div_triplets.len() - usize::from(ron_completed_triplet) + view.ankan_count();

    if let Some(interp) = yakuman_interpretation(
        view,
        div,
        &triplet_kinds,
        concealed_triplets,
        ctx,
        rules,
    ) {
        return interp;
    }

    let mut interp = Interpretation::default();
    push_context_yaku(&mut interp, ctx, closed);

    // Pinfu: closed, no melds, all sequences, valueless pair, two-sided wait.
    let pinfu = closed
        && view.melds.is_empty()
        && div_triplets.is_empty()
        && !is_value_pair(div.pair, ctx)
        && fu::wait_kind(div, placement, view.win_kind) == WaitKind::Ryanmen;
    if pinfu {
        interp.push_graded(Yaku::Pinfu, true);
        interp.fu = if ctx.tsumo { 20 } else { 30 };
    } else {
        interp.fu = fu::calculate(div, view.melds, ctx, placement, view.win_kind, closed);
    }

    if is_tanyao(view.full14) && (closed || rules.allow_kuitan) {
        interp.push_graded(Yaku::Tanyao, closed);
    }

    // Yakuhai triplets; seat and round wind both fire when they coincide.
    let has_triplet = |kind: u8| triplet_kinds.contains(&kind);
    if has_triplet(ctx.round_wind.kind()) {
        interp.push_graded(Yaku::RoundWind, closed);
    }
    if has_triplet(ctx.seat_wind.kind()) {
        interp.push_graded(Yaku::SeatWind, closed);
    }
    if has_triplet(31) {
        interp.push_graded(Yaku::Haku, closed);
    }
    if has_triplet(32) {
        interp.push_graded(Yaku::Hatsu, closed);
    }
    if has_triplet(33) {
        interp.push_graded(Yaku::Chun, closed);
    }

    let dragon_triplets = [31u8, 32, 33]
        .iter()
        .filter(|&&k| has_triplet(k))
        .count();
    if dragon_triplets == 2 && div.pair >= 31 {
        interp.push_graded(Yaku::Shousangen, closed);
    }

    // Identical concealed sequences.
    if closed {
        let mut sorted = div_seqs.clone();
        sorted.sort_unstable();
        let mut pairs = 0;
        let mut i = 0;
        while i + 1 < sorted.len() {
            if sorted[i] == sorted[i + 1] {
                pairs += 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        if pairs == 2 {
            interp.push_graded(Yaku::Ryanpeikou, true);
        } else if pairs == 1 {
            interp.push_graded(Yaku::Iipeikou, true);
        }
    }

    if has_ittsu(&seq_starts) {
        interp.push_graded(Yaku::Ittsu, closed);
    }
    if has_sanshoku_doujun(&seq_starts) {
        interp.push_graded(Yaku::SanshokuDoujun, closed);
    }
    if has_sanshoku_doukou(&triplet_kinds) {
        interp.push_graded(Yaku::SanshokuDoukou, closed);
    }

    if triplet_kinds.len() == 4 {
        interp.push_graded(Yaku::Toitoi, closed);
    }
    if concealed_triplets == 3 {
        interp.push_graded(Yaku::Sanankou, closed);
    }
    if view.quad_count() == 3 {
        interp.push_graded(Yaku::Sankantsu, closed);
    }

    if all_terminals_or_honors(view.full14) {
        interp.push_graded(Yaku::Honroutou, closed);
    } else if is_junchan(div, view.melds) {
        interp.push_graded(Yaku::Junchan, closed);
    } else if is_chanta(div, view.melds) {
        interp.push_graded(Yaku::Chanta, closed);
    }

    match flush_kind(view.full14) {
        Some(Flush::Full) => interp.push_graded(Yaku::Chinitsu, closed),
        Some(Flush::Half) => interp.push_graded(Yaku::Honitsu, closed),
        None => {}
    }

    interp
}

fn yakuman_interpretation(
    view: &HandView,
    div: &Decomposition,
    triplet_kinds: &[u8],
    concealed_triplets: usize,
    ctx: &WinContext,
    rules: &RuleSet,
) -> Option<Interpretation> {
    let mut interp = Interpretation::default();
    let has_triplet = |kind: u8| triplet_kinds.contains(&kind);

    if concealed_triplets == 4 {
        interp.yakuman += 1;
        interp.push(Yaku::Suuankou, 13);
    }
    if [31u8, 32, 33].iter().all(|&k| has_triplet(k)) {
        interp.yakuman += 1;
        interp.push(Yaku::Daisangen, 13);
    }
    let wind_triplets = (27u8..=30).filter(|&k| has_triplet(k)).count();
    if wind_triplets == 4 {
        let multiple = if rules.double_yakuman { 2 } else { 1 };
        interp.yakuman += multiple;
        interp.push(Yaku::Daisuushii, 13 * multiple);
    } else if wind_triplets == 3 && (27..=30).contains(&div.pair) {
        interp.yakuman += 1;
        interp.push(Yaku::Shousuushii, 13);
    }
    if all_honors(view.full14) {
        interp.yakuman += 1;
        interp.push(Yaku::Tsuuiisou, 13);
    }
    if all_number_terminals(view.full14) {
        interp.yakuman += 1;
        interp.push(Yaku::Chinroutou, 13);
    }
    if all_greens(view.full14) {
        interp.yakuman += 1;
        interp.push(Yaku::Ryuuiisou, 13);
    }
    if view.quad_count() == 4 {
        interp.yakuman += 1;
        interp.push(Yaku::Suukantsu, 13);
    }
    add_first_turn_yakuman(&mut interp, view, ctx);

    if interp.yakuman > 0 {
        Some(interp)
    } else {
        None
    }
}

fn push_context_yaku(interp: &mut Interpretation, ctx: &WinContext, closed: bool) {
    if ctx.double_riichi {
        interp.push_graded(Yaku::DoubleRiichi, true);
    } else if ctx.riichi {
        interp.push_graded(Yaku::Riichi, true);
    }
    if ctx.ippatsu {
        interp.push_graded(Yaku::Ippatsu, true);
    }
    if closed && ctx.tsumo {
        interp.push_graded(Yaku::MenzenTsumo, true);
    }
    if ctx.haitei {
        interp.push_graded(Yaku::Haitei, closed);
    }
    if ctx.houtei {
        interp.push_graded(Yaku::Houtei, closed);
    }
    if ctx.rinshan {
        interp.push_graded(Yaku::Rinshan, closed);
    }
    if ctx.chankan {
        interp.push_graded(Yaku::Chankan, closed);
    }
}

fn is_value_pair(pair: u8, ctx: &WinContext) -> bool {
    pair >= 31 || pair == ctx.seat_wind.kind() || pair == ctx.round_wind.kind()
}

fn is_tanyao(full: &TileCounts) -> bool {
    (0..TILE_KINDS as u8).all(|k| full.get(k) == 0 || !is_terminal_or_honor(k))
}

fn all_terminals_or_honors(full: &TileCounts) -> bool {
    (0..TILE_KINDS as u8).all(|k| full.get(k) == 0 || is_terminal_or_honor(k))
}

fn all_honors(full: &TileCounts) -> bool {
    (0..27u8).all(|k| full.get(k) == 0)
}

fn all_number_terminals(full: &TileCounts) -> bool {
    (0..TILE_KINDS as u8).all(|k| full.get(k) == 0 || is_number_terminal(k))
}

/// Green tiles: 2,3,4,6,8 sou and Hatsu.
fn all_greens(full: &TileCounts) -> bool {
    const GREENS: [u8; 6] = [19, 20, 21, 23, 25, 32];
    (0..TILE_KINDS as u8).all(|k| full.get(k) == 0 || GREENS.contains(&k))
}

enum Flush {
    Half,
    Full,
}

fn flush_kind(full: &TileCounts) -> Option<Flush> {
    let mut suits = [false; 3];
    let mut honors = false;
    for k in 0..TILE_KINDS as u8 {
        if full.get(k) == 0 {
            continue;
        }
        if is_honor(k) {
            honors = true;
        } else {
            suits[(k / 9) as usize] = true;
        }
    }
    match (suits.iter().filter(|&&s| s).count(), honors) {
        (1, false) => Some(Flush::Full),
        (1, true) => Some(Flush::Half),
        _ => None,
    }
}

fn has_ittsu(seq_starts: &[u8]) -> bool {
    [0u8, 9, 18].iter().any(|&base| {
        seq_starts.contains(&base)
            && seq_starts.contains(&(base + 3))
            && seq_starts.contains(&(base + 6))
    })
}

fn has_sanshoku_doujun(seq_starts: &[u8]) -> bool {
    (0..7u8).any(|i| {
        seq_starts.contains(&i) && seq_starts.contains(&(i + 9)) && seq_starts.contains(&(i + 18))
    })
}

fn has_sanshoku_doukou(triplet_kinds: &[u8]) -> bool {
    (0..9u8).any(|i| {
        triplet_kinds.contains(&i)
            && triplet_kinds.contains(&(i + 9))
            && triplet_kinds.contains(&(i + 18))
    })
}

fn is_junchan(div: &Decomposition, melds: &[Meld]) -> bool {
    if !is_number_terminal(div.pair) {
        return false;
    }
    let block_ok = |b: &Block| match *b {
        Block::Triplet(k) => is_number_terminal(k),
        Block::Sequence(s) => s % 9 == 0 || s % 9 == 6,
    };
    if !div.blocks.iter().all(block_ok) {
        return false;
    }
    melds.iter().all(|m| {
        let k = m.base_kind();
        if m.is_triplet_like() {
            is_number_terminal(k)
        } else {
            k % 9 == 0 || k % 9 == 6
        }
    })
}

fn is_chanta(div: &Decomposition, melds: &[Meld]) -> bool {
    if !is_terminal_or_honor(div.pair) {
        return false;
    }
    let block_ok = |b: &Block| match *b {
        Block::Triplet(k) => is_terminal_or_honor(k),
        Block::Sequence(s) => s % 9 == 0 || s % 9 == 6,
    };
    if !div.blocks.iter().all(block_ok) {
        return false;
    }
    melds.iter().all(|m| {
        let k = m.base_kind();
        if m.is_triplet_like() {
            is_terminal_or_honor(k)
        } else {
            k % 9 == 0 || k % 9 == 6
        }
    })
}
