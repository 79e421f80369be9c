//! Hand evaluation entry point: validate the tiles, find the best reading,
//! attach dora counters and settle the payment.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use serde::Serialize;

use crate::context::WinContext;
use crate::decompose;
use crate::dora::count_dora;
use crate::parser::parse_hand;
use crate::rules::RuleSet;
use crate::score::{limit_name, settle};
use crate::types::{kind_of, InvalidHand, Meld, TileCounts, RED_FIVES, TOTAL_TILES};
use crate::yaku::{self, HandView};

/// Outcome of a win claim. `win == false` carries a reason instead of a
/// score: `"shape_incomplete"` when no complete shape consumes the winning
/// tile, `"no_yaku"` when the shape is there but only dora would score.
#[pyclass]
#[derive(Debug, Clone, Serialize)]
pub struct WinResult {
    #[pyo3(get)]
    pub win: bool,
    #[pyo3(get)]
    pub reason: Option<String>,
    /// (name, han) pairs, detection order.
    #[pyo3(get)]
    pub yaku: Vec<(String, u8)>,
    #[pyo3(get)]
    pub han: u8,
    #[pyo3(get)]
    pub fu: u8,
    #[pyo3(get)]
    pub yakuman: u8,
    #[pyo3(get)]
    pub base: u32,
    #[pyo3(get)]
    pub total: u32,
    /// What the discarder owes on a ron; 0 on a tsumo.
    #[pyo3(get)]
    pub pay_ron: u32,
    /// What the dealer owes on a non-dealer tsumo; 0 otherwise.
    #[pyo3(get)]
    pub pay_tsumo_dealer: u32,
    /// What each non-dealer owes on a tsumo; 0 on a ron.
    #[pyo3(get)]
    pub pay_tsumo_non_dealer: u32,
    #[pyo3(get)]
    pub display: String,
    #[pyo3(get)]
    pub limit: Option<String>,
}

impl WinResult {
    fn no_win(reason: &str) -> Self {
        Self {
            win: false,
            reason: Some(reason.to_string()),
            yaku: Vec::new(),
            han: 0,
            fu: 0,
            yakuman: 0,
            base: 0,
            total: 0,
            pay_ron: 0,
            pay_tsumo_dealer: 0,
            pay_tsumo_non_dealer: 0,
            display: String::new(),
            limit: None,
        }
    }
}

#[pymethods]
impl WinResult {
    pub fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(self).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        if self.win {
            format!(
                "WinResult(han={}, fu={}, yakuman={}, total={})",
                self.han, self.fu, self.yakuman, self.total
            )
        } else {
            format!("WinResult(win=False, reason={:?})", self.reason)
        }
    }
}

/// A hand under evaluation: concealed tiles in 136 format (winning tile
/// included for `calc`, excluded for the tenpai queries) plus fixed melds.
#[pyclass]
#[derive(Debug, Clone)]
pub struct Evaluator {
    tiles: Vec<u8>,
    melds: Vec<Meld>,
}

#[pymethods]
impl Evaluator {
    #[new]
    #[pyo3(signature = (tiles, melds=Vec::new()))]
    pub fn new(tiles: Vec<u8>, melds: Vec<Meld>) -> PyResult<Self> {
        let hand = Self { tiles, melds };
        hand.validate()?;
        Ok(hand)
    }

    /// Build from text notation, e.g. `"234m567m234p44s(p5s)"`.
    #[staticmethod]
    pub fn from_text(text: &str) -> PyResult<Self> {
        let (tiles, melds) = parse_hand(text)?;
        Self::new(tiles, melds)
    }

    /// Score a completed hand. The concealed tiles must include the winning
    /// tile, for 14 tile-equivalents in total (a meld counts as three).
    #[pyo3(signature = (win_tile, dora_indicators, ura_indicators=Vec::new(), ctx=None, rules=None))]
    pub fn calc(
        &self,
        win_tile: u8,
        dora_indicators: Vec<u8>,
        ura_indicators: Vec<u8>,
        ctx: Option<WinContext>,
        rules: Option<RuleSet>,
    ) -> PyResult<WinResult> {
        let ctx = ctx.unwrap_or_default().normalized();
        let rules = rules.unwrap_or_default();
        if std::env::var("DEBUG").is_ok() {
            eprintln!(
                "DEBUG RUST: Evaluator::calc win_tile={} tsumo={} riichi={} melds={}",
                win_tile,
                ctx.tsumo,
                ctx.riichi,
                self.melds.len()
            );
        }
        self.check_equivalents(14)?;
        if !self.tiles.contains(&win_tile) {
            return Err(InvalidHand::WinTileNotInHand(win_tile).into());
        }

        let shape = self.concealed_counts();
        let full = self.full_counts();
        let view = HandView {
            shape14: &shape,
            full14: &full,
            melds: &self.melds,
            win_kind: kind_of(win_tile),
        };

        let Some(mut best) = yaku::evaluate(&view, &ctx, &rules) else {
            return Ok(WinResult::no_win("shape_incomplete"));
        };
        if !best.has_real_yaku() {
            return Ok(WinResult::no_win("no_yaku"));
        }

        let dora = count_dora(&full, &dora_indicators);
        let ura = if ctx.riichi {
            count_dora(&full, &ura_indicators)
        } else {
            0
        };
        let aka = if rules.allow_aka { self.red_fives() } else { 0 };
        yaku::append_counters(&mut best, dora, ura, aka);

        let payment = settle(best.han, best.fu, best.yakuman, &ctx, &rules);
        Ok(WinResult {
            win: true,
            reason: None,
            yaku: best
                .entries
                .iter()
                .map(|&(y, h)| (y.name().to_string(), h))
                .collect(),
            han: best.han,
            fu: best.fu,
            yakuman: best.yakuman,
            base: payment.base,
            limit: limit_name(payment.base).map(str::to_string),
            total: payment.total,
            pay_ron: payment.pay_ron,
            pay_tsumo_dealer: payment.pay_tsumo_dealer,
            pay_tsumo_non_dealer: payment.pay_tsumo_non_dealer,
            display: payment.display,
        })
    }

    /// Whether the 13-tile-equivalent hand is one tile from completion.
    pub fn is_tenpai(&self) -> PyResult<bool> {
        self.check_equivalents(13)?;
        Ok(decompose::is_tenpai(&self.concealed_counts()))
    }

    /// Every kind that would complete the hand, ascending.
    pub fn waits(&self) -> PyResult<Vec<u8>> {
        self.check_equivalents(13)?;
        Ok(decompose::waits(&self.concealed_counts()))
    }

    fn __repr__(&self) -> String {
        format!("Evaluator(tiles={:?}, melds={})", self.tiles, self.melds.len())
    }
}

impl Evaluator {
    fn validate(&self) -> Result<(), InvalidHand> {
        let mut seen = [false; TOTAL_TILES];
        let mut per_kind = [0u8; 34];
        let all = self
            .tiles
            .iter()
            .chain(self.melds.iter().flat_map(|m| m.tiles.iter()));
        for &t in all {
            if t as usize >= TOTAL_TILES {
                return Err(InvalidHand::TileOutOfRange(t));
            }
            if seen[t as usize] {
                return Err(InvalidHand::DuplicateTileId(t));
            }
            seen[t as usize] = true;
            per_kind[kind_of(t) as usize] += 1;
            if per_kind[kind_of(t) as usize] > 4 {
                return Err(InvalidHand::TooManyCopies(kind_of(t)));
            }
        }
        Ok(())
    }

    /// Concealed tiles plus three per meld; a quad still counts as three.
    fn check_equivalents(&self, expected: u8) -> Result<(), InvalidHand> {
        let got = self.tiles.len() as u8 + 3 * self.melds.len() as u8;
        if got != expected {
            return Err(InvalidHand::WrongTileCount { expected, got });
        }
        Ok(())
    }

    fn concealed_counts(&self) -> TileCounts {
        let mut c = TileCounts::new();
        for &t in &self.tiles {
            c.add(kind_of(t));
        }
        c
    }

    /// Every physical tile the hand owns, meld tiles (all four of a kan)
    /// included. Dora and flush checks run over this.
    fn full_counts(&self) -> TileCounts {
        let mut c = self.concealed_counts();
        for meld in &self.melds {
            for &t in &meld.tiles {
                c.add(kind_of(t));
            }
        }
        c
    }

    fn red_fives(&self) -> u8 {
        self.tiles
            .iter()
            .chain(self.melds.iter().flat_map(|m| m.tiles.iter()))
            .filter(|t| RED_FIVES.contains(t))
            .count() as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_tile;
    use crate::types::Wind;

    fn calc(
        hand: &Evaluator,
        win: &str,
        dora: Vec<u8>,
        ura: Vec<u8>,
        ctx: WinContext,
        rules: RuleSet,
    ) -> WinResult {
        hand.calc(parse_tile(win).unwrap(), dora, ura, Some(ctx), Some(rules))
            .unwrap()
    }

    #[test]
    fn riichi_tsumo_pinfu_with_ura() {
        // 234m 567m 234p 567s 44s, tsumo 2m. All simples, so riichi +
        // ippatsu + tsumo + pinfu + tanyao = 5 han, plus one ura
        // (indicator 6m -> dora 7m, one in hand).
        let hand = Evaluator::from_text("234m567m234p567s44s").unwrap();
        let ctx = WinContext {
            tsumo: true,
            riichi: true,
            ippatsu: true,
            seat_wind: Wind::South,
            ..WinContext::default()
        };
        let r = calc(
            &hand,
            "2m",
            vec![],
            vec![parse_tile("6m").unwrap()],
            ctx,
            RuleSet::default(),
        );
        assert!(r.win);
        let names: Vec<&str> = r.yaku.iter().map(|(n, _)| n.as_str()).collect();
        assert!(names.contains(&"Riichi"));
        assert!(names.contains(&"Ippatsu"));
        assert!(names.contains(&"Pinfu"));
        assert!(names.contains(&"Tanyao"));
        assert!(names.contains(&"Menzen Tsumo"));
        assert!(names.contains(&"Ura Dora"));
        assert_eq!(r.han, 6);
        assert_eq!(r.fu, 20);
        assert_eq!(r.limit.as_deref(), Some("Haneman"));
        assert_eq!(r.display, "3000-6000");
        assert_eq!(r.pay_tsumo_dealer, 6000);
        assert_eq!(r.pay_tsumo_non_dealer, 3000);
        assert_eq!(r.pay_ron, 0);
    }

    #[test]
    fn ura_ignored_without_riichi() {
        let hand = Evaluator::from_text("234m567m234p567s44s").unwrap();
        let ctx = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        let r = calc(
            &hand,
            "2m",
            vec![],
            vec![parse_tile("6m").unwrap()],
            ctx,
            RuleSet::default(),
        );
        assert!(r.win);
        assert!(!r.yaku.iter().any(|(n, _)| n == "Ura Dora"));
    }

    #[test]
    fn dora_alone_is_not_a_win() {
        // Open hand, ron, no yaku, but two dora.
        let hand = Evaluator::from_text("234m567m234p99p(456p)").unwrap();
        let r = hand
            .calc(
                parse_tile("2m").unwrap(),
                vec![parse_tile("8p").unwrap()], // indicator 8p -> dora 9p, pair matches
                vec![],
                None,
                None,
            )
            .unwrap();
        assert!(!r.win);
        assert_eq!(r.reason.as_deref(), Some("no_yaku"));
    }

    #[test]
    fn incomplete_shape_reported() {
        let hand = Evaluator::from_text("234m567m234p99s135s").unwrap();
        let r = hand
            .calc(parse_tile("2m").unwrap(), vec![], vec![], None, None)
            .unwrap();
        assert!(!r.win);
        assert_eq!(r.reason.as_deref(), Some("shape_incomplete"));
    }

    #[test]
    fn red_fives_count_when_allowed() {
        // Closed tsumo with a red 5s in the 456s run.
        let hand = Evaluator::from_text("234m567m234p99p046s").unwrap();
        let ctx = WinContext {
            tsumo: true,
            ..WinContext::default()
        };
        let r = calc(&hand, "0s", vec![], vec![], ctx.clone(), RuleSet::default());
        assert!(r.win);
        assert!(r.yaku.iter().any(|(n, h)| n == "Aka Dora" && *h == 1));

        let no_aka = RuleSet {
            allow_aka: false,
            ..RuleSet::default()
        };
        let hand = Evaluator::from_text("234m567m234p99p046s").unwrap();
        let r = calc(&hand, "0s", vec![], vec![], ctx, no_aka);
        assert!(r.win);
        assert!(!r.yaku.iter().any(|(n, _)| n == "Aka Dora"));
    }

    #[test]
    fn input_validation() {
        assert!(matches!(
            Evaluator::new(vec![0, 0], Vec::new()),
            Err(_)
        ));
        let hand = Evaluator::new(vec![0, 1, 2, 3], Vec::new()).unwrap();
        assert!(hand.calc(0, vec![], vec![], None, None).is_err()); // wrong count

        let hand = Evaluator::from_text("123m456m789m123p11s").unwrap();
        // 9s is not part of the hand.
        assert!(hand
            .calc(parse_tile("9s").unwrap(), vec![], vec![], None, None)
            .is_err());
    }

    #[test]
    fn tenpai_queries_need_thirteen_tiles() {
        let hand = Evaluator::from_text("123m456m789m123p1s").unwrap();
        assert!(hand.is_tenpai().unwrap());
        assert_eq!(hand.waits().unwrap(), vec![18]);

        let full = Evaluator::from_text("123m456m789m123p11s").unwrap();
        assert!(full.is_tenpai().is_err());
    }

    #[test]
    fn melded_hand_tenpai() {
        let hand = Evaluator::from_text("123m456m789m4p(p7z)").unwrap();
        assert!(hand.is_tenpai().unwrap());
        let w = hand.waits().unwrap();
        assert!(w.contains(&12)); // 4p tanki
    }

    #[test]
    fn json_round_trip_smoke() {
        let hand = Evaluator::from_text("123m456m789m123p11s").unwrap();
        let r = hand
            .calc(
                parse_tile("1s").unwrap(),
                vec![],
                vec![],
                Some(WinContext {
                    tsumo: true,
                    ..WinContext::default()
                }),
                None,
            )
            .unwrap();
        let json = r.to_json().unwrap();
        assert!(json.contains("\"win\":true"));
    }
}
