//! Immutable snapshot of the circumstances a win was claimed under, plus the
//! timing normalization that keeps the situational bonuses mutually
//! consistent before yaku detection sees them.

use crate::types::Wind;
use pyo3::prelude::*;

#[pyclass]
#[derive(Debug, Clone)]
pub struct WinContext {
    /// Completing tile was self-drawn (otherwise claimed from a discard).
    #[pyo3(get, set)]
    pub tsumo: bool,
    #[pyo3(get, set)]
    pub riichi: bool,
    /// Riichi declared on the first uninterrupted discard.
    #[pyo3(get, set)]
    pub double_riichi: bool,
    /// Win before the next own draw after riichi, with no intervening call.
    #[pyo3(get, set)]
    pub ippatsu: bool,
    /// Self-draw on the last tile of the live wall.
    #[pyo3(get, set)]
    pub haitei: bool,
    /// Win on the last discard before wall exhaustion.
    #[pyo3(get, set)]
    pub houtei: bool,
    /// Self-draw immediately following a kan replacement draw.
    #[pyo3(get, set)]
    pub rinshan: bool,
    /// Win by robbing an added kan.
    #[pyo3(get, set)]
    pub chankan: bool,
    /// Win on the very first uninterrupted turn (tenhou/chihou).
    #[pyo3(get, set)]
    pub first_turn: bool,
    #[pyo3(get, set)]
    pub seat_wind: Wind,
    #[pyo3(get, set)]
    pub round_wind: Wind,
    /// Carried-over repeat sticks, 300 points each.
    #[pyo3(get, set)]
    pub honba: u32,
    /// Riichi deposit sticks on the table, 1000 points each.
    #[pyo3(get, set)]
    pub riichi_sticks: u32,
}

impl Default for WinContext {
    fn default() -> Self {
        Self {
            tsumo: false,
            riichi: false,
            double_riichi: false,
            ippatsu: false,
            haitei: false,
            houtei: false,
            rinshan: false,
            chankan: false,
            first_turn: false,
            seat_wind: Wind::East,
            round_wind: Wind::East,
            honba: 0,
            riichi_sticks: 0,
        }
    }
}

#[pymethods]
impl WinContext {
    #[allow(clippy::too_many_arguments)]
    #[new]
    #[pyo3(signature = (tsumo=false, riichi=false, double_riichi=false, ippatsu=false, haitei=false, houtei=false, rinshan=false, chankan=false, first_turn=false, seat_wind=Wind::East, round_wind=Wind::East, honba=0, riichi_sticks=0))]
    pub fn new(
        tsumo: bool,
        riichi: bool,
        double_riichi: bool,
        ippatsu: bool,
        haitei: bool,
        houtei: bool,
        rinshan: bool,
        chankan: bool,
        first_turn: bool,
        seat_wind: Wind,
        round_wind: Wind,
        honba: u32,
        riichi_sticks: u32,
    ) -> Self {
        Self {
            tsumo,
            riichi,
            double_riichi,
            ippatsu,
            haitei,
            houtei,
            rinshan,
            chankan,
            first_turn,
            seat_wind,
            round_wind,
            honba,
            riichi_sticks,
        }
    }

    fn __repr__(&self) -> String {
        format!("{self:?}")
    }
}

impl WinContext {
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == Wind::East
    }

    /// Resolve the timing flags into a consistent set:
    ///
    /// - double riichi implies riichi; ippatsu requires riichi
    /// - a kan (even one's own) between riichi and the win voids ippatsu,
    ///   so rinshan clears it
    /// - haitei and rinshan are self-draw bonuses, houtei and chankan are
    ///   discard-side; the tsumo flag decides which side can fire
    /// - rinshan takes precedence over haitei when both are flagged
    ///   (the replacement tile is not a live-wall draw)
    pub fn normalized(&self) -> Self {
        let mut c = self.clone();
        if c.double_riichi {
            c.riichi = true;
        }
        if !c.riichi {
            c.ippatsu = false;
        }
        if c.tsumo {
            c.houtei = false;
            c.chankan = false;
        } else {
            c.haitei = false;
            c.rinshan = false;
        }
        if c.rinshan {
            c.haitei = false;
            c.ippatsu = false;
        }
        c
    }
}
