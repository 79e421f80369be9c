use pyo3::{pyclass, pymethods};
use serde::{Deserialize, Serialize};

/// Table rules that change how the evaluator grades a hand.
#[pyclass]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleSet {
    /// Open tanyao counts as a yaku.
    #[pyo3(get, set)]
    pub allow_kuitan: bool,
    /// Red fives add aka-dora han.
    #[pyo3(get, set)]
    pub allow_aka: bool,
    /// Round 4 han 30 fu and 3 han 60 fu up to mangan.
    #[pyo3(get, set)]
    pub kiriage_mangan: bool,
    /// Daisuushii counts as a double yakuman.
    #[pyo3(get, set)]
    pub double_yakuman: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[pymethods]
impl RuleSet {
    #[new]
    #[pyo3(signature = (allow_kuitan=true, allow_aka=true, kiriage_mangan=false, double_yakuman=true))]
    pub fn new(
        allow_kuitan: bool,
        allow_aka: bool,
        kiriage_mangan: bool,
        double_yakuman: bool,
    ) -> Self {
        Self {
            allow_kuitan,
            allow_aka,
            kiriage_mangan,
            double_yakuman,
        }
    }

    /// Common online ruleset: kuitan and red fives on.
    #[staticmethod]
    pub fn standard() -> Self {
        Self {
            allow_kuitan: true,
            allow_aka: true,
            kiriage_mangan: false,
            double_yakuman: true,
        }
    }

    /// Stricter offline ruleset: no red fives, single yakuman only.
    #[staticmethod]
    pub fn competition() -> Self {
        Self {
            allow_kuitan: true,
            allow_aka: false,
            kiriage_mangan: false,
            double_yakuman: false,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "RuleSet(allow_kuitan={}, allow_aka={}, kiriage_mangan={}, double_yakuman={})",
            self.allow_kuitan, self.allow_aka, self.kiriage_mangan, self.double_yakuman
        )
    }
}
