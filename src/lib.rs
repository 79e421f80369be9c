use pyo3::prelude::*;

pub mod context;
pub mod decompose;
pub mod dora;
pub mod evaluator;
pub mod fu;
pub mod parser;
pub mod rules;
pub mod score;
pub mod types;
pub mod wall;
pub mod yaku;

mod tests;

/// Tiles in a 14-tile hand whose discard leaves the rest tenpai.
#[pyfunction]
fn riichi_candidates(tiles_136: Vec<u8>) -> Vec<u8> {
    let mut candidates = Vec::new();
    for (i, &discard) in tiles_136.iter().enumerate() {
        let mut rest = types::TileCounts::new();
        for (j, &t) in tiles_136.iter().enumerate() {
            if i != j {
                rest.add(types::kind_of(t));
            }
        }
        if decompose::is_tenpai(&rest) {
            candidates.push(discard);
        }
    }
    candidates
}

#[pymodule]
fn mahjong_calculator(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<types::Meld>()?;
    m.add_class::<types::MeldKind>()?;
    m.add_class::<types::Wind>()?;
    m.add_class::<context::WinContext>()?;
    m.add_class::<rules::RuleSet>()?;
    m.add_class::<evaluator::Evaluator>()?;
    m.add_class::<evaluator::WinResult>()?;
    m.add_class::<wall::Wall>()?;

    m.add_function(wrap_pyfunction!(parser::parse_hand_py, m)?)?;
    m.add_function(wrap_pyfunction!(parser::parse_tile, m)?)?;
    m.add_function(wrap_pyfunction!(riichi_candidates, m)?)?;
    Ok(())
}
