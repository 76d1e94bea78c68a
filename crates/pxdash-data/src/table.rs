use crate::endp::quotes::Observation;
use crate::SecuritySeries;
use chrono::NaiveDate;
use std::fmt;

/// Ratio of |change| to previous price at which a move gets flagged.
const HIGHLIGHT_THRESHOLD: f64 = 0.10;

/// Visual emphasis flag for a large price move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    None,
    Yellow,
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Highlight::None => write!(f, "None"),
            Highlight::Yellow => write!(f, "Yellow"),
        }
    }
}

/// One dashboard row per security.
///
/// `price`, `dated` and `change` are all absent when the service had
/// no data for the code; `change` is also absent when only a single
/// observation exists.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub sedol: String,
    pub price: Option<f64>,
    pub dated: Option<NaiveDate>,
    pub change: Option<f64>,
    pub highlight: Highlight,
}

/// Derive the change & highlight columns for one security, given its
/// observations oldest-first.
///
/// The row shows the latest observation; the change is measured
/// against the one before it. A missing previous observation leaves
/// the change absent rather than erroring.
pub fn derive_row(sedol: &str, observations: &[Observation]) -> PriceRow {
    let latest = observations.last();
    let previous = observations
        .len()
        .checked_sub(2)
        .and_then(|at| observations.get(at));

    let change = match (latest, previous) {
        (Some(latest), Some(previous)) => Some(latest.price - previous.price),
        _ => None,
    };

    PriceRow {
        sedol: sedol.to_string(),
        price: latest.map(|observation| observation.price),
        dated: latest.map(|observation| observation.dated),
        change,
        highlight: highlight(change, previous.map(|observation| observation.price)),
    }
}

/// Yellow iff the previous price is known, non-zero, and the move is
/// at least [`HIGHLIGHT_THRESHOLD`] of it. A zero or missing previous
/// price never flags, and never divides.
fn highlight(change: Option<f64>, previous_price: Option<f64>) -> Highlight {
    match (change, previous_price) {
        (Some(change), Some(previous)) if previous != 0.0 => {
            if (change.abs() / previous) >= HIGHLIGHT_THRESHOLD {
                Highlight::Yellow
            } else {
                Highlight::None
            }
        }
        _ => Highlight::None,
    }
}

/// Assemble the dashboard table: one row per fetched series, in the
/// order the series arrive (which follows the universe file).
pub fn build_table(series: &[SecuritySeries]) -> Vec<PriceRow> {
    series
        .iter()
        .map(|security| derive_row(&security.sedol, &security.observations))
        .collect()
}
