pub mod client_ext;
pub mod endp;
pub mod table;
pub mod universe;
pub mod www;

use endp::quotes;

/// Everything fetched for a single security, keyed by SEDOL.
///
/// Observations arrive oldest-first; an empty list means the
/// market-data service had nothing for the code.
#[derive(Debug, Clone)]
pub struct SecuritySeries {
    pub sedol: String,
    pub observations: Vec<quotes::Observation>,
}
