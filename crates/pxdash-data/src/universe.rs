use anyhow::{anyhow, Context, Result};
use std::path::Path;

/// Read the security universe from a CSV file with a `SEDOL` header
/// column, preserving file order.
pub fn load(path: &Path) -> Result<Vec<String>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open universe file: {}", path.display()))?;
    from_reader(reader)
}

/// Reader-generic core of [`load`].
pub fn from_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<String>> {
    let headers = reader.headers()?.clone();
    let sedol_col = headers
        .iter()
        .position(|header| header.trim() == "SEDOL")
        .ok_or_else(|| anyhow!("universe file has no SEDOL column"))?;

    let mut sedols = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed universe record")?;
        match record.get(sedol_col).map(str::trim) {
            Some(code) if !code.is_empty() => sedols.push(code.to_string()),
            _ => log::warn!("skipping universe row with a blank SEDOL cell"),
        }
    }
    Ok(sedols)
}
