//! OSU micro-benchmark logs (`osu_bw`, `osu_latency`, `osu_gather`, ...), saved as `.dat`.
//!
//! A log is a few `#` banner lines, a `# Size  <column>(<unit>) ...` header and one
//! whitespace-separated row per message size.

use crate::{
    measurement::{Measurement, MeasurementKind, Measurements},
    scan::{files_with_suffix, read_to_string, stem_parts},
    table::{parse_delimited, redelimit},
    Error, Result, Table,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static RE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^# Size[ \t]+(.*?)[ \t\r]*$").expect("valid regex"));

/// Index column name of every OSU table.
pub const SIZE: &str = "Size";

/// Splits the header text after `# Size` into column names. Names end with their unit in
/// parentheses, so each `)` closes one name.
pub fn header_columns(raw: &str) -> Vec<String> {
    let mut columns = Vec::new();
    let mut rest = raw;
    while let Some(end) = rest.find(')') {
        let name = rest[..=end].trim();
        if !name.is_empty() {
            columns.push(name.to_owned());
        }
        rest = &rest[end + 1..];
    }
    let tail = rest.trim();
    if !tail.is_empty() {
        columns.push(tail.to_owned());
    }
    columns
}

/// Parses one log into a table indexed by message size.
pub fn parse(path: &Path, text: &str) -> Result<Table> {
    let header = RE_HEADER
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::format(path, "no `# Size` header line"))?;

    let mut names = vec![SIZE.to_owned()];
    names.extend(header_columns(header.as_str()));

    let body = text
        .lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n");
    parse_delimited(path, &redelimit(&body, ';'), b';', &names)
}

/// Measurement name from a log file name: its last two `_`-separated parts (`..._osu_bw` -> `osu_bw`).
pub fn measurement_name(path: &Path) -> String {
    let parts = stem_parts(path);
    let from = parts.len().saturating_sub(2);
    parts[from..].join("_")
}

/// MPI implementation from a campaign directory name (`measurements_osu_<mpi>_...`).
pub fn mpi_type(campaign: &str) -> Option<String> {
    campaign.split('_').nth(2).map(str::to_owned)
}

fn kind_of(table: &Table) -> MeasurementKind {
    match table.first_column() {
        Some(c) if c.contains("MB/s") => MeasurementKind::Bandwidth,
        _ => MeasurementKind::Latency,
    }
}

/// Loads every `.dat` log of campaign directory `campaign` under `data_dir`.
pub fn load_measurements(data_dir: &Path, campaign: &str) -> Result<Measurements> {
    let dir = data_dir.join(campaign);
    let mpi = mpi_type(campaign);
    let mut measurements = Measurements::default();
    for file in files_with_suffix(&dir, "dat")? {
        let table = parse(&file, &read_to_string(&file)?)?;
        let name = measurement_name(&file);
        let mut m = Measurement::new(name.clone(), file, kind_of(&table), table);
        if let Some(mpi) = &mpi {
            m = m.with_mpi_type(mpi.clone());
        }
        measurements.insert(name, m);
    }
    Ok(measurements)
}
