//! Raw CXI (HPE Slingshot) benchmark logs from the `cxi_*_lat` / `cxi_*_bw` tools, saved as `.dat`.
//!
//! The tools frame their output with `---` rules: a banner, then the column header and the
//! result rows, then a closing rule.

use crate::{
    measurement::{Measurement, MeasurementKind, Measurements},
    scan::{files_with_suffix, read_to_string, stem, stem_parts},
    table::{parse_delimited, redelimit},
    Error, Result, Table,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static RE_HEADER_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}|\t").expect("valid regex"));

pub const MEAN_US: &str = "Mean[us]";
pub const STDDEV_US: &str = "StdDev[us]";
pub const BW_MBS: &str = "BW[MB/s]";

/// Parses one log into a table indexed by the first header column (the transfer size).
pub fn parse(path: &Path, text: &str) -> Result<Table> {
    let lines: Vec<&str> = text.lines().collect();
    let rules: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with("---"))
        .map(|(i, _)| i)
        .collect();
    let (header_at, end) = match rules.as_slice() {
        [_, second, third, ..] if *third > second + 1 => (second + 1, *third),
        [_, _, _, ..] => {
            return Err(Error::format(
                path,
                "no header line between the second and third `---` rules",
            ))
        }
        _ => {
            return Err(Error::format(
                path,
                format!("expected three `---` rules, found {}", rules.len()),
            ))
        }
    };

    let names: Vec<String> = RE_HEADER_SEP
        .split(lines[header_at].trim())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if names.is_empty() {
        return Err(Error::format(path, "empty column header"));
    }

    let body = lines[header_at + 1..end].join("\n");
    parse_delimited(path, &redelimit(&body, ';'), b';', &names)
}

/// Measurement name: file name parts from the third on (`raw_cxi_cxi_read_bw` -> `cxi_read_bw`).
pub fn measurement_name(path: &Path) -> String {
    stem_parts(path).into_iter().skip(2).collect::<Vec<_>>().join("_")
}

/// Bandwidth tests carry `_bw` in their file name; everything else is a latency test.
pub fn kind_of(path: &Path) -> MeasurementKind {
    if stem(path).contains("_bw") {
        MeasurementKind::Bandwidth
    } else {
        MeasurementKind::Latency
    }
}

/// Metric column drawn for a measurement of `kind`.
pub fn metric_column(kind: MeasurementKind) -> &'static str {
    match kind {
        MeasurementKind::Latency => MEAN_US,
        MeasurementKind::Bandwidth => BW_MBS,
    }
}

/// Loads every `.dat` log of directory `campaign` under `data_dir`.
pub fn load_measurements(data_dir: &Path, campaign: &str) -> Result<Measurements> {
    let dir = data_dir.join(campaign);
    let mut measurements = Measurements::default();
    for file in files_with_suffix(&dir, "dat")? {
        let table = parse(&file, &read_to_string(&file)?)?;
        let name = measurement_name(&file);
        let kind = kind_of(&file);
        measurements.insert(name.clone(), Measurement::new(name, file, kind, table));
    }
    Ok(measurements)
}
