//! `;`-separated netperf latency summaries, one row per `from`/`to` host pair.

use crate::{
    crosstab::{Agg, CrossTab},
    scan::{first_file_with_suffix, read_to_string},
    Error, Result,
};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

/// One host pair's latency summary in microseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetperfRow {
    #[serde(rename = "from")]
    pub server: String,
    #[serde(rename = "to")]
    pub client: String,
    pub mean_latency: f64,
    pub stddev_latency: f64,
}

pub fn parse(path: &Path, text: &str) -> Result<Vec<NetperfRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<NetperfRow>, _>>()
        .map_err(|source| Error::Csv {
            path: path.to_owned(),
            source,
        })?;
    log::debug!("{}: {} host pairs", path.display(), rows.len());
    Ok(rows)
}

/// Loads the first `.csv` file in `dir`.
pub fn load_dir(dir: &Path) -> Result<Vec<NetperfRow>> {
    let file = first_file_with_suffix(dir, "csv")?;
    let text = read_to_string(&file)?;
    parse(&file, &text)
}

/// Server x client cross-tabulations of latency: (mean, standard deviation).
pub fn latency_crosstabs(rows: &[NetperfRow]) -> (CrossTab, CrossTab) {
    let mean = rows
        .iter()
        .map(|r| (r.server.as_str(), r.client.as_str(), r.mean_latency));
    let stddev = rows
        .iter()
        .map(|r| (r.server.as_str(), r.client.as_str(), r.stddev_latency));
    (
        CrossTab::build(mean, Agg::First),
        CrossTab::build(stddev, Agg::First),
    )
}
