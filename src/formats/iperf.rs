//! iperf3 JSON reports (`iperf3 --json`), one file per server/client pair.

use crate::{
    crosstab::{Agg, CrossTab},
    scan::{files_with_suffix, read_to_string, stem_parts},
    stats::mean,
    Error, Result,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct Report {
    intervals: Vec<Interval>,
}

#[derive(Debug, Deserialize)]
struct Interval {
    #[serde(default)]
    streams: Vec<Stream>,
    sum: IntervalSum,
}

#[derive(Debug, Deserialize)]
struct Stream {
    rtt: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IntervalSum {
    start: f64,
    end: f64,
    bytes: f64,
    bits_per_second: f64,
    retransmits: Option<u64>,
    omitted: bool,
}

/// One non-omitted reporting interval of an iperf3 run.
#[derive(Debug, Clone, PartialEq)]
pub struct IperfRecord {
    pub server: String,
    pub client: String,
    pub start: f64,
    pub end: f64,
    pub bytes: f64,
    pub bits_per_second: f64,
    pub retransmits: Option<u64>,
    /// Mean RTT over the interval's streams in microseconds; `None` if any stream lacks one.
    pub rtt_mean: Option<f64>,
}

impl IperfRecord {
    pub fn gbits_per_second(&self) -> f64 {
        self.bits_per_second / 1e9
    }
}

/// Server and client host names from a report file name (`_`-separated parts 3 and 4).
pub fn hosts_from_path(path: &Path) -> Result<(String, String)> {
    let mut parts = stem_parts(path).into_iter().skip(3);
    match (parts.next(), parts.next()) {
        (Some(server), Some(client)) => Ok((server, client)),
        _ => Err(Error::format(
            path,
            "file name needs at least 5 `_`-separated parts (<..>_<..>_<..>_<server>_<client>)",
        )),
    }
}

/// Parses one report, dropping omitted (warm-up) intervals.
pub fn parse(path: &Path, text: &str, server: &str, client: &str) -> Result<Vec<IperfRecord>> {
    let report: Report = serde_json::from_str(text).map_err(|source| Error::Json {
        path: path.to_owned(),
        source,
    })?;

    let records = report
        .intervals
        .into_iter()
        .filter(|i| !i.sum.omitted)
        .map(|i| {
            let rtts: Option<Vec<f64>> = i.streams.iter().map(|s| s.rtt).collect();
            IperfRecord {
                server: server.to_owned(),
                client: client.to_owned(),
                start: i.sum.start,
                end: i.sum.end,
                bytes: i.sum.bytes,
                bits_per_second: i.sum.bits_per_second,
                retransmits: i.sum.retransmits,
                rtt_mean: rtts.and_then(|r| mean(&r)),
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "{}: {} intervals {server} -> {client}",
        path.display(),
        records.len()
    );
    Ok(records)
}

/// Loads every `.json` report in `dir`.
pub fn load_dir(dir: &Path) -> Result<Vec<IperfRecord>> {
    let mut records = Vec::new();
    for file in files_with_suffix(dir, "json")? {
        let (server, client) = hosts_from_path(&file)?;
        let text = read_to_string(&file)?;
        records.extend(parse(&file, &text, &server, &client)?);
    }
    Ok(records)
}

/// Server x client cross-tabulations of throughput in Gbit/s: (mean, standard deviation).
pub fn throughput_crosstabs(records: &[IperfRecord]) -> (CrossTab, CrossTab) {
    let rows = || {
        records
            .iter()
            .map(|r| (r.server.as_str(), r.client.as_str(), r.gbits_per_second()))
    };
    (
        CrossTab::build(rows(), Agg::Mean),
        CrossTab::build(rows(), Agg::Std),
    )
}
