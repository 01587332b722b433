//! Sample benchmark outputs and scratch data directories shared by the integration tests.

#![allow(dead_code)]

use bench_figures::{figures, FigureCfg, FigurePaths};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

pub fn are_close(left: f64, right: f64, pct: f64) -> bool {
    let avg_abs = (left.abs() + right.abs()) / 2.0;
    (left - right).abs() <= avg_abs * pct / 100.0
}

/// Writes `content` to `dir/name`, creating `dir` if needed.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Scratch data and figures directories under one temporary root.
pub struct Scratch {
    pub root: TempDir,
    pub paths: FigurePaths,
}

impl Scratch {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let paths = FigurePaths::new(root.path().join("data"), root.path().join("figures"));
        Self { root, paths }
    }

    pub fn data(&self) -> &Path {
        &self.paths.data_dir
    }
}

pub fn svg_cfg() -> FigureCfg {
    FigureCfg::default()
        .with_dpi(40.0)
        .with_format(bench_figures::plot::OutputFormat::Svg)
}

/// Message sizes 1, 2, 4, ..., 4 MiB.
pub fn message_sizes() -> Vec<u64> {
    (0..=22).map(|k| 1u64 << k).collect()
}

//=================
// OSU

pub fn osu_log(title: &str, column: &str, value: impl Fn(f64) -> f64) -> String {
    let mut out = format!("# OSU MPI {title} Test v7.2\n# Datatype: MPI_CHAR.\n");
    out.push_str(&format!("# Size      {column}\n"));
    for size in message_sizes() {
        out.push_str(&format!("{size:<20}{:>12.2}\n", value(size as f64)));
    }
    out
}

pub fn osu_bw_log() -> String {
    osu_log("Bandwidth", "Bandwidth (MB/s)", |s| (s * 3.0).min(11_000.0))
}

pub fn osu_latency_log() -> String {
    osu_log("Latency", "Avg Latency(us)", |s| 1.5 + s / 10_000.0)
}

/// Writes the five logs one OSU campaign directory holds.
pub fn populate_osu(data: &Path, campaign: &str) {
    let dir = data.join(campaign);
    write_file(&dir, "node_01_osu_bw.dat", &osu_bw_log());
    write_file(
        &dir,
        "node_01_osu_bibw.dat",
        &osu_log("Bi-Directional Bandwidth", "Bandwidth (MB/s)", |s| {
            (s * 5.0).min(20_000.0)
        }),
    );
    write_file(&dir, "node_01_osu_latency.dat", &osu_latency_log());
    write_file(
        &dir,
        "node_01_osu_gather.dat",
        &osu_log("Gather Latency", "Avg Latency(us)", |s| 3.0 + s / 5_000.0),
    );
    write_file(
        &dir,
        "node_01_osu_alltoall.dat",
        &osu_log("All-to-All Personalized Exchange Latency", "Avg Latency(us)", |s| {
            4.0 + s / 2_000.0
        }),
    );
}

//=================
// CXI

const CXI_RULE: &str = "---------------------------------------------------";

pub fn cxi_lat_log() -> String {
    let mut out = format!(
        "{CXI_RULE}\n    CXI RDMA Write Latency Test\nDevice           : cxi0\nIterations       : 100\n{CXI_RULE}\n"
    );
    out.push_str("RDMA Size[B]      Ops   Min[us]   Max[us]   Mean[us]   StdDev[us]\n");
    for size in message_sizes() {
        let mean = 2.0 + size as f64 / 20_000.0;
        out.push_str(&format!(
            "{size:>12}      100   {:.2}   {:.2}   {mean:.2}   {:.2}\n",
            mean * 0.9,
            mean * 1.2,
            mean * 0.05
        ));
    }
    out.push_str(CXI_RULE);
    out.push('\n');
    out
}

pub fn cxi_bw_log() -> String {
    let mut out = format!(
        "{CXI_RULE}\n    CXI RDMA Write Bandwidth Test\nDevice           : cxi0\n{CXI_RULE}\n"
    );
    out.push_str("RDMA Size[B]      Ops   BW[MB/s]   MsgRate[Mpps]\n");
    for size in message_sizes() {
        let bw = (size as f64 * 4.0).min(22_000.0);
        out.push_str(&format!("{size:>12}     1000   {bw:.2}   {:.3}\n", bw / size as f64));
    }
    out.push_str(CXI_RULE);
    out.push('\n');
    out
}

pub fn populate_cxi(data: &Path) {
    let dir = data.join(figures::cxi::CAMPAIGN);
    for op in ["write", "read", "send"] {
        write_file(&dir, &format!("raw_x_cxi_{op}_lat.dat"), &cxi_lat_log());
        write_file(&dir, &format!("raw_x_cxi_{op}_bw.dat"), &cxi_bw_log());
    }
}

//=================
// Caches

pub fn cache_sweep(base: f64) -> String {
    let mut out = String::from("Region,Latency (ns)\n");
    for k in 0..=16 {
        let region = 1u64 << k;
        out.push_str(&format!("{region},{:.2}\n", base + k as f64 * 4.0));
    }
    out
}

pub fn populate_caches(data: &Path) {
    let dir = data.join(figures::caches::DATA_SUBDIR);
    for node in ["cn03", "infra2"] {
        write_file(&dir, &format!("asm_test_{node}.csv"), &cache_sweep(2.0));
        write_file(&dir, &format!("asm_test_hugepages_{node}.csv"), &cache_sweep(1.5));
    }
}

//=================
// Core-to-core

/// Lower-triangle matrix of `n` cores, upper triangle left empty.
pub fn c2c_lower_triangle(n: usize, value: impl Fn(usize, usize) -> f64) -> String {
    let mut out = String::new();
    for i in 0..n {
        let row: Vec<String> = (0..n)
            .map(|j| {
                if j < i {
                    format!("{:.1}", value(i, j))
                } else {
                    String::new()
                }
            })
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

pub fn populate_c2c(data: &Path) {
    let dir = data.join(figures::c2c::DATA_SUBDIR);
    write_file(
        &dir,
        "cn03c1_run1.csv",
        &c2c_lower_triangle(16, |i, j| 100.0 + (i + j) as f64),
    );
    write_file(
        &dir,
        "cn03c1_run2.csv",
        &c2c_lower_triangle(16, |i, j| 110.0 + (i + j) as f64),
    );
    write_file(
        &dir,
        "infra2c1.csv",
        &c2c_lower_triangle(24, |i, j| 50.0 + (i as f64 - j as f64).abs()),
    );
}

//=================
// iperf3 and netperf

/// iperf3 JSON report with one omitted warm-up interval followed by `gbits.len()` intervals.
pub fn iperf_report(gbits: &[f64]) -> String {
    let interval = |i: usize, gb: f64, omitted: bool| {
        format!(
            r#"{{"streams": [{{"socket": 5, "rtt": 41, "omitted": {omitted}}}, {{"socket": 7, "rtt": 43, "omitted": {omitted}}}],
               "sum": {{"start": {i}, "end": {}, "seconds": 1.0, "bytes": {}, "bits_per_second": {},
                        "retransmits": 0, "omitted": {omitted}, "sender": true}}}}"#,
            i + 1,
            gb * 1e9 / 8.0,
            gb * 1e9
        )
    };
    let mut intervals = vec![interval(0, 0.5, true)];
    intervals.extend(
        gbits
            .iter()
            .enumerate()
            .map(|(i, &gb)| interval(i + 1, gb, false)),
    );
    format!(
        r#"{{"start": {{"version": "iperf 3.9"}}, "intervals": [{}], "end": {{}}}}"#,
        intervals.join(",\n")
    )
}

pub const IPERF_HOSTS: [&str; 3] = ["fe1", "fe2", "fe3"];

pub fn populate_iperf(data: &Path) {
    let dir = data.join(figures::iperf::CAMPAIGN);
    for (i, server) in IPERF_HOSTS.iter().enumerate() {
        for (j, client) in IPERF_HOSTS.iter().enumerate() {
            if i != j {
                let base = 9.0 + i as f64 + j as f64 / 10.0;
                write_file(
                    &dir,
                    &format!("iperf_run_01_{server}_{client}.json"),
                    &iperf_report(&[base, base + 0.2, base - 0.2]),
                );
            }
        }
    }
}

pub const NETPERF_CSV: &str = "\
from;to;mean_latency;stddev_latency;p99_latency
fe1;fe2;25.31;1.20;30.1
fe1;fe3;26.02;0.87;29.5
fe2;fe1;24.90;1.01;28.8
fe2;fe3;27.45;2.33;33.0
fe3;fe1;25.77;0.66;27.9
fe3;fe2;26.10;1.05;30.4
";

pub fn populate_netperf(data: &Path) {
    write_file(
        &data.join(figures::netperf::CAMPAIGN),
        "netperf_23-11-03T1606.csv",
        NETPERF_CSV,
    );
}
