use bench_figures::{
    formats::{c2c, caches, cxi, iperf, netperf, osu},
    Error, MeasurementKind,
};
use std::path::Path;

mod common;
use common::{
    are_close, cache_sweep, cxi_bw_log, cxi_lat_log, iperf_report, osu_bw_log,
    populate_iperf, populate_osu, write_file, Scratch, NETPERF_CSV,
};

#[test]
fn test_osu_header_columns() {
    assert_eq!(
        osu::header_columns("Bandwidth (MB/s)"),
        vec!["Bandwidth (MB/s)"]
    );
    assert_eq!(
        osu::header_columns("Avg Latency(us)   Min Latency(us)  Max Latency(us)   Iterations"),
        vec![
            "Avg Latency(us)",
            "Min Latency(us)",
            "Max Latency(us)",
            "Iterations"
        ]
    );
}

#[test]
fn test_osu_parse() {
    let path = Path::new("node_01_osu_bw.dat");
    let table = osu::parse(path, &osu_bw_log()).unwrap();

    assert_eq!(table.index_name(), osu::SIZE);
    assert_eq!(table.columns(), ["Bandwidth (MB/s)"]);
    assert_eq!(table.len(), 23);
    assert_eq!(table.index()[0], 1.0);
    assert_eq!(table.index()[22], 4194304.0);
    assert_eq!(table.value(1024.0, "Bandwidth (MB/s)"), Some(3072.0));
    assert_eq!(table.value(4194304.0, "Bandwidth (MB/s)"), Some(11000.0));
}

#[test]
fn test_osu_parse_multi_column() {
    let text = "\
# OSU MPI Allgather Latency Test v7.2
# Size       Avg Latency(us)   Min Latency(us)
1                       2.51              2.10
2                       2.55              2.12

4                       2.60              2.20
";
    let table = osu::parse(Path::new("x_osu_allgather.dat"), text).unwrap();
    assert_eq!(table.columns(), ["Avg Latency(us)", "Min Latency(us)"]);
    assert_eq!(table.index(), [1.0, 2.0, 4.0]);
    assert_eq!(table.value(4.0, "Min Latency(us)"), Some(2.2));
}

#[test]
fn test_osu_parse_without_header_fails() {
    let result = osu::parse(Path::new("broken.dat"), "1 2.0\n2 3.0\n");
    assert!(matches!(result, Err(Error::Format { .. })), "{result:?}");
}

#[test]
fn test_osu_names() {
    assert_eq!(
        osu::measurement_name(Path::new("/tmp/node_01_osu_latency.dat")),
        "osu_latency"
    );
    assert_eq!(
        osu::mpi_type("measurements_osu_openmpi-native_infra_23-11-30T1154").as_deref(),
        Some("openmpi-native")
    );
    assert_eq!(osu::mpi_type("measurements_osu"), None);
}

#[test]
fn test_osu_load_measurements() {
    let scratch = Scratch::new();
    let campaign = "measurements_osu_openmpi_cn_23-11-22T1111";
    populate_osu(scratch.data(), campaign);
    write_file(&scratch.data().join(campaign), "notes.txt", "not a log");

    let measurements = osu::load_measurements(scratch.data(), campaign).unwrap();
    let names: Vec<&str> = measurements.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        ["osu_alltoall", "osu_bibw", "osu_bw", "osu_gather", "osu_latency"]
    );

    let bw = measurements.require("osu_bw").unwrap();
    assert_eq!(bw.kind, MeasurementKind::Bandwidth);
    assert_eq!(bw.mpi_type.as_deref(), Some("openmpi"));
    assert_eq!(bw.first_column().unwrap(), "Bandwidth (MB/s)");

    let latency = measurements.require("osu_latency").unwrap();
    assert_eq!(latency.kind, MeasurementKind::Latency);
    assert!(are_close(
        latency.value_at(4.0, "Avg Latency(us)").unwrap(),
        1.5,
        1.0
    ));

    let err = measurements.require("osu_mbw_mr").unwrap_err();
    assert!(matches!(err, Error::MissingMeasurement(ref n) if n == "osu_mbw_mr"));
}

#[test]
fn test_measurement_x_filter_and_missing_value() {
    let scratch = Scratch::new();
    let campaign = "measurements_osu_openmpi_cn_23-11-22T1111";
    populate_osu(scratch.data(), campaign);
    let mut measurements = osu::load_measurements(scratch.data(), campaign).unwrap();

    let latency = measurements.take("osu_latency").unwrap().x_filter(4.0, 1024.0);
    assert_eq!(latency.table.index().first(), Some(&4.0));
    assert_eq!(latency.table.index().last(), Some(&1024.0));
    assert_eq!(latency.table.len(), 9);

    let err = latency.value_at(2048.0, "Avg Latency(us)").unwrap_err();
    assert!(matches!(err, Error::MissingValue { index, .. } if index == 2048.0));
}

#[test]
fn test_cxi_parse_latency() {
    let table = cxi::parse(Path::new("raw_x_cxi_write_lat.dat"), &cxi_lat_log()).unwrap();

    assert_eq!(table.index_name(), "RDMA Size[B]");
    assert_eq!(
        table.columns(),
        ["Ops", "Min[us]", "Max[us]", cxi::MEAN_US, cxi::STDDEV_US]
    );
    assert_eq!(table.len(), 23);
    assert_eq!(table.value(1.0, "Ops"), Some(100.0));
    let mean = table.value(4194304.0, cxi::MEAN_US).unwrap();
    assert!(are_close(mean, 2.0 + 4194304.0 / 20_000.0, 0.1), "{mean}");
}

#[test]
fn test_cxi_parse_bandwidth() {
    let table = cxi::parse(Path::new("raw_x_cxi_read_bw.dat"), &cxi_bw_log()).unwrap();
    assert_eq!(table.columns(), ["Ops", cxi::BW_MBS, "MsgRate[Mpps]"]);
    assert_eq!(table.value(4194304.0, cxi::BW_MBS), Some(22000.0));
}

#[test]
fn test_cxi_parse_needs_three_rules() {
    let text = "-----\nRDMA Size[B]  Mean[us]\n1  2.0\n-----\n";
    let result = cxi::parse(Path::new("short.dat"), text);
    assert!(matches!(result, Err(Error::Format { .. })), "{result:?}");

    // Third rule right after the second: no header line.
    let result = cxi::parse(Path::new("x.dat"), "---\nbanner\n---\n---\n");
    assert!(
        matches!(result, Err(Error::Format { ref reason, .. }) if reason.contains("no header line")),
        "{result:?}"
    );
}

#[test]
fn test_cxi_names_and_kinds() {
    let lat = Path::new("raw_x_cxi_send_lat.dat");
    let bw = Path::new("raw_x_cxi_send_bw.dat");
    assert_eq!(cxi::measurement_name(lat), "cxi_send_lat");
    assert_eq!(cxi::kind_of(lat), MeasurementKind::Latency);
    assert_eq!(cxi::kind_of(bw), MeasurementKind::Bandwidth);
    assert_eq!(cxi::metric_column(MeasurementKind::Latency), cxi::MEAN_US);
    assert_eq!(cxi::metric_column(MeasurementKind::Bandwidth), cxi::BW_MBS);
}

#[test]
fn test_caches_parse_and_merge() {
    let default = caches::CacheRun::new(
        "asm_test_cn03",
        caches::parse(Path::new("asm_test_cn03.csv"), &cache_sweep(2.0)).unwrap(),
    );
    let mut huge_table =
        caches::parse(Path::new("asm_test_hugepages_cn03.csv"), &cache_sweep(1.5)).unwrap();
    huge_table = huge_table.filter_index(1.0, 1024.0);
    let hugepages = caches::CacheRun::new("asm_test_hugepages_cn03", huge_table);

    assert_eq!(default.table.index_name(), caches::REGION);
    assert_eq!(default.table.columns(), [caches::LATENCY_NS]);
    assert!(!default.has_hugepages());

    let merged = default
        .set_arch("Ampere Altra Max")
        .merge(&hugepages)
        .unwrap();
    assert!(merged.has_hugepages());
    assert_eq!(merged.name, "asm_test_cn03");
    assert_eq!(merged.arch, "Ampere Altra Max");
    assert_eq!(merged.table.value(16.0, caches::LATENCY_HUGEPAGES_NS), Some(17.5));
    assert_eq!(merged.table.value(8192.0, caches::LATENCY_NS), Some(54.0));
    // Left join: sizes the hugepages run lacks stay missing.
    assert_eq!(merged.table.value(8192.0, caches::LATENCY_HUGEPAGES_NS), None);
}

#[test]
fn test_caches_parse_without_region_fails() {
    let result = caches::parse(Path::new("bad.csv"), "Size,Latency (ns)\n1,2.0\n");
    assert!(matches!(result, Err(Error::Format { .. })), "{result:?}");
}

#[test]
fn test_c2c_parse_symmetrizes() {
    let text = ",,\n101.5,,\n120.0,98.25,\n";
    let matrix = c2c::parse(Path::new("node.csv"), text).unwrap();

    assert_eq!(matrix.size(), 3);
    assert_eq!(matrix.get(1, 0), Some(101.5));
    assert_eq!(matrix.get(0, 1), Some(101.5));
    assert_eq!(matrix.get(0, 2), Some(120.0));
    assert_eq!(matrix.get(2, 1), Some(98.25));
    assert_eq!(matrix.get(1, 2), Some(98.25));
    assert_eq!(matrix.get(1, 1), None);
}

#[test]
fn test_c2c_parse_rejects_text() {
    let result = c2c::parse(Path::new("node.csv"), ",\nabc,\n");
    assert!(matches!(result, Err(Error::Format { .. })), "{result:?}");
}

#[test]
fn test_netperf_parse() {
    let rows = netperf::parse(Path::new("netperf.csv"), NETPERF_CSV).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].server, "fe1");
    assert_eq!(rows[0].client, "fe2");
    assert_eq!(rows[0].mean_latency, 25.31);
    assert_eq!(rows[0].stddev_latency, 1.2);
}

#[test]
fn test_netperf_load_dir_needs_a_csv() {
    let scratch = Scratch::new();
    let dir = scratch.data().join("measurements_netperf_empty");
    write_file(&dir, "readme.txt", "nothing here");
    let result = netperf::load_dir(&dir);
    assert!(matches!(result, Err(Error::NoInputFile { .. })), "{result:?}");
}

#[test]
fn test_iperf_parse_skips_omitted_intervals() {
    let path = Path::new("iperf_run_01_fe1_fe2.json");
    let (server, client) = iperf::hosts_from_path(path).unwrap();
    assert_eq!((server.as_str(), client.as_str()), ("fe1", "fe2"));

    let records = iperf::parse(path, &iperf_report(&[9.0, 9.5]), &server, &client).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].start, 1.0);
    assert!(are_close(records[0].gbits_per_second(), 9.0, 0.001));
    assert!(are_close(records[1].gbits_per_second(), 9.5, 0.001));
    assert_eq!(records[0].rtt_mean, Some(42.0));
    assert_eq!(records[0].retransmits, Some(0));
}

#[test]
fn test_iperf_bad_inputs() {
    let short = iperf::hosts_from_path(Path::new("iperf_fe1.json"));
    assert!(matches!(short, Err(Error::Format { .. })), "{short:?}");

    let bad_json = iperf::parse(Path::new("x.json"), "{\"intervals\": [", "a", "b");
    assert!(matches!(bad_json, Err(Error::Json { .. })), "{bad_json:?}");
}

#[test]
fn test_iperf_load_dir() {
    let scratch = Scratch::new();
    populate_iperf(scratch.data());
    let records =
        iperf::load_dir(&scratch.data().join(bench_figures::figures::iperf::CAMPAIGN)).unwrap();
    // 6 ordered host pairs, 3 measured intervals each.
    assert_eq!(records.len(), 18);
}
