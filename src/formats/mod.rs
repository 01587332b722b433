//! Loaders for the raw outputs of each benchmark tool.
//!
//! Every loader scans one directory for files with the tool's suffix, strips the tool's banner
//! text and hands the remaining columns to the shared [`crate::Table`] parsers.

pub mod c2c;
pub mod caches;
pub mod cxi;
pub mod iperf;
pub mod netperf;
pub mod osu;
