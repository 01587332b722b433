//! Memory-hierarchy latency sweeps: `,`-separated CSV with a `Region` size (kB) column and a
//! `Latency (ns)` column, one file per node and page-size setting.

use crate::{
    scan::{files_with_suffix, read_to_string, stem},
    table::parse_headed,
    wrapper::Named,
    Result, Table,
};
use std::path::Path;

pub const REGION: &str = "Region";
pub const LATENCY_NS: &str = "Latency (ns)";
pub const LATENCY_HUGEPAGES_NS: &str = "Latency Hugepages (ns)";

/// One latency sweep, optionally merged with its hugepages counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheRun {
    pub name: String,
    pub arch: String,
    pub table: Table,
}

impl CacheRun {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            arch: String::new(),
            table,
        }
    }

    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn set_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Adds `hugepages`' latency column to `self` as [`LATENCY_HUGEPAGES_NS`].
    pub fn merge(mut self, hugepages: &CacheRun) -> Result<Self> {
        self.table
            .join_column(&hugepages.table, LATENCY_NS, LATENCY_HUGEPAGES_NS)?;
        Ok(self)
    }

    pub fn has_hugepages(&self) -> bool {
        self.table.has_column(LATENCY_HUGEPAGES_NS)
    }
}

pub fn parse(path: &Path, text: &str) -> Result<Table> {
    parse_headed(path, text, b',', REGION)
}

/// Loads every `.csv` sweep in `dir`, keyed by file stem.
pub fn load_runs(dir: &Path) -> Result<Named<CacheRun>> {
    let mut runs = Named::default();
    for file in files_with_suffix(dir, "csv")? {
        let name = stem(&file);
        let table = parse(&file, &read_to_string(&file)?)?;
        runs.insert(name.clone(), CacheRun::new(name, table));
    }
    Ok(runs)
}
