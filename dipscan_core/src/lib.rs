#![warn(missing_docs)]
//! This is the core of dipscan.  It resolves a list of domain names, runs a
//! full open TCP probe against every resolved IPv4 address on a fixed list of
//! ports and folds the outcomes into a report table.  Reading the domain list
//! and writing the report to disk are left to the caller.

pub use crate::{
    config::{ConfigBuilder, DEFAULT_PORTS, DEFAULT_TIMEOUT},
    err::{DipscanErr, ResolutionError},
    logging::setup_tracing,
    report::{PortStatus, ProbeResult, ReportRow, ReportTable},
    scan::{probe_all, resolve_all, start_scan, ResolvedScan, ScanOutcome},
    target::{parse_domain_list, DomainName, ResolvedAddress, Resolve, SystemResolver},
    tcp::full_open::{full_open_probe, ProbeTask},
};

mod config;
mod err;
mod logging;
mod report;
mod scan;
mod target;
mod tcp;
