//! Module to place any error handling related code
use std::io;

use thiserror::Error;

use crate::target::DomainName;

/// A domain we couldn't turn into any IPv4 address.  These are isolated to
/// the domain that failed.  The scan carries on with the rest and the domain
/// simply produces no rows in the report.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The lookup itself failed.  NXDOMAIN, a network error or the system
    /// resolver timing out all end up here.
    #[error("failed to resolve {domain}: {source}")]
    LookupFailed {
        /// The domain that was looked up
        domain: DomainName,
        /// What the system resolver told us
        #[source]
        source: io::Error,
    },
    /// The lookup succeeded but only returned IPv6 records, or nothing at all.
    #[error("{domain} has no IPv4 addresses")]
    NoAddresses {
        /// The domain that was looked up
        domain: DomainName,
    },
}

impl ResolutionError {
    /// The domain this failure belongs to.
    pub fn domain(&self) -> &DomainName {
        match self {
            ResolutionError::LookupFailed { domain, .. } => domain,
            ResolutionError::NoAddresses { domain } => domain,
        }
    }
}

/// Errors that don't belong to a single domain.  Probe failures are never
/// errors; a port that can't be reached is just closed.
#[derive(Debug, Error)]
pub enum DipscanErr {
    /// A domain name was empty once whitespace was trimmed away
    #[error("domain names can't be empty")]
    InvalidDomain,
    /// The report couldn't be written out as CSV
    #[error("failed to serialize the report: {0}")]
    FailedToSerializeReport(#[from] csv::Error),
    /// The serialized report couldn't be flushed to its destination
    #[error("failed to write the report: {0}")]
    FailedToWriteReport(#[from] io::Error),
}
