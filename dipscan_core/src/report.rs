//! This module contains everything we need to describe the results of a
//! scan and to serialize them as a table.

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    io,
    net::Ipv4Addr,
};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::trace;

use crate::{err::DipscanErr, target::DomainName};

const OPEN_CELL: &str = "OK";
const CLOSED_CELL: &str = "-";

/// The state of the port probed
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PortStatus {
    /// We fully established a connection to the port.
    Open,
    /// The connection was refused, errored or didn't finish before the
    /// timeout.  We don't tell those apart here.
    Closed,
}

impl Display for PortStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PortStatus::Open => f.write_str("open"),
            PortStatus::Closed => f.write_str("closed"),
        }
    }
}

/// The outcome of exactly one probe.  This is never an error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ProbeResult {
    /// The domain the address was resolved from
    pub domain: DomainName,
    /// The address probed
    pub ip: Ipv4Addr,
    /// The port probed
    pub port: u16,
    /// If it is open or closed
    pub status: PortStatus,
}

/// One `(domain, ip)` row of the report.  Ports with no recorded result are
/// simply absent from `ports`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportRow {
    /// The domain of this row
    pub domain: DomainName,
    /// The address of this row
    pub ip: Ipv4Addr,
    /// Everything we learned about the address
    pub ports: HashMap<u16, PortStatus>,
}

impl ReportRow {
    fn new(domain: DomainName, ip: Ipv4Addr) -> Self {
        Self {
            domain,
            ip,
            ports: HashMap::new(),
        }
    }

    /// The status recorded for `port`, if it was probed.
    pub fn status(&self, port: u16) -> Option<PortStatus> {
        self.ports.get(&port).copied()
    }
}

/// The whole scan as a table.  Rows are keyed by `(domain, ip)` and there is
/// one column per port.  Once built it is read only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReportTable {
    ports: Vec<u16>,
    rows: Vec<ReportRow>,
}

impl ReportTable {
    /// Fold probe results into a table.  The order of `results` doesn't
    /// matter for the content.  Rows are grouped by domain in the order
    /// domains first show up, then by IP in the order they first show up.
    /// Results for ports that aren't in `ports` are dropped.
    pub fn build(results: &[ProbeResult], ports: &[u16]) -> Self {
        let mut domain_order: Vec<&DomainName> = Vec::new();
        let mut index: HashMap<(&DomainName, Ipv4Addr), usize> = HashMap::new();
        let mut rows: Vec<ReportRow> = Vec::new();

        for result in results {
            if !ports.contains(&result.port) {
                trace!(
                    "Dropping result for {}:{}, port isn't a column",
                    result.ip,
                    result.port
                );
                continue;
            }
            if !domain_order.contains(&&result.domain) {
                domain_order.push(&result.domain);
            }
            let row = *index.entry((&result.domain, result.ip)).or_insert_with(|| {
                rows.push(ReportRow::new(result.domain.clone(), result.ip));
                rows.len() - 1
            });
            rows[row].ports.insert(result.port, result.status);
        }

        // Stable, so IPs keep their first seen order within a domain
        rows.sort_by_key(|row| {
            domain_order
                .iter()
                .position(|domain| **domain == row.domain)
                .unwrap_or(usize::MAX)
        });

        Self {
            ports: ports.to_vec(),
            rows,
        }
    }

    /// The header row: `DomainName`, `IP` and then `:<port>` per port.
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec!["DomainName".to_owned(), "IP".to_owned()];
        columns.extend(self.ports.iter().map(|port| format!(":{}", port)));
        columns
    }

    /// All rows in output order.
    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    /// The ports in column order.
    pub fn ports(&self) -> &[u16] {
        &self.ports
    }

    /// Render every cell of `row`.  Every port column gets a cell, `OK` when
    /// the port was open and `-` when it was closed or never probed.
    pub fn cells(&self, row: &ReportRow) -> Vec<String> {
        let mut cells = vec![row.domain.to_string(), row.ip.to_string()];
        cells.extend(self.ports.iter().map(|port| {
            match row.status(*port) {
                Some(PortStatus::Open) => OPEN_CELL,
                Some(PortStatus::Closed) | None => CLOSED_CELL,
            }
            .to_owned()
        }));
        cells
    }

    /// Write the table as CSV.  Every field is quoted and rows end in CRLF.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), DipscanErr> {
        let mut csv_writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::CRLF)
            .from_writer(writer);
        csv_writer.write_record(self.columns())?;
        for row in &self.rows {
            csv_writer.write_record(self.cells(row))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Serialize the table as CSV into a string.
    pub fn to_csv(&self) -> Result<String, DipscanErr> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
