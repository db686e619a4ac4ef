use std::time::Duration;

use crate::target::DomainName;

/// Ports probed on every resolved address when nothing else is configured.
/// The order here is also the column order of the report.
pub const DEFAULT_PORTS: [u16; 7] = [8091, 8092, 8093, 8094, 8095, 80, 8080];

/// How long a single connection attempt may take before the port is
/// considered closed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(15_000);

/// A [builder pattern](https://en.wikipedia.org/wiki/Builder_pattern) implementation to set all
/// parameters for a scan.
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    pub(crate) domains: Vec<DomainName>,
    pub(crate) ports: Vec<u16>,
    pub(crate) timeout: Duration,
    pub(crate) tracing: bool,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            domains: vec![],
            ports: DEFAULT_PORTS.to_vec(),
            timeout: DEFAULT_TIMEOUT,
            tracing: false,
        }
    }
}

impl ConfigBuilder {
    /// Replace the list of domains to scan.
    pub fn set_domains(&mut self, domains: Vec<DomainName>) {
        self.domains = domains;
    }

    /// This replaces the list of ports to probe on each address.  This doesn't
    /// add to the list; it replaces it.  The order given is the column order
    /// of the report.
    pub fn set_port_list(&mut self, ports: Vec<u16>) {
        self.ports = ports;
    }

    /// Set how long each connection attempt gets before it counts as closed.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Enable or disable extremely detailed internal logging.
    pub fn set_tracing(&mut self, tracing: bool) {
        self.tracing = tracing;
    }

    /// The domains that will be resolved.
    pub fn domains(&self) -> &[DomainName] {
        &self.domains
    }

    /// The ports that will be probed, in column order.
    pub fn ports(&self) -> &[u16] {
        &self.ports
    }

    /// The per probe timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// If detailed tracing was requested.
    pub fn tracing(&self) -> bool {
        self.tracing
    }
}
