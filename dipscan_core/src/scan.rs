use std::time::Duration;

use futures::{future::join_all, stream::FuturesUnordered, StreamExt};
use rand::{seq::SliceRandom, thread_rng};
use tracing::{debug, instrument, trace, warn};

use crate::{
    err::ResolutionError,
    report::{ProbeResult, ReportTable},
    target::{DomainName, ResolvedAddress, Resolve},
    tcp::full_open::{full_open_probe, ProbeTask},
    ConfigBuilder,
};

/// A scan that has finished resolving and is ready to probe.  Holding this
/// between the two phases lets the caller report what resolved, and what
/// didn't, before the probes start.
#[derive(Debug)]
pub struct ResolvedScan {
    /// Every `(domain, ip)` pair that will be probed
    pub resolved: Vec<ResolvedAddress>,
    /// Domains that produced no addresses and so will have no rows
    pub failures: Vec<ResolutionError>,
    ports: Vec<u16>,
    timeout: Duration,
}

/// Everything a scan produced.  The failures are kept around so the caller
/// can tell the user which domains were skipped.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Every `(domain, ip)` pair that was probed
    pub resolved: Vec<ResolvedAddress>,
    /// Domains that produced no addresses and so no rows
    pub failures: Vec<ResolutionError>,
    /// The ports probed, in column order
    pub ports: Vec<u16>,
    /// One result per probe, in completion order
    pub results: Vec<ProbeResult>,
}

impl ScanOutcome {
    /// Fold the results into a report with one column per probed port.
    pub fn report(&self) -> ReportTable {
        ReportTable::build(&self.results, &self.ports)
    }
}

/// The entry point to kick off a scan.  All domains are resolved at once and
/// the returned [`ResolvedScan`] probes every resolved address on every
/// configured port once [`ResolvedScan::probe`] is awaited.
#[instrument(level = "trace", skip(resolver))]
pub async fn start_scan(config: ConfigBuilder, resolver: &impl Resolve) -> ResolvedScan {
    let (resolved, failures) = resolve_all(&config.domains, resolver).await;
    trace!("We have {} resolved addresses", resolved.len());
    ResolvedScan {
        resolved,
        failures,
        ports: config.ports,
        timeout: config.timeout,
    }
}

impl ResolvedScan {
    /// Probe everything that resolved.  This only returns when every probe
    /// has finished, which is bounded by the configured timeout.
    #[instrument(level = "trace", skip(self))]
    pub async fn probe(self) -> ScanOutcome {
        let results = probe_all(&self.resolved, &self.ports, self.timeout).await;
        trace!("We finished probing");
        ScanOutcome {
            resolved: self.resolved,
            failures: self.failures,
            ports: self.ports,
            results,
        }
    }
}

/// Resolve every domain concurrently.  A domain that fails doesn't affect
/// the others, it just ends up in the list of failures.  Addresses come back
/// grouped by domain in input order.
#[instrument(level = "trace", skip(resolver))]
pub async fn resolve_all(
    domains: &[DomainName],
    resolver: &impl Resolve,
) -> (Vec<ResolvedAddress>, Vec<ResolutionError>) {
    let lookups = join_all(domains.iter().map(|domain| resolver.resolve(domain))).await;
    let mut resolved = vec![];
    let mut failures = vec![];
    for lookup in lookups {
        match lookup {
            Ok(addresses) => resolved.extend(addresses),
            Err(e) => {
                warn!("Skipping domain: {}", e);
                failures.push(e);
            }
        }
    }
    (resolved, failures)
}

/// Probe every port on every address concurrently.  There is no cap on the
/// number of connections in flight; each probe is bounded by `timeout`
/// instead.  Addresses shared by two domains are probed once per domain.
#[instrument(level = "trace", skip(addresses))]
pub async fn probe_all(
    addresses: &[ResolvedAddress],
    ports: &[u16],
    timeout: Duration,
) -> Vec<ProbeResult> {
    let mut tasks: Vec<ProbeTask> = addresses
        .iter()
        .flat_map(|address| {
            ports
                .iter()
                .map(move |port| ProbeTask::new(address, *port, timeout))
        })
        .collect();
    tasks.shuffle(&mut thread_rng());
    debug!("Starting {} probes", tasks.len());
    tasks
        .into_iter()
        .map(full_open_probe)
        .collect::<FuturesUnordered<_>>()
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        io,
        net::Ipv4Addr,
        time::{Duration, Instant},
    };

    use async_trait::async_trait;
    use tokio::net::TcpListener;

    use super::{probe_all, resolve_all, start_scan};
    use crate::{
        err::ResolutionError,
        report::PortStatus,
        target::{DomainName, ResolvedAddress, Resolve},
        ConfigBuilder,
    };

    /// Answers from a fixed table.  Anything not in the table fails the way
    /// an NXDOMAIN would.
    struct StaticResolver(HashMap<String, Vec<Ipv4Addr>>);

    impl StaticResolver {
        fn new(entries: Vec<(&str, Vec<Ipv4Addr>)>) -> Self {
            Self(
                entries
                    .into_iter()
                    .map(|(domain, ips)| (domain.to_owned(), ips))
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl Resolve for StaticResolver {
        async fn resolve(
            &self,
            domain: &DomainName,
        ) -> Result<Vec<ResolvedAddress>, ResolutionError> {
            match self.0.get(domain.as_str()) {
                Some(ips) => Ok(ips
                    .iter()
                    .map(|ip| ResolvedAddress::new(domain.clone(), *ip))
                    .collect()),
                None => Err(ResolutionError::LookupFailed {
                    domain: domain.clone(),
                    source: io::Error::new(io::ErrorKind::NotFound, "no such host"),
                }),
            }
        }
    }

    async fn open_and_closed_ports() -> (TcpListener, u16, u16) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let open = listener.local_addr().unwrap().port();
        let released = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let closed = released.local_addr().unwrap().port();
        drop(released);
        (listener, open, closed)
    }

    fn domains(names: &[&str]) -> Vec<DomainName> {
        names.iter().map(|name| name.parse().unwrap()).collect()
    }

    #[tokio::test]
    async fn failed_domains_are_skipped() {
        let resolver = StaticResolver::new(vec![
            ("good.test", vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)]),
            ("other.test", vec![Ipv4Addr::new(10, 0, 0, 3)]),
        ]);
        let (resolved, failures) = resolve_all(
            &domains(&["good.test", "broken.test", "other.test"]),
            &resolver,
        )
        .await;
        assert_eq!(resolved.len(), 3);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].domain().as_str(), "broken.test");
        assert_eq!(resolved[0].domain.as_str(), "good.test");
        assert_eq!(resolved[2].domain.as_str(), "other.test");
    }

    #[tokio::test]
    async fn every_task_yields_one_result() {
        let (_listener, open, closed) = open_and_closed_ports().await;
        let addresses = vec![
            ResolvedAddress::new("a.test".parse().unwrap(), Ipv4Addr::LOCALHOST),
            ResolvedAddress::new("b.test".parse().unwrap(), Ipv4Addr::LOCALHOST),
        ];
        let results = probe_all(&addresses, &[open, closed], Duration::from_secs(5)).await;
        assert_eq!(results.len(), 4);
        for result in &results {
            let expected = if result.port == open {
                PortStatus::Open
            } else {
                PortStatus::Closed
            };
            assert_eq!(result.status, expected);
        }
        let b_results = results
            .iter()
            .filter(|result| result.domain.as_str() == "b.test")
            .count();
        assert_eq!(b_results, 2);
    }

    #[tokio::test]
    async fn nothing_to_probe() {
        let results = probe_all(&[], &[80], Duration::from_secs(1)).await;
        assert!(results.is_empty());
        let address = ResolvedAddress::new("a.test".parse().unwrap(), Ipv4Addr::LOCALHOST);
        let results = probe_all(&[address], &[], Duration::from_secs(1)).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn scan_end_to_end() {
        let (_listener, open, closed) = open_and_closed_ports().await;
        let resolver = StaticResolver::new(vec![("local.test", vec![Ipv4Addr::LOCALHOST])]);
        let mut config = ConfigBuilder::default();
        config.set_domains(domains(&["local.test", "missing.test"]));
        config.set_port_list(vec![open, closed]);
        config.set_timeout(Duration::from_secs(5));

        let started = Instant::now();
        let scan = start_scan(config, &resolver).await;
        assert_eq!(scan.resolved.len(), 1);
        assert_eq!(scan.failures.len(), 1);
        assert_eq!(scan.failures[0].domain().as_str(), "missing.test");

        let outcome = scan.probe().await;
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(outcome.resolved.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.ports, vec![open, closed]);

        let table = outcome.report();
        assert_eq!(
            table.to_csv().unwrap(),
            format!(
                "\"DomainName\",\"IP\",\":{}\",\":{}\"\r\n\"local.test\",\"127.0.0.1\",\"OK\",\"-\"\r\n",
                open, closed
            )
        );
    }
}
