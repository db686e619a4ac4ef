//! This module contains everything we need to describe the targets of a scan
//! and to turn them into addresses we can actually connect to.
use std::{
    fmt::{Display, Formatter},
    net::{IpAddr, Ipv4Addr},
    str::FromStr,
};

use async_trait::async_trait;
use tokio::net::lookup_host;
use tracing::{instrument, trace};

use crate::err::{DipscanErr, ResolutionError};

/// A domain name as provided by the user.  We don't validate it beyond
/// trimming whitespace and refusing empty strings.  Sometimes we might want
/// to scan something that isn't exactly RFC compliant but still resolves.
#[derive(Clone, Eq, Debug, PartialEq, Hash, PartialOrd, Ord)]
pub struct DomainName(String);

impl DomainName {
    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DomainName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DomainName {
    type Err = DipscanErr;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            Err(DipscanErr::InvalidDomain)
        } else {
            Ok(DomainName(trimmed.to_owned()))
        }
    }
}

/// Split newline delimited text into domain names.  Blank lines, and lines
/// that are blank once trimmed, are dropped.  Order and duplicates are kept.
pub fn parse_domain_list(text: &str) -> Vec<DomainName> {
    text.split('\n')
        .filter_map(|line| line.parse().ok())
        .collect()
}

/// One IPv4 address a domain resolved to.  A domain with several A records
/// gives us one of these per record.
#[derive(Clone, Eq, Debug, PartialEq, Hash)]
pub struct ResolvedAddress {
    /// The original domain used in the lookup
    pub domain: DomainName,
    /// The address we will probe for this domain
    pub ip: Ipv4Addr,
}

impl ResolvedAddress {
    /// Pair a domain with one of its addresses.
    pub fn new(domain: DomainName, ip: Ipv4Addr) -> Self {
        Self { domain, ip }
    }
}

/// Turns a domain into the IPv4 addresses it points at.  A single attempt is
/// made per call, there is no caching and no retry.
#[async_trait]
pub trait Resolve: Send + Sync {
    /// Look up every IPv4 address for `domain`.  Implementations must not
    /// hand back any other family.
    async fn resolve(&self, domain: &DomainName) -> Result<Vec<ResolvedAddress>, ResolutionError>;
}

/// Resolves through the operating system's resolver.  The lookup itself
/// can't be restricted to one family, so every record comes back and IPv6
/// addresses are filtered out afterwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemResolver;

#[async_trait]
impl Resolve for SystemResolver {
    #[instrument(level = "trace", skip(self))]
    async fn resolve(&self, domain: &DomainName) -> Result<Vec<ResolvedAddress>, ResolutionError> {
        let socket_addrs = lookup_host((domain.as_str(), 0)).await.map_err(|source| {
            ResolutionError::LookupFailed {
                domain: domain.clone(),
                source,
            }
        })?;
        let mut addresses: Vec<ResolvedAddress> = Vec::new();
        for socket_addr in socket_addrs {
            // IPv6 would double the probes and isn't supported
            if let IpAddr::V4(ip) = socket_addr.ip() {
                if !addresses.iter().any(|address| address.ip == ip) {
                    addresses.push(ResolvedAddress::new(domain.clone(), ip));
                }
            } else {
                trace!("Skipping IPv6 record {} for {}", socket_addr.ip(), domain);
            }
        }
        if addresses.is_empty() {
            return Err(ResolutionError::NoAddresses {
                domain: domain.clone(),
            });
        }
        Ok(addresses)
    }
}
