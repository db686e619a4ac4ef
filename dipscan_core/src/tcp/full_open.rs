use std::{
    future::Future,
    io,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    time::Duration,
};

use tokio::{net::TcpStream, time::timeout};
use tracing::{instrument, trace};

use crate::{
    report::{PortStatus, ProbeResult},
    target::{DomainName, ResolvedAddress},
};

/// One unit of concurrent work.  One of these is built per resolved address
/// and port.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ProbeTask {
    /// The domain the address was resolved from
    pub domain: DomainName,
    /// The address to connect to
    pub ip: Ipv4Addr,
    /// The port to connect to
    pub port: u16,
    /// How long the connection attempt gets
    pub timeout: Duration,
}

impl ProbeTask {
    /// Build a task for one port on a resolved address.
    pub fn new(address: &ResolvedAddress, port: u16, timeout: Duration) -> Self {
        Self {
            domain: address.domain.clone(),
            ip: address.ip,
            port,
            timeout,
        }
    }
}

/// Attempt one TCP connection and classify it.  This never fails: a refused,
/// reset or unreachable connection is closed and so is one that doesn't
/// complete before the timeout.  On success the stream is dropped straight
/// away without exchanging any data.
#[instrument(level = "trace")]
pub async fn full_open_probe(task: ProbeTask) -> ProbeResult {
    let socket_addr = SocketAddr::new(IpAddr::V4(task.ip), task.port);
    let status = race_connect(socket_addr, TcpStream::connect(socket_addr), task.timeout).await;
    ProbeResult {
        domain: task.domain,
        ip: task.ip,
        port: task.port,
        status,
    }
}

/// Race `connect` against `limit`.  Whatever `connect` yields on success is
/// dropped before returning.
async fn race_connect<S>(
    socket_addr: SocketAddr,
    connect: impl Future<Output = io::Result<S>>,
    limit: Duration,
) -> PortStatus {
    match timeout(limit, connect).await {
        Ok(Ok(stream)) => {
            drop(stream);
            PortStatus::Open
        }
        Ok(Err(e)) => {
            trace!("Connection to {} failed: {}", socket_addr, e);
            PortStatus::Closed
        }
        Err(_) => {
            trace!("Connection to {} timed out after {:?}", socket_addr, limit);
            PortStatus::Closed
        }
    }
}
