use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reconic_common::models::outcome::{Classification, ProbeOutcome};
use reconic_common::models::work::WorkItem;
use reconic_common::services::PortServiceMap;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use super::Probe;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Full TCP handshake against one port of an already resolved address.
pub struct TcpConnectProbe {
    addr: IpAddr,
    services: Arc<PortServiceMap>,
    connect_timeout: Duration,
}

impl TcpConnectProbe {
    pub fn new(addr: IpAddr, services: Arc<PortServiceMap>) -> Self {
        Self {
            addr,
            services,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

#[async_trait]
impl Probe for TcpConnectProbe {
    async fn probe(&self, item: WorkItem) -> ProbeOutcome {
        let port: u16 = match item {
            WorkItem::Port(port) => port,
            other => return ProbeOutcome::miss(other),
        };
        let socket_addr: SocketAddr = SocketAddr::new(self.addr, port);

        match timeout(self.connect_timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_stream)) => {
                let service: String = self.services.service(port).to_string();
                ProbeOutcome::hit(item, Classification::Service(service))
            }
            Ok(Err(e)) => {
                trace!("{socket_addr} closed: {e}");
                ProbeOutcome::miss(item)
            }
            Err(_elapsed) => {
                trace!("{socket_addr} filtered");
                ProbeOutcome::miss(item)
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
