use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reconic_common::ScanError;
use reconic_common::models::job::ScanJob;
use reconic_common::models::target::Target;
use reconic_common::models::work::WorkItem;
use reconic_common::services::{PortServiceMap, UNKNOWN_SERVICE};
use reconic_core::engine::{Dispatcher, StopSignal};
use reconic_core::probe::tcp::TcpConnectProbe;
use reconic_core::scanner::{self, PortScanOptions};
use tokio::net::TcpListener;

fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn options() -> PortScanOptions {
    PortScanOptions {
        concurrency: 4,
        timeout: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn only_the_listening_port_is_reported() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let closed = closed_port();

    let services: PortServiceMap = [
        (open, "HTTP-ALT".to_string()),
        (closed, "SSH".to_string()),
    ]
    .into_iter()
    .collect();

    let target = Target::from_str("127.0.0.1").unwrap();
    let report = scanner::port_scan(&target, Arc::new(services), &options(), &Dispatcher::new())
        .await
        .expect("localhost always resolves");

    assert_eq!(report.open_ports(), vec![(open, "HTTP-ALT".to_string())]);
    assert_eq!(report.probed(), 2);
}

#[tokio::test]
async fn hostname_targets_are_resolved_first() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let services: PortServiceMap = [(open, "HTTP".to_string())].into_iter().collect();

    let target = Target::from_str("localhost").unwrap();
    let report = scanner::port_scan(&target, Arc::new(services), &options(), &Dispatcher::new())
        .await
        .unwrap();

    assert_eq!(report.open_ports(), vec![(open, "HTTP".to_string())]);
}

#[tokio::test]
async fn unmapped_open_port_is_unknown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();

    let target = Target::from_str("127.0.0.1").unwrap();
    let job = ScanJob::new(target, [WorkItem::Port(open)], 1, Duration::from_secs(1)).unwrap();
    let probe = TcpConnectProbe::new(
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        Arc::new(PortServiceMap::default()),
    );

    let report = Dispatcher::new().run(&job, Arc::new(probe)).await;
    assert_eq!(report.open_ports(), vec![(open, UNKNOWN_SERVICE.to_string())]);
}

#[tokio::test]
async fn unresolvable_host_is_fatal() {
    let services = Arc::new(PortServiceMap::embedded().unwrap());
    let target = Target::from_str("this-host-does-not-exist.invalid").unwrap();

    let result = scanner::port_scan(&target, services, &options(), &Dispatcher::new()).await;

    match result {
        Err(ScanError::Resolution { host, .. }) => {
            assert_eq!(host, "this-host-does-not-exist.invalid")
        }
        other => panic!("expected a resolution error, got {other:?}"),
    }
}

#[tokio::test]
async fn raised_stop_signal_probes_nothing() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let open = listener.local_addr().unwrap().port();
    let services: PortServiceMap = [(open, "HTTP".to_string())].into_iter().collect();

    let stop = StopSignal::new();
    stop.raise();
    let dispatcher = Dispatcher::new().with_stop_signal(stop);

    let target = Target::from_str("127.0.0.1").unwrap();
    let report = scanner::port_scan(&target, Arc::new(services), &options(), &dispatcher)
        .await
        .unwrap();

    assert!(report.is_empty());
    assert!(report.is_cancelled());
    assert_eq!(report.probed(), 0);
}
