use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reconic_common::models::target::Target;
use reconic_core::engine::Dispatcher;
use reconic_core::probe::dns::NameResolver;
use reconic_core::scanner::{self, SubdomainScanOptions};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options() -> SubdomainScanOptions {
    SubdomainScanOptions {
        concurrency: 8,
        timeout: Duration::from_secs(5),
        https: false,
    }
}

async fn server_answering(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn anything_but_404_is_live() {
    let ok = server_answering(200).await;
    let broken = server_answering(503).await;
    let missing = server_answering(404).await;

    let closed = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };

    let candidates: Vec<String> = vec![
        ok.address().to_string(),
        broken.address().to_string(),
        missing.address().to_string(),
        closed,
    ];

    let target = Target::from_str("example.com").unwrap();
    let report = scanner::subdomain_liveness_scan(&target, &candidates, &options(), &Dispatcher::new())
        .await
        .unwrap();

    let mut expected = vec![ok.address().to_string(), broken.address().to_string()];
    expected.sort();
    assert_eq!(report.live_subdomains(), expected, "5xx counts as live, 404 does not");
}

#[tokio::test]
async fn repeated_candidates_are_probed_and_reported_once() {
    let ok = server_answering(200).await;
    let name = ok.address().to_string();
    let candidates: Vec<String> = vec![name.clone(), name.clone(), format!(" {name} ")];

    let target = Target::from_str("example.com").unwrap();
    let report = scanner::subdomain_liveness_scan(&target, &candidates, &options(), &Dispatcher::new())
        .await
        .unwrap();

    assert_eq!(report.total(), 1);
    assert_eq!(report.live_subdomains(), vec![name]);
    assert_eq!(
        ok.received_requests().await.map(|requests| requests.len()),
        Some(1)
    );
}

struct ZoneResolver(HashMap<String, Vec<IpAddr>>);

#[async_trait]
impl NameResolver for ZoneResolver {
    async fn lookup(&self, name: &str) -> anyhow::Result<Vec<IpAddr>> {
        match self.0.get(name) {
            Some(addrs) => Ok(addrs.clone()),
            None => anyhow::bail!("NXDOMAIN for {name}"),
        }
    }
}

#[tokio::test]
async fn dictionary_scan_reports_resolving_names_with_addresses() {
    let www = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 80));
    let mail = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 25));
    let zone = ZoneResolver(HashMap::from([
        ("www.example.com".to_string(), vec![www]),
        ("mail.example.com".to_string(), vec![mail, mail]),
        ("empty.example.com".to_string(), vec![]),
    ]));

    let labels: Vec<String> = ["www", "mail", "empty", "ftp", "www"]
        .iter()
        .map(|label| label.to_string())
        .collect();

    let target = Target::from_str("example.com").unwrap();
    let report = scanner::subdomain_dns_scan(
        &target,
        &labels,
        Arc::new(zone),
        &options(),
        &Dispatcher::new(),
    )
    .await
    .unwrap();

    let resolved = report.resolved_subdomains();
    assert_eq!(resolved.len(), 2, "NXDOMAIN and empty answers are misses");
    assert_eq!(resolved.get("www.example.com"), Some(&vec![www]));
    assert_eq!(resolved.get("mail.example.com"), Some(&vec![mail]));
    assert_eq!(report.total(), 4);
}
