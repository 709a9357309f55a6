use std::str::FromStr;
use std::time::Duration;

use reconic_common::models::target::Target;
use reconic_core::engine::Dispatcher;
use reconic_core::scanner::{self, DirectoryScanOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn options(concurrency: usize) -> DirectoryScanOptions {
    DirectoryScanOptions {
        concurrency,
        timeout: Duration::from_secs(5),
        canonical_timeout: Duration::from_secs(5),
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

async fn mount(server: &MockServer, at: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Only the two paths answering 200 are reported, whatever the window size.
#[tokio::test]
async fn found_directories_do_not_depend_on_concurrency() {
    let server = MockServer::start().await;
    mount(&server, "/admin", ResponseTemplate::new(200)).await;
    mount(&server, "/login", ResponseTemplate::new(200)).await;

    let target = Target::from_str(&server.uri()).unwrap();
    let wordlist = words(&["admin", "test", "login"]);
    let expected = vec![
        format!("{}/admin", server.uri()),
        format!("{}/login", server.uri()),
    ];

    for limit in [1, 2, 3, 64] {
        let scan = scanner::directory_scan(&target, &wordlist, &options(limit), &Dispatcher::new())
            .await
            .expect("directory scan should not fail");

        assert_eq!(scan.report.urls(), expected, "wrong hits with limit {limit}");
        assert_eq!(scan.report.probed(), 3, "every path must be probed once");
    }
}

#[tokio::test]
async fn redirects_count_only_inside_the_base() {
    let server = MockServer::start().await;
    let inside = format!("{}/new", server.uri());
    mount(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("Location", inside.as_str()),
    )
    .await;
    mount(
        &server,
        "/away",
        ResponseTemplate::new(301).insert_header("Location", "https://elsewhere.example/away"),
    )
    .await;
    mount(
        &server,
        "/relative",
        ResponseTemplate::new(302).insert_header("Location", "/new"),
    )
    .await;

    let target = Target::from_str(&server.uri()).unwrap();
    let scan = scanner::directory_scan(
        &target,
        &words(&["old", "away", "relative"]),
        &options(4),
        &Dispatcher::new(),
    )
    .await
    .unwrap();

    assert_eq!(
        scan.report.urls(),
        vec![format!("{}/old", server.uri())],
        "only the in-base redirect is a hit"
    );
}

#[tokio::test]
async fn paths_are_probed_under_the_redirected_base() {
    let server = MockServer::start().await;
    let app = format!("{}/app/", server.uri());
    mount(
        &server,
        "/",
        ResponseTemplate::new(302).insert_header("Location", app.as_str()),
    )
    .await;
    mount(&server, "/app/", ResponseTemplate::new(200)).await;
    mount(&server, "/app/admin", ResponseTemplate::new(200)).await;
    mount(&server, "/admin", ResponseTemplate::new(200)).await;

    let target = Target::from_str(&format!("{}/", server.uri())).unwrap();
    let scan = scanner::directory_scan(&target, &words(&["/admin"]), &options(2), &Dispatcher::new())
        .await
        .unwrap();

    assert_eq!(scan.base.as_str(), format!("{}/app", server.uri()));
    assert_eq!(scan.base.redirected_from(), Some(server.uri().as_str()));
    assert_eq!(scan.report.urls(), vec![format!("{}/app/admin", server.uri())]);
}

#[tokio::test]
async fn unreachable_base_yields_empty_report() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let target = Target::from_str(&format!("http://127.0.0.1:{port}")).unwrap();
    let scan = scanner::directory_scan(&target, &words(&["admin"]), &options(2), &Dispatcher::new())
        .await
        .expect("an unreachable base is not an error");

    assert_eq!(scan.base.as_str(), format!("http://127.0.0.1:{port}"));
    assert!(scan.report.is_empty());
}
