use async_trait::async_trait;
use reconic_common::models::outcome::ProbeOutcome;
use reconic_common::models::work::WorkItem;
use reqwest::{Client, StatusCode};
use tracing::trace;

use super::Probe;

/// GETs `http://<subdomain>` and calls it live unless it answers 404.
///
/// Any other status counts, 5xx included, so a load balancer serving an error
/// page for an unknown host reads as live.
pub struct LivenessProbe {
    client: Client,
    scheme: &'static str,
}

impl LivenessProbe {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            scheme: "http",
        }
    }

    pub fn with_https(mut self) -> Self {
        self.scheme = "https";
        self
    }
}

#[async_trait]
impl Probe for LivenessProbe {
    async fn probe(&self, item: WorkItem) -> ProbeOutcome {
        let url: Option<String> = match &item {
            WorkItem::Subdomain(name) => Some(format!("{}://{name}", self.scheme)),
            _ => None,
        };
        let Some(url) = url else {
            return ProbeOutcome::miss(item);
        };

        match self.client.get(&url).send().await {
            Ok(response) if response.status() != StatusCode::NOT_FOUND => {
                ProbeOutcome::bare_hit(item)
            }
            Ok(_) => ProbeOutcome::miss(item),
            Err(e) => {
                trace!("{url}: {e}");
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
