use std::net::IpAddr;

use serde::Serialize;

use super::work::WorkItem;

/// What a successful probe learned about its work item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Service name of an open port (`"Unknown"` when unmapped).
    Service(String),
    /// Full URL of a discovered directory.
    Url(String),
    /// Addresses a subdomain resolved to.
    Addresses(Vec<IpAddr>),
}

/// The result of probing one [`WorkItem`].
///
/// Created by exactly one probe invocation and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbeOutcome {
    item: WorkItem,
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<Classification>,
}

impl ProbeOutcome {
    /// A hit carrying a classification payload.
    pub fn hit(item: WorkItem, payload: Classification) -> Self {
        Self {
            item,
            success: true,
            payload: Some(payload),
        }
    }

    /// A hit with nothing to add beyond the item itself.
    pub fn bare_hit(item: WorkItem) -> Self {
        Self {
            item,
            success: true,
            payload: None,
        }
    }

    /// Closed, filtered, not found, timed out or otherwise not worth reporting.
    pub fn miss(item: WorkItem) -> Self {
        Self {
            item,
            success: false,
            payload: None,
        }
    }

    pub fn item(&self) -> &WorkItem {
        &self.item
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn payload(&self) -> Option<&Classification> {
        self.payload.as_ref()
    }
}
