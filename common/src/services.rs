//! # Port → Service Map
//!
//! A flat JSON document mapping port numbers to service names, e.g.
//! `{"22": "SSH", "443": "HTTPS"}`. Its keys are the work set of a port scan and
//! its values label the open ports that scan finds.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, ScanError};

const EMBEDDED_PORTS: &str = include_str!("../data/ports.json");
pub const UNKNOWN_SERVICE: &str = "Unknown";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortServiceMap {
    services: BTreeMap<u16, String>,
}

impl PortServiceMap {
    /// The map shipped with the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_PORTS)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents: String = std::fs::read_to_string(path)
            .map_err(|e| ScanError::PortMap(format!("{}: {e}", path.display())))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> =
            serde_json::from_str(contents).map_err(|e| ScanError::PortMap(e.to_string()))?;

        let mut services: BTreeMap<u16, String> = BTreeMap::new();
        for (key, service) in raw {
            let port: u16 = match key.trim().parse::<u16>() {
                Ok(port) if port != 0 => port,
                _ => return Err(ScanError::PortMap(format!("'{key}' is not a valid port"))),
            };
            services.insert(port, service);
        }

        Ok(Self { services })
    }

    /// Service name for `port`, `"Unknown"` when the map has no entry.
    pub fn service(&self, port: u16) -> &str {
        self.services
            .get(&port)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_SERVICE)
    }

    /// Ports in ascending order.
    pub fn ports(&self) -> impl Iterator<Item = u16> + '_ {
        self.services.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl FromIterator<(u16, String)> for PortServiceMap {
    fn from_iter<T: IntoIterator<Item = (u16, String)>>(iter: T) -> Self {
        Self {
            services: iter.into_iter().filter(|(port, _)| *port != 0).collect(),
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
