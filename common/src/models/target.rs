//! # Scan Target Model
//!
//! Defines the possible inputs for a scan.
//!
//! A target is either:
//! * A bare hostname or IP address (port scans, subdomain scans).
//! * A base URL with an `http`/`https` scheme (directory scans).

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use serde::Serialize;
use url::Url;

use crate::error::ScanError;

/// Represents what a scan is pointed at. Immutable once parsed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Target {
    /// A hostname or IP literal, e.g. `example.com` or `10.0.0.5`.
    Host { name: String },
    /// A base URL, kept exactly as supplied, e.g. `https://example.com/app`.
    Url { base: String },
}

impl Target {
    /// Builds a URL target for `host` using `https://` or `http://`.
    pub fn with_scheme(host: &str, https: bool) -> Result<Self, ScanError> {
        let scheme: &str = if https { "https" } else { "http" };
        parse_url(&format!("{scheme}://{}", url_host(host.trim())))
    }

    /// The hostname part of the target.
    pub fn host(&self) -> &str {
        match self {
            Target::Host { name } => name,
            Target::Url { base } => host_of(base).unwrap_or(base),
        }
    }

    /// The URL this target points at. Hosts are assumed to speak plain HTTP.
    pub fn url(&self) -> String {
        match self {
            Target::Host { name } => format!("http://{}", url_host(name)),
            Target::Url { base } => base.clone(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Host { name } => write!(f, "{name}"),
            Target::Url { base } => write!(f, "{base}"),
        }
    }
}

impl FromStr for Target {
    type Err = ScanError;

    /// Parses a string into a `Target`.
    ///
    /// Supported formats:
    /// * **URL**: anything containing `://`; the scheme must be http or https.
    /// * **Host**: a hostname or IP literal without scheme, path or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s: &str = s.trim();

        if s.contains("://") {
            return parse_url(s);
        }

        parse_host(s)
    }
}

fn parse_url(s: &str) -> Result<Target, ScanError> {
    let url: Url = Url::parse(s).map_err(|e| invalid(s, &e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(s, "scheme must be http or https"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid(s, "missing host"));
    }

    Ok(Target::Url {
        base: s.to_string(),
    })
}

fn parse_host(s: &str) -> Result<Target, ScanError> {
    if s.is_empty() {
        return Err(invalid(s, "empty host"));
    }
    if s.contains(['/', ' ', '\t']) {
        return Err(invalid(s, "a host cannot contain '/' or whitespace"));
    }

    Ok(Target::Host {
        name: s.to_string(),
    })
}

/// IPv6 literals need brackets inside a URL.
fn url_host(host: &str) -> String {
    match host.parse::<Ipv6Addr>() {
        Ok(_) => format!("[{host}]"),
        Err(_) => host.to_string(),
    }
}

fn host_of(base: &str) -> Option<&str> {
    let rest: &str = base.split_once("://")?.1;
    let authority: &str = rest.split(['/', '?', '#']).next()?;
    let authority: &str = authority.rsplit_once('@').map_or(authority, |(_, a)| a);

    if let Some(stripped) = authority.strip_prefix('[') {
        return stripped.split_once(']').map(|(ip, _)| ip);
    }
    authority.split(':').next()
}

fn invalid(target: &str, reason: &str) -> ScanError {
    ScanError::InvalidTarget {
        target: target.to_string(),
        reason: reason.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_full_parsing() {
        // Hosts
        assert!(matches!(
            Target::from_str("example.com"),
            Ok(Target::Host { .. })
        ));
        assert!(matches!(Target::from_str("10.0.0.5"), Ok(Target::Host { .. })));
        assert!(matches!(Target::from_str("::1"), Ok(Target::Host { .. })));

        // URLs
        assert!(matches!(
            Target::from_str("https://example.com"),
            Ok(Target::Url { .. })
        ));
        assert!(matches!(
            Target::from_str("http://127.0.0.1:8080/app/"),
            Ok(Target::Url { .. })
        ));

        // Invalid
        assert!(Target::from_str("").is_err());
        assert!(Target::from_str("example.com/admin").is_err());
        assert!(Target::from_str("ftp://example.com").is_err());
        assert!(Target::from_str("http://").is_err());
    }

    #[test]
    fn url_target_is_kept_verbatim() {
        let target = Target::from_str("  https://Example.com/app/ ").unwrap();
        assert_eq!(
            target,
            Target::Url {
                base: "https://Example.com/app/".to_string()
            }
        );
    }

    #[test]
    fn host_is_extracted_from_url() {
        let cases = [
            ("http://example.com", "example.com"),
            ("https://example.com:8443/path", "example.com"),
            ("http://user:pw@example.com/", "example.com"),
            ("http://[::1]:8080/", "::1"),
        ];

        for (input, expected) in cases {
            let target = Target::from_str(input).unwrap();
            assert_eq!(target.host(), expected, "host of {input}");
        }
    }

    #[test]
    fn with_scheme_builds_url_targets() {
        let https = Target::with_scheme("example.com", true).unwrap();
        let http = Target::with_scheme("example.com", false).unwrap();

        assert_eq!(https.url(), "https://example.com");
        assert_eq!(http.url(), "http://example.com");
        assert_eq!(https.host(), "example.com");
    }

    #[test]
    fn ipv6_hosts_are_bracketed_in_urls() {
        let host = Target::from_str("::1").unwrap();
        assert_eq!(host.url(), "http://[::1]");
        assert!(Target::from_str(&host.url()).is_ok());

        let url = Target::with_scheme("fe80::1", true).unwrap();
        assert_eq!(url.url(), "https://[fe80::1]");
        assert_eq!(url.host(), "fe80::1");

        let v4 = Target::with_scheme("10.0.0.5", false).unwrap();
        assert_eq!(v4.url(), "http://10.0.0.5");
    }

    #[test]
    fn host_target_defaults_to_http_url() {
        let target = Target::from_str("example.com").unwrap();
        assert_eq!(target.url(), "http://example.com");
    }
}
