use std::net::IpAddr;
use std::time::Duration;

use colored::*;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn addresses_to_detail(addrs: &[IpAddr]) -> Vec<Detail> {
    addrs
        .iter()
        .map(|addr| match addr {
            IpAddr::V4(v4) => ("IPv4".to_string(), v4.to_string().color(colors::IPV4_ADDR)),
            IpAddr::V6(v6) => ("IPv6".to_string(), v6.to_string().color(colors::IPV6_ADDR)),
        })
        .collect()
}

pub fn port_key(port: u16) -> String {
    format!("{port}/tcp")
}

pub fn elapsed(duration: Duration) -> ColoredString {
    format!("{:.2}s", duration.as_secs_f64()).bold().yellow()
}

/// `"1 open port"`, `"3 open ports"`.
pub fn count(n: usize, singular: &str, plural: &str) -> String {
    let noun: &str = if n == 1 { singular } else { plural };
    format!("{n} {noun}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
