#![cfg(test)]

mod directory;
mod dispatch;
mod ports;
mod subdomain;
