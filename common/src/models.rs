//! # Scan Models
//!
//! The data a scan is made of: what is scanned ([`target`]), the units of work
//! ([`work`]), what one probe says about one unit ([`outcome`]) and the bound
//! configuration of one dispatch ([`job`]).

pub mod job;
pub mod outcome;
pub mod target;
pub mod work;
