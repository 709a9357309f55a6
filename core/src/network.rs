//! Everything that turns a raw target into something a probe can use, resolved
//! once before dispatch: addresses, canonical base URLs, HTTP clients and the
//! certificate transparency candidate list.

pub mod canonical;
pub mod crtsh;
pub mod http;
pub mod resolver;
