//! Static presentation site server.
//!
//! A handful of GET routes render fixed HTML templates; static assets are
//! served with cache-busted URLs derived from file modification times. The
//! signing secret is resolved at startup from an orchestrator-provided
//! secret file, an environment variable, or a development default, in that
//! order.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod render;
pub mod secret;
pub mod server;
pub mod urls;
