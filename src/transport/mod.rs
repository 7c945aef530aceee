//! The `transport` module is responsible for the two network-facing servers.
//!
//! `http` is the web front: it serves pages and static files and hands form
//! submissions to the relay. `udp` is the store server: it receives those
//! submissions as datagrams, persists them, and echoes them back.

pub mod http;
pub mod udp;


pub use http::{AppState, build_router, start_http_server};
pub use udp::StoreServer;
