//! # formrelay
//!
//! `formrelay` is a small two-server guestbook built with Rust. A web front
//! serves static pages and accepts form posts; each post is relayed as a UDP
//! datagram to a store server, which saves it as a document and echoes the
//! datagram back as an acknowledgment.
//!
//! ## Core Modules
//!
//! The library is structured into several modules, each with a distinct responsibility:
//!
//! - `client`: The relay that sends a submission over UDP and awaits the echo.
//! - `config`: Handles loading and managing server configuration.
//! - `persistence`: Parses url-encoded forms and stores them in a document store (`sled` or in-memory).
//! - `transport`: The HTTP web front and the UDP store server.
//! - `utils`: Error types and logging setup.

pub mod client;
pub mod config;
pub mod persistence;
pub mod transport;
pub mod utils;
