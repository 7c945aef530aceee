//! The `client` module holds the sending side of the datagram channel.
//!
//! The web front uses a [`Relay`] to hand each form submission to the store
//! server and wait for its acknowledgment.

pub mod relay;
pub use relay::Relay;
