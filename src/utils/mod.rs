//! The `utils` module provides shared pieces used across the `formrelay`
//! application: the error types every component returns and the logging
//! setup the binary installs at startup.

pub mod error;
pub mod logging;
