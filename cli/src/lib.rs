//! Command-line host for the expense client core.
//!
//! The core never touches the network; this crate supplies the ureq
//! `Transport` and a `Session` that runs view-model calls to completion.

pub mod session;
pub mod transport;

pub use session::Session;
pub use transport::UreqTransport;
