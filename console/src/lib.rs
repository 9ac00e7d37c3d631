//! Terminal host for the spy cat page.
//!
//! The core never touches the network or the terminal; this crate supplies
//! both. `UreqTransport` executes the requests the controller produces and
//! `session::run` feeds it commands from a line-based input, asking the
//! delete confirmation on the same input.

pub mod command;
pub mod session;
pub mod transport;

pub use command::{Command, CommandError};
pub use transport::UreqTransport;
