//! Client side of the reminderd control channel.
//!
//! Each request is one connection: connect, write a single line, read until
//! the daemon closes, done.

pub mod socket;

pub use socket::ControlClient;
