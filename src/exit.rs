//! Process exit codes.

use crate::error::ChannelError;
use tokio::time::error::Elapsed;

pub const SUCCESS: i32 = 0;
/// Usage errors, bad input, config problems, and generic I/O failures.
pub const FAILURE: i32 = 1;
/// reminderd is not reachable at the configured socket.
pub const DAEMON_UNAVAILABLE: i32 = 2;
pub const TIMEOUT: i32 = 124;

/// Pick the exit status for an error that reached `main`.
pub fn code_for(err: &anyhow::Error) -> i32 {
    if let Some(channel) = err.downcast_ref::<ChannelError>() {
        return if channel.is_unavailable() {
            DAEMON_UNAVAILABLE
        } else {
            FAILURE
        };
    }
    if err.downcast_ref::<Elapsed>().is_some() {
        return TIMEOUT;
    }
    FAILURE
}
