//! Wire protocol for client-daemon communication.
//!
//! Requests are a single line of `|`-separated fields. The daemon answers with
//! unstructured text and closes the connection to mark the end of the reply.
//! Fields are not escaped: a `|` inside an `ADD` message reaches the daemon
//! verbatim and may be read as a separator.

use crate::error::ProtocolError;
use tracing::warn;

/// A request understood by reminderd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Schedule a reminder at `when` (seconds since the Unix epoch).
    Add { when: i64, message: String },
    /// List all scheduled reminders.
    List,
    /// Cancel a reminder by identifier.
    Remove { id: u64 },
    /// Liveness check.
    Ping,
}

impl Command {
    /// The verb that opens the request line.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Add { .. } => "ADD",
            Command::List => "LIST",
            Command::Remove { .. } => "REMOVE",
            Command::Ping => "PING",
        }
    }

    /// Encode as a request line, without the trailing terminator.
    pub fn encode(&self) -> Result<String, ProtocolError> {
        let d = framing::DELIMITER;
        match self {
            Command::Add { when, message } => {
                if message.contains('\n') {
                    return Err(ProtocolError::EmbeddedNewline { field: "message" });
                }
                if message.contains(d) {
                    warn!(
                        "message contains '{}'; reminderd may treat it as a field separator",
                        d
                    );
                }
                Ok(format!("{}{d}{when}{d}{message}", self.verb()))
            }
            Command::Remove { id } => Ok(format!("{}{d}{id}", self.verb())),
            Command::List | Command::Ping => Ok(self.verb().to_string()),
        }
    }
}

/// Framing: newline-terminated request, end-of-stream-terminated response.
pub mod framing {
    /// Field separator inside a request line.
    pub const DELIMITER: char = '|';

    /// Request terminator.
    pub const TERMINATOR: u8 = b'\n';

    /// Append the terminator to a request line.
    pub fn frame_request(line: &str) -> Vec<u8> {
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(TERMINATOR);
        buf
    }

    /// Turn the bytes received before end-of-stream into display text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn decode_response(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_add() {
        let cmd = Command::Add {
            when: 1_700_000_000,
            message: "water the plants".to_string(),
        };
        assert_eq!(cmd.encode().unwrap(), "ADD|1700000000|water the plants");
    }

    #[test]
    fn test_encode_add_keeps_delimiter_in_message() {
        let cmd = Command::Add {
            when: 5,
            message: "a|b".to_string(),
        };
        assert_eq!(cmd.encode().unwrap(), "ADD|5|a|b");
    }

    #[test]
    fn test_encode_add_rejects_newline() {
        let cmd = Command::Add {
            when: 5,
            message: "two\nlines".to_string(),
        };
        assert_eq!(
            cmd.encode(),
            Err(ProtocolError::EmbeddedNewline { field: "message" })
        );
    }

    #[test]
    fn test_encode_simple_verbs() {
        assert_eq!(Command::List.encode().unwrap(), "LIST");
        assert_eq!(Command::Ping.encode().unwrap(), "PING");
        assert_eq!(Command::Remove { id: 42 }.encode().unwrap(), "REMOVE|42");
    }

    #[test]
    fn test_frame_request_appends_single_newline() {
        assert_eq!(framing::frame_request("PING"), b"PING\n".to_vec());
        assert_eq!(framing::frame_request(""), b"\n".to_vec());
    }

    #[test]
    fn test_decode_response_trims() {
        assert_eq!(framing::decode_response(b"  OK\n"), "OK");
        assert_eq!(framing::decode_response(b""), "");
        assert_eq!(framing::decode_response(b"1: a\n2: b\n"), "1: a\n2: b");
    }

    #[test]
    fn test_decode_response_tolerates_invalid_utf8() {
        let decoded = framing::decode_response(b"ok \xff\xfe done");
        assert!(decoded.starts_with("ok "));
        assert!(decoded.ends_with(" done"));
    }
}
