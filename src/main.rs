//! reminderctl - command-line client for the reminderd daemon.
//!
//! Sends a single command over the daemon's Unix socket and prints whatever
//! the daemon replies before it closes the connection.

mod client;
mod config;
mod error;
mod exit;
mod protocol;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reminderctl")]
#[command(author, version, about = "Command-line client for the reminderd reminder daemon")]
#[command(long_about = "Command-line client for the reminderd reminder daemon.\n\n\
    The socket path comes from --socket, then $REMINDERD_SOCKET, then the config file, \
    then ~/.local/share/reminderd/reminderd.sock.\n\n\
    Exits with status 2 when the daemon is not reachable.")]
struct Cli {
    /// Daemon socket path (overrides $REMINDERD_SOCKET and the config file)
    #[arg(long, global = true, value_name = "PATH")]
    socket: Option<PathBuf>,

    /// Give up if the daemon has not finished replying within SECS seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Increase log verbosity on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Schedule a reminder
    Add {
        /// When to fire, in seconds since the Unix epoch
        #[arg(value_name = "EPOCH", allow_negative_numbers = true)]
        when: i64,
        /// Reminder text; multiple words are joined with single spaces
        #[arg(
            value_name = "MESSAGE",
            required = true,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        message: Vec<String>,
    },
    /// List scheduled reminders
    List,
    /// Cancel a reminder
    Remove {
        /// Reminder identifier, as shown by `list`
        id: u64,
    },
    /// Check that the daemon is alive
    Ping,
    /// Print the resolved daemon socket path without connecting
    Socket,
}

impl Commands {
    /// The daemon request for this subcommand, if it sends one.
    fn to_request(&self) -> Option<protocol::Command> {
        match self {
            Commands::Add { when, message } => Some(protocol::Command::Add {
                when: *when,
                message: message.join(" "),
            }),
            Commands::List => Some(protocol::Command::List),
            Commands::Remove { id } => Some(protocol::Command::Remove { id: *id }),
            Commands::Ping => Some(protocol::Command::Ping),
            Commands::Socket => None,
        }
    }
}

/// Lowercase the subcommand token so `PING` or `Ping` parse as `ping`.
///
/// Only the verb is touched; option values and `add` message words keep
/// their case.
fn normalize_verb(mut args: Vec<OsString>) -> Vec<OsString> {
    let cli = Cli::command();
    let verbs: Vec<&str> = cli.get_subcommands().map(|c| c.get_name()).collect();
    let valued: Vec<String> = cli
        .get_arguments()
        .filter(|a| a.get_action().takes_values())
        .filter_map(|a| a.get_long().map(|long| format!("--{long}")))
        .collect();

    let mut i = 1;
    while i < args.len() {
        let Some(arg) = args[i].to_str() else { break };
        if arg == "--" {
            break;
        }
        if arg.starts_with('-') {
            if valued.iter().any(|v| v == arg) {
                i += 1;
            }
            i += 1;
            continue;
        }
        let lowered = arg.to_ascii_lowercase();
        if verbs.contains(&lowered.as_str()) {
            args[i] = lowered.into();
        }
        break;
    }
    args
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // clap exits with 2 on usage errors, which is reserved for "daemon not reachable".
    let cli = match Cli::try_parse_from(normalize_verb(std::env::args_os().collect())) {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                exit::FAILURE
            } else {
                exit::SUCCESS
            };
            let _ = err.print();
            std::process::exit(code);
        }
    };

    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("error: {:#}", err);
        std::process::exit(exit::code_for(&err));
    }
}

/// Initialize logging to stderr so stdout carries only the daemon's reply.
fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "reminderctl=warn",
        1 => "reminderctl=debug",
        _ => "reminderctl=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("Failed to load configuration")?;
    let endpoint = config::Endpoint::from_env(cli.socket, &config)?;
    let client = client::ControlClient::new(endpoint);
    debug!("Using socket {}", client.endpoint());

    let Some(command) = cli.command.to_request() else {
        println!("{}", client.endpoint());
        return Ok(());
    };

    let reply = match cli.timeout {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), client.request(&command))
            .await
            .with_context(|| format!("No reply from reminderd within {}s", secs))??,
        None => client.request(&command).await?,
    };

    println!("{}", reply);
    Ok(())
}
