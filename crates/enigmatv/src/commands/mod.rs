//! Command dispatch: bridges CLI args -> adapter operations -> output formatting.

pub mod channels;
pub mod config_cmd;
pub mod guide;
pub mod recordings;
pub mod status;
pub mod stream;
pub mod timers;
pub mod util;

use tokio_util::sync::CancellationToken;

use enigmatv_core::Adapter;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a receiver-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    adapter: &Adapter,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match cmd {
        Command::Channels(args) => channels::handle(adapter, &args, global, cancel).await,
        Command::Guide(args) => guide::handle(adapter, &args, global, cancel).await,
        Command::Recordings(args) => recordings::handle(adapter, args, global, cancel).await,
        Command::Timers(args) => timers::handle(adapter, args, global, cancel).await,
        Command::Stream(args) => stream::handle(adapter, &args, global, cancel).await,
        Command::Status => status::handle(adapter, global, cancel).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
