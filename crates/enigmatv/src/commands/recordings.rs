//! Recording command handlers.

use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use enigmatv_core::{Adapter, Recording};

use crate::cli::{GlobalOpts, RecordingsArgs, RecordingsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RecordingRow {
    #[tabled(rename = "Recorded")]
    start: String,
    #[tabled(rename = "Length")]
    length: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Recording> for RecordingRow {
    fn from(r: &Recording) -> Self {
        Self {
            start: util::local_time(&r.start),
            length: util::duration(&r.start, &r.end),
            channel: r.service_name.clone(),
            title: r.title.clone(),
            id: r.id.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    adapter: &Adapter,
    args: RecordingsArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        RecordingsCommand::List => {
            // Correlation reads the catalog; make sure it is current.
            adapter.list_channels(cancel).await?;
            let recordings = adapter.list_recordings(cancel).await?;
            let out = output::render_list(
                &global.output,
                &recordings,
                |r| RecordingRow::from(r),
                |r| r.playback_url.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RecordingsCommand::Delete { id } => {
            adapter.delete_recording(&id, cancel).await?;
            if !global.quiet {
                eprintln!("Recording deleted");
            }
            Ok(())
        }
    }
}
