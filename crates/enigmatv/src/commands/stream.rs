//! Stream command handler.

use std::fmt::Write;

use tokio_util::sync::CancellationToken;

use enigmatv_core::{Adapter, PlaybackDescriptor};

use crate::cli::{GlobalOpts, StreamArgs};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(stream: &PlaybackDescriptor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stream:     #{}", stream.id);
    let _ = writeln!(out, "URL:        {}", stream.url);
    let _ = write!(
        out,
        "Transcoded: {}",
        if stream.transcoded { "yes" } else { "no" }
    );
    out
}

pub async fn handle(
    adapter: &Adapter,
    args: &StreamArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let channel = util::resolve_channel(adapter, &args.channel, cancel).await?;
    let stream = adapter.channel_stream(&channel.id, cancel).await?;

    let out = output::render_single(&global.output, &stream, detail, |s| s.url.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
