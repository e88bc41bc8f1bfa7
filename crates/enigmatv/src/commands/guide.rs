//! Guide command handler.

use chrono::{TimeDelta, Utc};
use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use enigmatv_core::{Adapter, Program};

use crate::cli::{GlobalOpts, GuideArgs};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProgramRow {
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Length")]
    length: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Program ID")]
    id: String,
}

impl From<&Program> for ProgramRow {
    fn from(p: &Program) -> Self {
        Self {
            start: util::local_time(&p.start),
            length: util::duration(&p.start, &p.end),
            title: p.title.clone(),
            id: p.id.to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    adapter: &Adapter,
    args: &GuideArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    // Refreshes the catalog, so programs pick up the channel's picon.
    let channel = util::resolve_channel(adapter, &args.channel, cancel).await?;

    let start = Utc::now();
    let end = start + TimeDelta::hours(i64::from(args.hours));
    let programs = adapter.list_programs(&channel.id, start, end, cancel).await?;

    let out = output::render_list(
        &global.output,
        &programs,
        |p| ProgramRow::from(p),
        |p| p.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
