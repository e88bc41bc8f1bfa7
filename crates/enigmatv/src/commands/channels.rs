//! Channel command handler.

use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use enigmatv_core::{Adapter, Channel};

use crate::cli::{ChannelsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    channel_type: String,
    #[tabled(rename = "Reference")]
    id: String,
}

impl From<&Channel> for ChannelRow {
    fn from(c: &Channel) -> Self {
        Self {
            number: c.number,
            name: c.name.clone(),
            channel_type: c.channel_type.to_string(),
            id: c.id.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    adapter: &Adapter,
    args: &ChannelsArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let mut channels = adapter.list_channels(cancel).await?;
    if let Some(wanted) = args.channel_type {
        channels.retain(|c| c.channel_type == wanted);
    }

    let out = output::render_list(
        &global.output,
        &channels,
        |c| ChannelRow::from(c),
        |c| c.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
