//! Status command handler.

use std::fmt::Write;

use tokio_util::sync::CancellationToken;

use enigmatv_core::{Adapter, DeviceStatus};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn detail(status: &DeviceStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Version: {}", status.version);
    let _ = write!(out, "Tuners:  {}", status.tuners.len());
    for tuner in &status.tuners {
        let _ = write!(out, "\n  {} ({})", tuner.name, tuner.id);
    }
    out
}

pub async fn handle(
    adapter: &Adapter,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let status = adapter.status(cancel).await?;
    let out = output::render_single(&global.output, &status, detail, |s| {
        s.tuners
            .iter()
            .map(|t| t.name.clone())
            .collect::<Vec<_>>()
            .join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
