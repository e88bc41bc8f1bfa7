//! Timer command handlers.

use tabled::Tabled;
use tokio_util::sync::CancellationToken;

use enigmatv_core::{Adapter, NewTimer, ProgramId, Timer, TimerId, TimerStatus};

use crate::cli::{GlobalOpts, TimersArgs, TimersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TimerRow {
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "Length")]
    length: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Timer ID")]
    id: String,
}

impl TimerRow {
    fn new(t: &Timer, color: bool) -> Self {
        Self {
            start: util::local_time(&t.start),
            length: util::duration(&t.start, &t.end),
            name: t.name.clone(),
            status: output::highlight(
                &t.status.to_string(),
                t.status == TimerStatus::InProgress,
                color,
            ),
            id: t.id.to_string(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    adapter: &Adapter,
    args: TimersArgs,
    global: &GlobalOpts,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    match args.command {
        TimersCommand::List => {
            let timers = adapter.list_timers(cancel).await?;
            let color = output::should_color(&global.color);
            let out = output::render_list(
                &global.output,
                &timers,
                |t| TimerRow::new(t, color),
                |t| t.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TimersCommand::Add { program } => {
            let program_id: ProgramId = program.parse()?;
            let request = NewTimer {
                channel_id: program_id.channel_ref.clone(),
                program_id,
            };
            adapter.create_timer(&request, cancel).await?;
            if !global.quiet {
                eprintln!("Timer added");
            }
            Ok(())
        }

        TimersCommand::Cancel { timer } => {
            let timer_id: TimerId = timer.parse()?;
            adapter.cancel_timer(&timer_id, cancel).await?;
            if !global.quiet {
                eprintln!("Timer cancelled");
            }
            Ok(())
        }
    }
}
