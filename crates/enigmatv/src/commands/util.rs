//! Shared helpers for command handlers.

use chrono::{DateTime, Local, Utc};
use tokio_util::sync::CancellationToken;

use enigmatv_core::{Adapter, Channel};

use crate::error::CliError;

/// Refresh the catalog and find a channel by service reference or name.
pub async fn resolve_channel(
    adapter: &Adapter,
    identifier: &str,
    cancel: &CancellationToken,
) -> Result<Channel, CliError> {
    adapter.list_channels(cancel).await?;
    let catalog = adapter.catalog();
    catalog
        .find_by_id(identifier)
        .or_else(|| catalog.find_by_name(identifier))
        .ok_or_else(|| CliError::NotFound {
            resource_type: "channel".into(),
            identifier: identifier.into(),
            list_command: "channels".into(),
        })
}

/// Local wall-clock time, minute precision.
pub fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Short human duration between two instants.
pub fn duration(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    let minutes = (*end - *start).num_minutes();
    if minutes >= 60 {
        format!("{}h{:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn duration_formats_hours_and_minutes() {
        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let short = DateTime::from_timestamp(1_700_000_000 + 15 * 60, 0).unwrap();
        let long = DateTime::from_timestamp(1_700_000_000 + 95 * 60, 0).unwrap();

        assert_eq!(duration(&start, &short), "15m");
        assert_eq!(duration(&start, &long), "1h35m");
        assert_eq!(duration(&start, &start), "0m");
    }
}
