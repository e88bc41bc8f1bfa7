// Timer endpoints

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Error;
use crate::openwebif::client::OpenWebIfClient;
use crate::openwebif::models::{E2SimpleResult, E2Timer};

impl OpenWebIfClient {
    /// List all timers regardless of state.
    ///
    /// `GET /web/timerlist`
    pub async fn list_timers(&self, cancel: &CancellationToken) -> Result<Vec<E2Timer>, Error> {
        debug!("listing timers");
        let records = self
            .get_records("timerlist", &[], self.dialect().tags.timer, cancel)
            .await?;
        Ok(records.iter().map(E2Timer::from).collect())
    }

    /// Schedule a recording of one EPG event.
    ///
    /// `GET /web/timeraddbyeventid?sRef={reference}&eventid={id}[&dirname={dir}]`
    pub async fn add_timer_by_event_id(
        &self,
        reference: &str,
        event_id: &str,
        dirname: Option<&str>,
        cancel: &CancellationToken,
    ) -> Result<E2SimpleResult, Error> {
        debug!(reference, event_id, "adding timer");
        let mut query = vec![("sRef", reference), ("eventid", event_id)];
        if let Some(dir) = dirname {
            query.push(("dirname", dir));
        }
        self.perform_action("timeraddbyeventid", &query, cancel).await
    }

    /// Delete a timer, identified by service and time range.
    ///
    /// `GET /web/timerdelete?sRef={reference}&begin={begin}&end={end}`
    pub async fn delete_timer(
        &self,
        reference: &str,
        begin: &str,
        end: &str,
        cancel: &CancellationToken,
    ) -> Result<E2SimpleResult, Error> {
        debug!(reference, begin, end, "deleting timer");
        self.perform_action(
            "timerdelete",
            &[("sRef", reference), ("begin", begin), ("end", end)],
            cancel,
        )
        .await
    }
}
