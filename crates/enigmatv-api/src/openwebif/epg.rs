// EPG endpoint

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Error;
use crate::openwebif::client::OpenWebIfClient;
use crate::openwebif::models::E2Event;

impl OpenWebIfClient {
    /// All EPG events the receiver holds for one service, oldest first.
    ///
    /// `GET /web/epgservice?sRef={reference}`
    pub async fn epg_for_service(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<E2Event>, Error> {
        debug!(reference, "fetching service EPG");
        let records = self
            .get_records(
                "epgservice",
                &[("sRef", reference)],
                self.dialect().tags.event,
                cancel,
            )
            .await?;
        Ok(records.iter().map(E2Event::from).collect())
    }
}
