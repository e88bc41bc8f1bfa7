// Device endpoints
//
// Hardware info and the zap (tune) action.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Error;
use crate::openwebif::client::OpenWebIfClient;
use crate::openwebif::models::{E2Frontend, E2SimpleResult};

impl OpenWebIfClient {
    /// List the receiver's tuners.
    ///
    /// `GET /web/deviceinfo`
    pub async fn list_frontends(&self, cancel: &CancellationToken) -> Result<Vec<E2Frontend>, Error> {
        debug!("fetching device info");
        let records = self
            .get_records("deviceinfo", &[], self.dialect().tags.frontend, cancel)
            .await?;
        Ok(records.iter().map(E2Frontend::from).collect())
    }

    /// Tune the receiver to a service.
    ///
    /// `GET /web/zap?sRef={reference}`
    pub async fn zap(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> Result<E2SimpleResult, Error> {
        debug!(reference, "zapping");
        self.perform_action("zap", &[("sRef", reference)], cancel)
            .await
    }
}
