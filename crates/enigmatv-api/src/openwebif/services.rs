// Service listing endpoint
//
// `getservices` lists bouquets when called bare and the channels of one
// bouquet when given its reference.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Error;
use crate::openwebif::client::OpenWebIfClient;
use crate::openwebif::models::E2Service;

impl OpenWebIfClient {
    /// List the top-level bouquets.
    ///
    /// `GET /web/getservices`
    pub async fn list_bouquets(&self, cancel: &CancellationToken) -> Result<Vec<E2Service>, Error> {
        debug!("listing bouquets");
        let records = self
            .get_records("getservices", &[], self.dialect().tags.service, cancel)
            .await?;
        Ok(records.iter().map(E2Service::from).collect())
    }

    /// List the services inside one bouquet.
    ///
    /// `GET /web/getservices?sRef={bouquet}`
    pub async fn list_bouquet_services(
        &self,
        bouquet_ref: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<E2Service>, Error> {
        debug!(bouquet = bouquet_ref, "listing bouquet services");
        let records = self
            .get_records(
                "getservices",
                &[("sRef", bouquet_ref)],
                self.dialect().tags.service,
                cancel,
            )
            .await?;
        Ok(records.iter().map(E2Service::from).collect())
    }
}
