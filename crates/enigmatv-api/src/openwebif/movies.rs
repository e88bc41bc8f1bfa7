// Recording (movie) endpoints

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::Error;
use crate::openwebif::client::OpenWebIfClient;
use crate::openwebif::models::{E2Movie, E2SimpleResult};

impl OpenWebIfClient {
    /// List recordings in the default movie location.
    ///
    /// `GET /web/movielist`
    pub async fn list_movies(&self, cancel: &CancellationToken) -> Result<Vec<E2Movie>, Error> {
        debug!("listing recordings");
        let records = self
            .get_records("movielist", &[], self.dialect().tags.movie, cancel)
            .await?;
        Ok(records.iter().map(E2Movie::from).collect())
    }

    /// Delete a recording by its service reference.
    ///
    /// `GET /web/moviedelete?sRef={reference}`
    pub async fn delete_movie(
        &self,
        reference: &str,
        cancel: &CancellationToken,
    ) -> Result<E2SimpleResult, Error> {
        debug!(reference, "deleting recording");
        self.perform_action("moviedelete", &[("sRef", reference)], cancel)
            .await
    }
}
