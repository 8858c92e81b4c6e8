use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use super::error::BoardsError;
use super::request::RequestBuilder;
use super::session::API_VERSION;
use super::transport::Transport;
use crate::model::work_item::WorkItem;

#[derive(Deserialize)]
struct BatchResponse {
    value: Vec<WorkItem>,
}

/// Resolves full records for a known set of ids in a single round trip.
pub struct BatchFetcher<'a> {
    requests: RequestBuilder<'a>,
    transport: &'a dyn Transport,
}

impl<'a> BatchFetcher<'a> {
    pub fn new(requests: RequestBuilder<'a>, transport: &'a dyn Transport) -> Self {
        Self {
            requests,
            transport,
        }
    }

    /// Fetch every item in the comma-joined `ids`. The backend silently drops
    /// ids that no longer exist and does not promise to keep input order.
    /// Requests are not chunked, so lists over the backend's batch limit
    /// fail the way the backend decides.
    pub async fn fetch_by_ids(&self, ids: &str) -> Result<Vec<WorkItem>, BoardsError> {
        if ids.trim().is_empty() {
            return Err(BoardsError::EmptyIdList);
        }

        let path = format!("wit/workitems?ids={ids}&api-version={API_VERSION}");
        let request = self.requests.build(Method::GET, &path, None)?;
        let resp = self.transport.send(request).await?;

        if !resp.status_in(&[200]) {
            return Err(BoardsError::Batch {
                status: resp.status,
                body: resp.body,
            });
        }

        let batch: BatchResponse =
            serde_json::from_str(&resp.body).map_err(|e| BoardsError::decode("batch", e))?;
        debug!(count = batch.value.len(), "batch fetch returned work items");

        Ok(batch.value)
    }
}
