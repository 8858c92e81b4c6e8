use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::batch::BatchFetcher;
use super::error::BoardsError;
use super::request::RequestBuilder;
use super::session::API_VERSION;
use super::transport::Transport;
use crate::model::work_item::{WorkItem, WorkItemReference};

/// Every item in the project, most recently changed first.
pub const DEFAULT_WIQL: &str = "SELECT [System.Id], [System.Title], [System.State] FROM WorkItems WHERE [System.TeamProject] = @project ORDER BY [System.ChangedDate] DESC";

#[derive(Serialize)]
struct QueryRequest<'q> {
    query: &'q str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResult {
    work_items: Vec<WorkItemReference>,
}

/// Two-phase listing: WIQL returns only ids, so full records always come
/// from a follow-up batch fetch.
pub struct WorkItemQueryEngine<'a> {
    requests: RequestBuilder<'a>,
    transport: &'a dyn Transport,
    batch: BatchFetcher<'a>,
}

impl<'a> WorkItemQueryEngine<'a> {
    pub fn new(requests: RequestBuilder<'a>, transport: &'a dyn Transport) -> Self {
        Self {
            requests,
            transport,
            batch: BatchFetcher::new(requests, transport),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<WorkItem>, BoardsError> {
        self.run_query(DEFAULT_WIQL).await
    }

    /// Run `wiql` and resolve the matching ids. An empty match never reaches
    /// the batch endpoint.
    pub async fn run_query(&self, wiql: &str) -> Result<Vec<WorkItem>, BoardsError> {
        let path = format!("wit/wiql?api-version={API_VERSION}");
        let request =
            self.requests
                .build_json(Method::POST, &path, &QueryRequest { query: wiql })?;
        let resp = self.transport.send(request).await?;

        if !resp.status_in(&[200]) {
            return Err(BoardsError::Query {
                status: resp.status,
                body: resp.body,
            });
        }

        let result: QueryResult =
            serde_json::from_str(&resp.body).map_err(|e| BoardsError::decode("WIQL", e))?;
        if result.work_items.is_empty() {
            debug!("WIQL query matched no work items");
            return Ok(Vec::new());
        }

        debug!(count = result.work_items.len(), "WIQL query matched work items");
        let ids = result
            .work_items
            .iter()
            .map(|r| r.id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.batch.fetch_by_ids(&ids).await
    }

    /// Fetch explicit ids, skipping the query phase. Ids are forwarded as
    /// given; non-numeric ones are left for the backend to reject.
    pub async fn list_by_ids(&self, ids: &[String]) -> Result<Vec<WorkItem>, BoardsError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.batch.fetch_by_ids(&ids.join(",")).await
    }
}
