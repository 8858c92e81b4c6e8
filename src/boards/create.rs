use reqwest::Method;
use serde::Serialize;
use tracing::debug;

use super::error::BoardsError;
use super::request::RequestBuilder;
use super::session::API_VERSION;
use super::transport::Transport;
use crate::model::work_item::WorkItem;

pub const TITLE_FIELD: &str = "/fields/System.Title";
pub const DESCRIPTION_FIELD: &str = "/fields/System.Description";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
}

/// One entry of a JSON Patch document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: &'static str,
    pub value: String,
}

impl PatchOperation {
    pub fn add(path: &'static str, value: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Add,
            path,
            value: value.into(),
        }
    }
}

/// Title then description. An empty description still gets its own
/// operation.
pub fn create_document(title: &str, description: &str) -> Vec<PatchOperation> {
    vec![
        PatchOperation::add(TITLE_FIELD, title),
        PatchOperation::add(DESCRIPTION_FIELD, description),
    ]
}

pub struct WorkItemCreator<'a> {
    requests: RequestBuilder<'a>,
    transport: &'a dyn Transport,
}

impl<'a> WorkItemCreator<'a> {
    pub fn new(requests: RequestBuilder<'a>, transport: &'a dyn Transport) -> Self {
        Self {
            requests,
            transport,
        }
    }

    /// Create a work item of `item_type`. The type goes into the path as-is;
    /// an unknown type comes back as a backend error. Not idempotent, so this
    /// is never retried.
    pub async fn create(
        &self,
        title: &str,
        description: &str,
        item_type: &str,
    ) -> Result<WorkItem, BoardsError> {
        let path = format!("wit/workitems/${item_type}?api-version={API_VERSION}");
        let document = create_document(title, description);
        let request = self.requests.build_json(Method::POST, &path, &document)?;
        let resp = self.transport.send(request).await?;

        if !resp.status_in(&[200, 201]) {
            return Err(BoardsError::Create {
                status: resp.status,
                body: resp.body,
            });
        }

        let item: WorkItem =
            serde_json::from_str(&resp.body).map_err(|e| BoardsError::decode("create", e))?;
        debug!(id = item.id, item_type, "created work item");
        Ok(item)
    }
}
