use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

use super::error::BoardsError;
use super::request::RequestBuilder;
use super::session::API_VERSION;
use super::transport::Transport;
use crate::model::iteration::Iteration;

#[derive(Deserialize)]
struct IterationList {
    value: Vec<Iteration>,
}

/// Lists the project default team's iterations.
pub struct IterationLister<'a> {
    requests: RequestBuilder<'a>,
    transport: &'a dyn Transport,
}

impl<'a> IterationLister<'a> {
    pub fn new(requests: RequestBuilder<'a>, transport: &'a dyn Transport) -> Self {
        Self {
            requests,
            transport,
        }
    }

    pub async fn list_iterations(&self) -> Result<Vec<Iteration>, BoardsError> {
        let path = format!("work/teamsettings/iterations?api-version={API_VERSION}");
        let request = self.requests.build(Method::GET, &path, None)?;
        let resp = self.transport.send(request).await?;

        if !resp.status_in(&[200]) {
            return Err(BoardsError::Iterations {
                status: resp.status,
                body: resp.body,
            });
        }

        let list: IterationList = serde_json::from_str(&resp.body)
            .map_err(|e| BoardsError::decode("iterations", e))?;
        debug!(count = list.value.len(), "listed iterations");
        Ok(list.value)
    }
}
