pub mod batch;
pub mod create;
pub mod error;
pub mod iterations;
pub mod query;
pub mod request;
pub mod session;
pub mod transport;

pub use error::BoardsError;
pub use session::ClientSession;
pub use transport::{HttpTransport, Transport};

use create::WorkItemCreator;
use iterations::IterationLister;
use query::WorkItemQueryEngine;
use request::RequestBuilder;

/// Session plus transport for one invocation. The components borrow from it,
/// so every request shares the same base url and credential.
pub struct Boards {
    session: ClientSession,
    transport: Box<dyn Transport>,
}

impl Boards {
    pub fn new(session: ClientSession, transport: Box<dyn Transport>) -> Self {
        Self { session, transport }
    }

    pub fn session(&self) -> &ClientSession {
        &self.session
    }

    fn requests(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(&self.session)
    }

    pub fn query_engine(&self) -> WorkItemQueryEngine<'_> {
        WorkItemQueryEngine::new(self.requests(), self.transport.as_ref())
    }

    pub fn creator(&self) -> WorkItemCreator<'_> {
        WorkItemCreator::new(self.requests(), self.transport.as_ref())
    }

    pub fn iterations(&self) -> IterationLister<'_> {
        IterationLister::new(self.requests(), self.transport.as_ref())
    }
}
