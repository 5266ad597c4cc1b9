//! GraphQL transport abstraction.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Trait for GraphQL transports.
///
/// `execute` returns the `data` member of the GraphQL response. Error
/// payloads are mapped to [`crate::Error`] by the implementation.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Run a query or mutation with the given variables.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::error::Error;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// A recorded request.
    #[derive(Debug, Clone)]
    pub struct Request {
        pub query: String,
        pub variables: Value,
    }

    /// Transport that replays canned responses in order.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<Value>>>,
        requests: Mutex<Vec<Request>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a successful `data` payload.
        pub fn respond(self, data: Value) -> Self {
            self.responses.lock().unwrap().push_back(Ok(data));
            self
        }

        /// Queue an error.
        pub fn fail(self, error: Error) -> Self {
            self.responses.lock().unwrap().push_back(Err(error));
            self
        }

        /// Requests received so far.
        pub fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(&self, query: &str, variables: Value) -> Result<Value> {
            self.requests.lock().unwrap().push(Request {
                query: query.to_owned(),
                variables,
            });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::missing("mock response")))
        }
    }
}
