//! In-memory transport for client tests

use std::sync::Mutex;

use archapi_core::TransportError;
use url::Url;

use super::{BoxFuture, Transport, TransportResponse};

/// Replays a canned response and records every requested URL
pub(crate) struct RecordingTransport {
    response: Result<TransportResponse, String>,
    requests: Mutex<Vec<Url>>,
}

impl RecordingTransport {
    pub(crate) fn respond(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(TransportResponse::new(status, body)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond_json(value: serde_json::Value) -> Self {
        Self::respond(200, serde_json::to_vec(&value).unwrap())
    }

    pub(crate) fn fail(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn get<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<TransportResponse, TransportError>> {
        self.requests.lock().unwrap().push(url.clone());
        let response = self.response.clone().map_err(TransportError::new);
        Box::pin(async move { response })
    }
}
