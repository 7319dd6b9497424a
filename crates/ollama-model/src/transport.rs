use std::sync::Arc;

use reqwest::{Client, header};
use serde::de::Error as _;

use crate::Error;
use crate::proto::{ChatRequest, ChatResponse, WireMessage};

/// Sends chat requests to the single chat endpoint of a server.
///
/// No retries and no timeouts are applied here; dropping the future
/// returned by [`Transport::chat`] is the only way to abort a round.
#[derive(Clone, Debug)]
pub struct Transport {
    client: Client,
    url: Arc<str>,
}

impl Transport {
    #[inline]
    pub fn new(client: Client, url: String) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Posts the request and returns the assistant message of the reply.
    pub fn chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<WireMessage, Error>> + Send + 'static + use<>
    {
        let resp_fut = self
            .client
            .post(&*self.url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(req)
            .send();
        let url = Arc::clone(&self.url);

        async move {
            let resp = resp_fut
                .await
                .map_err(|err| Error::Connection(format!("{err}")))?;
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|err| Error::Connection(format!("{err}")))?;
            trace!("got response from {url} ({status}): {body}");

            if !status.is_success() {
                return Err(Error::Transport {
                    status: status.as_u16(),
                    body,
                });
            }

            let resp: ChatResponse =
                serde_json::from_str(&body).map_err(Error::Decode)?;
            // A reported error wins over whatever content came with it.
            if let Some(error) = resp.error.filter(|e| !e.is_empty()) {
                return Err(Error::Backend(error));
            }
            let message = resp.message.ok_or_else(|| {
                Error::Decode(serde_json::Error::missing_field("message"))
            })?;
            serde_json::from_value(message).map_err(Error::Decode)
        }
    }
}
