use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::scheduler::ConnectivityProbe;

/// Judges connectivity by requesting a well-known endpoint and comparing the
/// status code, e.g. a `generate_204` page that answers 204 only when the
/// request really reached the internet.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    url: String,
    expected: StatusCode,
}

impl HttpProbe {
    pub fn new(
        url: impl Into<String>,
        expected: StatusCode,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            expected,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ConnectivityProbe for HttpProbe {
    async fn is_online(&self) -> bool {
        match self.client.get(&self.url).send().await {
            Ok(response) => {
                let status = response.status();
                if status != self.expected {
                    debug!(url = %self.url, %status, "probe answered with unexpected status");
                }
                status == self.expected
            }
            Err(e) => {
                debug!(url = %self.url, error = %e, "probe request failed");
                false
            }
        }
    }
}
