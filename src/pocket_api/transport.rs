use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};

use crate::pocket_api::{
    RETRIEVE_URL, headers, query::RetrieveRequest, types::TransportError,
};

/// One network exchange per call: send the request, hand back the raw response body.
///
/// Implementations do not retry and do not look at the HTTP status; any readable body is
/// a candidate for decoding, including API-level error bodies.
pub trait PocketTransport {
    fn send(&self, request: &RetrieveRequest) -> Result<Vec<u8>, TransportError>;
}

impl<T: PocketTransport + ?Sized> PocketTransport for &T {
    fn send(&self, request: &RetrieveRequest) -> Result<Vec<u8>, TransportError> {
        (**self).send(request)
    }
}

/// Blocking transport posting JSON to the retrieve endpoint.
pub struct ReqwestTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Transport for the public retrieve endpoint without any timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::builder().build()
    }

    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder {
            endpoint: RETRIEVE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PocketTransport for ReqwestTransport {
    fn send(&self, request: &RetrieveRequest) -> Result<Vec<u8>, TransportError> {
        let body = serde_json::to_vec(request).map_err(TransportError::Encode)?;
        log::debug!(
            "Sending request for consumer key '{}' to '{}' with filters: {}",
            request.credentials().consumer_key(),
            self.endpoint,
            request.filters()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(
                header::CONTENT_TYPE,
                HeaderValue::from_static(headers::APPLICATION_JSON),
            )
            .body(body)
            .send()?;
        log::debug!("Received response with status {}", response.status());

        let bytes = response.bytes()?;
        log::trace!("Response body: {}", String::from_utf8_lossy(&bytes));
        Ok(bytes.to_vec())
    }
}

pub struct ReqwestTransportBuilder {
    endpoint: String,
    timeout: Option<Duration>,
}

impl ReqwestTransportBuilder {
    /// Point the transport somewhere other than the public endpoint, e.g. a local test server.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ReqwestTransport, TransportError> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            headers::X_ACCEPT,
            HeaderValue::from_static(headers::APPLICATION_JSON),
        );
        log::trace!(
            "Creating transport for '{}' with default headers: {:?}",
            self.endpoint,
            default_headers
        );
        // reqwest's blocking client applies a 30s timeout unless told otherwise
        let client = reqwest::blocking::Client::builder()
            .default_headers(default_headers)
            .timeout(self.timeout)
            .build()?;
        Ok(ReqwestTransport {
            endpoint: self.endpoint,
            client,
        })
    }
}
