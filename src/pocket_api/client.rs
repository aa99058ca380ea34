use crate::pocket_api::{
    credentials::Credentials,
    normalize,
    query::{RetrieveFilters, RetrieveRequest},
    transport::{PocketTransport, ReqwestTransport},
    types::{Item, RetrieveError, RetrieveResponse},
};

/// Retrieves saved items: builds the request, sends it, and normalizes the response.
///
/// Calls share nothing but the read-only credentials, so one client can serve
/// several threads as long as the transport can.
pub struct PocketClient<T: PocketTransport = ReqwestTransport> {
    credentials: Credentials,
    transport: T,
}

impl PocketClient<ReqwestTransport> {
    /// Client talking to the public retrieve endpoint.
    pub fn new(credentials: Credentials) -> Result<Self, RetrieveError> {
        Ok(Self::with_transport(credentials, ReqwestTransport::new()?))
    }
}

impl<T: PocketTransport> PocketClient<T> {
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Retrieve the items matching `filters`, in unspecified order.
    pub fn retrieve(&self, filters: RetrieveFilters) -> Result<Vec<Item>, RetrieveError> {
        self.retrieve_response(filters)
            .map(RetrieveResponse::into_items)
    }

    /// Like [`PocketClient::retrieve`] but keeps the response metadata (`status`, `since`, ...).
    pub fn retrieve_response(
        &self,
        filters: RetrieveFilters,
    ) -> Result<RetrieveResponse, RetrieveError> {
        log::debug!("Retrieving items with filters: {}", filters);
        let request = RetrieveRequest::new(&self.credentials, filters);
        let body = self.transport.send(&request)?;
        let response = normalize::decode_response(&body)?;
        log::info!("Retrieved {} items", response.len());
        Ok(response)
    }

    /// All articles, archived or not, newest first, with complete details.
    pub fn retrieve_all_articles(&self) -> Result<Vec<Item>, RetrieveError> {
        self.retrieve(RetrieveFilters::all_articles())
    }
}
