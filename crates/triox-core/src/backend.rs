//! Shared request plumbing for the listing client and mutation dispatcher.

use log::debug;

use crate::config::ApiConfig;
use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, AuthProvider, Transport};

pub(crate) struct Backend<T, A> {
    transport: T,
    auth: A,
    config: ApiConfig,
}

impl<T: Transport, A: AuthProvider> Backend<T, A> {
    pub(crate) fn new(transport: T, auth: A, config: ApiConfig) -> Self {
        Self {
            transport,
            auth,
            config,
        }
    }

    pub(crate) fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Attach the current auth headers and send.
    pub(crate) async fn send(
        &self,
        request: ApiRequest<T::Form>,
    ) -> Result<ApiResponse, TransportError> {
        let request = request.with_headers(self.auth.auth_headers());
        debug!("{} {}", request.method, request.url);
        self.transport.send(request).await
    }
}
