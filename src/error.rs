//! Standard errors used by all functions in the crate.

use std::fmt;

/// Error collecting all possible failures of the processor client.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Reqwest error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Error returned by a processor API endpoint.
    #[error("{0}")]
    Api(#[from] ApiError),
    /// Catch-all variant for unexpected errors.
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<reqwest_middleware::Error> for Error {
    fn from(e: reqwest_middleware::Error) -> Self {
        match e {
            reqwest_middleware::Error::Reqwest(e) => Error::Http(e),
            reqwest_middleware::Error::Middleware(e) => {
                e.downcast::<Error>().unwrap_or_else(Error::Other)
            }
        }
    }
}

impl From<Error> for reqwest_middleware::Error {
    fn from(e: Error) -> Self {
        reqwest_middleware::Error::Middleware(e.into())
    }
}

/// Processor HTTP APIs error.
///
/// Mirrors the `{"error": {...}}` envelope returned by the processor on
/// every non-2xx response.
#[derive(thiserror::Error, Debug)]
pub struct ApiError {
    /// HTTP status returned by the server.
    pub status: u16,
    /// Broad class of the failure, e.g. `invalid_request_error`,
    /// `authentication_error` or `rate_limit_error`.
    pub r#type: String,
    /// Human readable explanation of this occurrence of the problem.
    pub message: String,
    /// Machine readable short code, e.g. `balance_insufficient`.
    pub code: Option<String>,
    /// The request parameter the error relates to, if any.
    pub param: Option<String>,
    /// The processor trace identifier for the request.
    pub request_id: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processor HTTP error {}: {} ({})",
            self.status, self.message, self.r#type
        )?;

        if let Some(ref code) = self.code {
            write!(f, "\nCode: {}", code)?;
        }

        if let Some(ref param) = self.param {
            write!(f, "\nParameter: {}", param)?;
        }

        if let Some(ref request_id) = self.request_id {
            write!(f, "\nRequest ID: {}", request_id)?;
        }

        Ok(())
    }
}

/// Error returned by the [`Merchant`](crate::merchant::Merchant) adapter.
///
/// Every remote failure, whatever the underlying cause, surfaces as the
/// single [`Processor`](MerchantError::Processor) variant; callers
/// distinguish causes by inspecting its source, not by catching distinct
/// kinds per operation. The remaining variants cover local preconditions
/// and persistence of the cached account snapshot.
#[derive(thiserror::Error, Debug)]
pub enum MerchantError {
    /// The processor rejected or failed the remote operation.
    #[error("processor operation failed: {0}")]
    Processor(#[from] Error),
    /// The merchant record holds no processor account id yet.
    #[error("merchant record has no processor account id")]
    MissingProcessorId,
    /// A remote account was created but the local record could not be
    /// persisted, leaving the remote account unreferenced.
    #[error("remote account {account_id} created but not persisted locally: {source}")]
    OrphanedAccount {
        account_id: String,
        #[source]
        source: anyhow::Error,
    },
    /// The remote call succeeded but the refreshed snapshot could not be
    /// written back to the merchant record.
    #[error("failed to persist merchant record: {0}")]
    Persist(#[source] anyhow::Error),
}
