use crate::{
    common::REQUEST_ID_HEADER,
    error::{ApiError, Error},
};
use async_trait::async_trait;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use task_local_extensions::Extensions;

/// Reqwest middleware which translates JSON error responses returned from
/// the processor APIs into [`Error::Api`](crate::error::Error)s.
pub struct ErrorHandlingMiddleware;

#[async_trait]
impl Middleware for ErrorHandlingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        // Capture the response
        let response = next.run(req, extensions).await?;

        // Build an error if the response is not a success.
        // Try parsing the contents as the processor's error envelope,
        // but if that doesn't work, use the entire contents of the response
        // as the error text.
        if !response.status().is_success() {
            let status = response.status();
            let request_id = response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let bytes = response.bytes().await?;

            tracing::debug!("Failed HTTP request. Status code: {}", status);

            let payload: ErrorPayload = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|envelope| envelope.error)
                .unwrap_or_else(|_| ErrorPayload {
                    r#type: None,
                    message: if bytes.is_empty() {
                        None
                    } else {
                        Some(String::from_utf8_lossy(&bytes).into_owned())
                    },
                    code: None,
                    param: None,
                });

            return Err(
                Error::Api(payload.into_api_error(status.as_u16(), request_id)).into(),
            );
        }

        Ok(response)
    }
}

/// Error envelope returned by the processor APIs: `{"error": {...}}`.
#[derive(serde::Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(serde::Deserialize, Debug)]
struct ErrorPayload {
    r#type: Option<String>,
    message: Option<String>,
    code: Option<String>,
    param: Option<String>,
}

impl ErrorPayload {
    fn into_api_error(self, http_status: u16, request_id: Option<String>) -> ApiError {
        let status = reqwest::StatusCode::from_u16(http_status).ok();
        ApiError {
            status: http_status,
            r#type: self.r#type.unwrap_or_else(|| "api_error".to_string()),
            message: self.message.unwrap_or_else(|| {
                status
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown Error")
                    .to_string()
            }),
            code: self.code,
            param: self.param,
            request_id,
        }
    }
}
