use async_trait::async_trait;
use reqwest::{header::HeaderValue, Request, Response};
use reqwest_middleware::{Middleware, Next};
use secrecy::{ExposeSecret, SecretString};
use task_local_extensions::Extensions;

/// Reqwest middleware to inject the secret API key into outgoing HTTP requests.
///
/// The processor authenticates every call with a static bearer key, so no
/// token exchange happens here; the key is attached as a sensitive header
/// and never logged.
pub struct AuthenticationMiddleware {
    pub(crate) api_key: SecretString,
}

#[async_trait]
impl Middleware for AuthenticationMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let mut header_value =
            HeaderValue::from_str(&format!("Bearer {}", self.api_key.expose_secret()))
                .map_err(|e| reqwest_middleware::Error::Middleware(e.into()))?;
        header_value.set_sensitive(true);
        req.headers_mut().insert("Authorization", header_value);

        next.run(req, extensions).await
    }
}
