use crate::common::IDEMPOTENCY_KEY_HEADER;
use async_trait::async_trait;
use reqwest::{Method, Request, Response};
use reqwest_middleware::{Middleware, Next};
use reqwest_retry::RetryTransientMiddleware;
use retry_policies::{RetryDecision, RetryPolicy};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};
use task_local_extensions::Extensions;

/// Middleware that automatically retries transient failures, but only on
/// requests that are safe to replay.
///
/// A request is safe to replay if and only if:
/// - It uses an idempotent method (`GET`, `HEAD`, `PUT` or `DELETE`), or
/// - It is a `POST` carrying a non-empty `Idempotency-Key` header, which the
///   processor uses to de-duplicate resource creation on its side.
pub struct RetryIdempotentMiddleware {
    inner: RetryTransientMiddleware<DynRetryPolicy>,
}

impl RetryIdempotentMiddleware {
    pub fn new(retry_policy: DynRetryPolicy) -> Self {
        Self {
            inner: RetryTransientMiddleware::new_with_policy(retry_policy),
        }
    }
}

#[async_trait]
impl Middleware for RetryIdempotentMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let safe_to_replay = match *req.method() {
            Method::GET | Method::HEAD | Method::PUT | Method::DELETE => true,
            Method::POST => req
                .headers()
                .get(IDEMPOTENCY_KEY_HEADER)
                .map_or(false, |v| !v.is_empty()),
            _ => false,
        };

        if safe_to_replay {
            self.inner.handle(req, extensions, next).await
        } else {
            next.run(req, extensions).await
        }
    }
}

/// Wrapper type around a retry policy because `dyn RetryPolicy` does not implement `RetryPolicy`.
#[derive(Clone)]
pub struct DynRetryPolicy(pub Arc<dyn RetryPolicy + Send + Sync + 'static>);

impl RetryPolicy for DynRetryPolicy {
    fn should_retry(&self, n_past_retries: u32) -> RetryDecision {
        self.0.should_retry(n_past_retries)
    }
}

impl Debug for DynRetryPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynRetryPolicy").finish_non_exhaustive()
    }
}
