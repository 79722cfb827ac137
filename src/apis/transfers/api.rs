use crate::{
    apis::{transfers::Transfer, PayConnectClientInner},
    common::IDEMPOTENCY_KEY_HEADER,
    Error, JsonObject,
};
use std::sync::Arc;
use uuid::Uuid;

/// Transfers APIs client.
#[derive(Clone, Debug)]
pub struct TransfersApi {
    inner: Arc<PayConnectClientInner>,
}

impl TransfersApi {
    pub(crate) fn new(inner: Arc<PayConnectClientInner>) -> Self {
        Self { inner }
    }

    /// Moves funds from the platform balance to the connected account named
    /// in `params` as `destination`.
    #[tracing::instrument(name = "Create Transfer", skip(self, params))]
    pub async fn create(&self, params: &JsonObject) -> Result<Transfer, Error> {
        // Generate a new random idempotency-key for this request
        let idempotency_key = Uuid::new_v4();

        let res = self
            .inner
            .client
            .post(
                self.inner
                    .environment
                    .api_url()
                    .join("/v1/transfers")
                    .unwrap(),
            )
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key.to_string())
            .json(params)
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }
}
