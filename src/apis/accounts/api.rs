use crate::{
    apis::{
        accounts::{Account, AccountLink, Balance, LoginLink},
        PayConnectClientInner,
    },
    common::IDEMPOTENCY_KEY_HEADER,
    Error, JsonObject,
};
use std::sync::Arc;
use urlencoding::encode;
use uuid::Uuid;

/// Connected accounts APIs client.
#[derive(Clone, Debug)]
pub struct AccountsApi {
    inner: Arc<PayConnectClientInner>,
}

impl AccountsApi {
    pub(crate) fn new(inner: Arc<PayConnectClientInner>) -> Self {
        Self { inner }
    }

    /// Creates a new connected account with the given parameters.
    #[tracing::instrument(name = "Create Connected Account", skip(self, params))]
    pub async fn create(&self, params: &JsonObject) -> Result<Account, Error> {
        // Generate a new random idempotency-key for this request
        let idempotency_key = Uuid::new_v4();

        let res = self
            .inner
            .client
            .post(
                self.inner
                    .environment
                    .api_url()
                    .join("/v1/accounts")
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

    /// Gets the current remote state of a connected account.
    #[tracing::instrument(name = "Retrieve Connected Account", skip(self))]
    pub async fn retrieve(&self, account_id: &str) -> Result<Account, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .environment
                    .api_url()
                    .join(&format!("/v1/accounts/{}", encode(account_id)))
                    .unwrap(),
            )
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }

    /// Creates an account link for the account named in `params`.
    ///
    /// The returned link contains a short-lived redirect URL.
    #[tracing::instrument(name = "Create Account Link", skip(self, params))]
    pub async fn create_link(&self, params: &JsonObject) -> Result<AccountLink, Error> {
        let res = self
            .inner
            .client
            .post(
                self.inner
                    .environment
                    .api_url()
                    .join("/v1/account_links")
                    .unwrap(),
            )
            .json(params)
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }

    /// Creates a single-use dashboard login link for a connected account.
    #[tracing::instrument(name = "Create Login Link", skip(self, params))]
    pub async fn create_login_link(
        &self,
        account_id: &str,
        params: &JsonObject,
    ) -> Result<LoginLink, Error> {
        let res = self
            .inner
            .client
            .post(
                self.inner
                    .environment
                    .api_url()
                    .join(&format!("/v1/accounts/{}/login_links", encode(account_id)))
                    .unwrap(),
            )
            .json(params)
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }

    /// Gets the balance of a connected account.
    #[tracing::instrument(name = "Retrieve Account Balance", skip(self))]
    pub async fn retrieve_balance(&self, account_id: &str) -> Result<Balance, Error> {
        let res = self
            .inner
            .client
            .get(
                self.inner
                    .environment
                    .api_url()
                    .join(&format!("/v1/accounts/{}/balance", encode(account_id)))
                    .unwrap(),
            )
            .send()
            .await?
            .json()
            .await?;

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        apis::accounts::AccountType, client::Environment,
        middlewares::error_handling::ErrorHandlingMiddleware,
    };
    use reqwest::Url;
    use serde_json::json;
    use wiremock::{
        matchers::{body_partial_json, header_exists, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    async fn mock_client_and_server() -> (AccountsApi, MockServer) {
        let mock_server = MockServer::start().await;

        let inner = PayConnectClientInner {
            client: reqwest_middleware::ClientBuilder::new(reqwest::Client::new())
                .with(ErrorHandlingMiddleware)
                .build(),
            environment: Environment::from_single_url(&Url::parse(&mock_server.uri()).unwrap()),
        };

        (AccountsApi::new(Arc::new(inner)), mock_server)
    }

    fn params(value: serde_json::Value) -> JsonObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[tokio::test]
    async fn create() {
        let (api, mock_server) = mock_client_and_server().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts"))
            .and(header_exists(IDEMPOTENCY_KEY_HEADER))
            .and(body_partial_json(json!({
                "type": "express",
                "capabilities": {
                    "card_payments": { "requested": true },
                    "transfers": { "requested": true }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "acct_1",
                "type": "express",
                "charges_enabled": false,
                "payouts_enabled": false,
                "details_submitted": false,
                "country": "US"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let account = api
            .create(&params(json!({
                "type": "express",
                "capabilities": {
                    "card_payments": { "requested": true },
                    "transfers": { "requested": true }
                }
            })))
            .await
            .unwrap();

        assert_eq!(account.id, "acct_1");
        assert_eq!(account.r#type, Some(AccountType::Express));
        assert_eq!(account.charges_enabled, Some(false));
        assert_eq!(account.extra.get("country"), Some(&json!("US")));
    }

    #[tokio::test]
    async fn retrieve() {
        let (api, mock_server) = mock_client_and_server().await;

        Mock::given(method("GET"))
            .and(path("/v1/accounts/acct_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "acct_1",
                "type": "express",
                "charges_enabled": true,
                "payouts_enabled": true,
                "details_submitted": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let account = api.retrieve("acct_1").await.unwrap();

        assert_eq!(account.id, "acct_1");
        assert_eq!(account.charges_enabled, Some(true));
        assert_eq!(account.details_submitted, Some(true));
    }

    #[tokio::test]
    async fn retrieve_not_found_is_an_error() {
        let (api, mock_server) = mock_client_and_server().await;

        Mock::given(method("GET"))
            .and(path("/v1/accounts/acct_unknown"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "No such account: acct_unknown"
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let res = api.retrieve("acct_unknown").await;

        assert!(matches!(res, Err(Error::Api(e)) if e.status == 404));
    }

    #[tokio::test]
    async fn create_link() {
        let (api, mock_server) = mock_client_and_server().await;

        Mock::given(method("POST"))
            .and(path("/v1/account_links"))
            .and(body_partial_json(json!({
                "account": "acct_1",
                "refresh_url": "https://platform.example/refresh",
                "return_url": "https://platform.example/return",
                "type": "account_onboarding"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "url": "https://connect.payconnect.dev/setup/s/abc",
                "created": 1_692_000_000,
                "expires_at": 1_692_000_300
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let link = api
            .create_link(&params(json!({
                "account": "acct_1",
                "refresh_url": "https://platform.example/refresh",
                "return_url": "https://platform.example/return",
                "type": "account_onboarding"
            })))
            .await
            .unwrap();

        assert_eq!(link.url, "https://connect.payconnect.dev/setup/s/abc");
        assert_eq!(link.expires_at, Some(1_692_000_300));
    }

    #[tokio::test]
    async fn create_login_link() {
        let (api, mock_server) = mock_client_and_server().await;

        Mock::given(method("POST"))
            .and(path("/v1/accounts/acct_1/login_links"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "url": "https://connect.payconnect.dev/express/login/xyz",
                "created": 1_692_000_000
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let link = api
            .create_login_link("acct_1", &JsonObject::new())
            .await
            .unwrap();

        assert_eq!(link.url, "https://connect.payconnect.dev/express/login/xyz");
    }

    #[tokio::test]
    async fn retrieve_balance() {
        let (api, mock_server) = mock_client_and_server().await;

        Mock::given(method("GET"))
            .and(path("/v1/accounts/acct_1/balance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "available": [ { "amount": 500, "currency": "usd" } ],
                "pending": [ { "amount": 250, "currency": "usd" } ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let balance = api.retrieve_balance("acct_1").await.unwrap();

        assert_eq!(balance.available.len(), 1);
        assert_eq!(balance.available[0].amount, 500);
        assert_eq!(balance.pending[0].amount, 250);
    }
}
