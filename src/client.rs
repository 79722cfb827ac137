//! Module containing the main processor API client.

use crate::{
    apis::{accounts::AccountsApi, transfers::TransfersApi, PayConnectClientInner},
    common::{DEFAULT_API_URL, DEFAULT_SANDBOX_API_URL},
    merchant::{Merchant, MerchantRecord},
    middlewares::{
        authentication::AuthenticationMiddleware,
        error_handling::ErrorHandlingMiddleware,
        retry_idempotent::{DynRetryPolicy, RetryIdempotentMiddleware},
    },
};
use reqwest::Url;
use reqwest_middleware::ClientWithMiddleware;
use reqwest_retry::{policies::ExponentialBackoff, RetryPolicy};
use reqwest_tracing::TracingMiddleware;
use secrecy::SecretString;
use std::sync::Arc;

/// Client for the processor's public APIs.
///
/// All remote calls share one middleware-wrapped HTTP client which injects
/// the secret API key, translates error responses and retries transient
/// failures of replay-safe requests.
#[derive(Debug, Clone)]
pub struct PayConnectClient {
    /// Connected accounts APIs client.
    pub accounts: AccountsApi,
    /// Transfers APIs client.
    pub transfers: TransfersApi,
}

impl PayConnectClient {
    /// Builds a new [`PayConnectClient`] with the default configuration.
    pub fn new(api_key: impl Into<String>) -> PayConnectClient {
        PayConnectClientBuilder::new(api_key).build()
    }

    /// Returns a new builder to configure a new [`PayConnectClient`].
    pub fn builder(api_key: impl Into<String>) -> PayConnectClientBuilder {
        PayConnectClientBuilder::new(api_key)
    }

    /// Returns a [`Merchant`](crate::merchant::Merchant) adapter operating
    /// on the given record through this client.
    pub fn merchant<'a, R: MerchantRecord>(&'a self, record: &'a mut R) -> Merchant<'a, R> {
        Merchant::new(self, record)
    }
}

/// Environment the client sends its requests to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Live,
    Sandbox,
    Custom(Url),
}

impl Environment {
    /// Points every request at a single base URL. Meant for tests against a
    /// local mock server.
    pub fn from_single_url(url: &Url) -> Self {
        Environment::Custom(url.clone())
    }

    /// Base URL for the processor APIs in this environment.
    pub fn api_url(&self) -> Url {
        match self {
            Environment::Live => Url::parse(DEFAULT_API_URL).unwrap(),
            Environment::Sandbox => Url::parse(DEFAULT_SANDBOX_API_URL).unwrap(),
            Environment::Custom(url) => url.clone(),
        }
    }
}

/// Builder for a [`PayConnectClient`].
#[derive(Debug)]
pub struct PayConnectClientBuilder {
    client: reqwest::Client,
    retry_policy: Option<DynRetryPolicy>,
    environment: Environment,
    api_key: SecretString,
}

impl PayConnectClientBuilder {
    /// Creates a new builder to configure a [`PayConnectClient`].
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            retry_policy: Some(DynRetryPolicy(Arc::new(
                ExponentialBackoff::builder().build_with_max_retries(3),
            ))),
            environment: Environment::Live,
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Consumes the builder and builds a new [`PayConnectClient`].
    pub fn build(self) -> PayConnectClient {
        let mut builder = reqwest_middleware::ClientBuilder::new(self.client)
            .with(TracingMiddleware)
            .with(ErrorHandlingMiddleware);

        if let Some(retry_policy) = self.retry_policy {
            builder = builder.with(RetryIdempotentMiddleware::new(retry_policy));
        }

        let client: ClientWithMiddleware = builder
            .with(AuthenticationMiddleware {
                api_key: self.api_key,
            })
            .build();

        let inner = Arc::new(PayConnectClientInner {
            client,
            environment: self.environment,
        });

        PayConnectClient {
            accounts: AccountsApi::new(inner.clone()),
            transfers: TransfersApi::new(inner),
        }
    }

    /// Sets a specific reqwest [`Client`](reqwest::Client) to use.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Sets a specific [`RetryPolicy`](retry_policies::RetryPolicy) to use
    /// when retrying transient failures.
    ///
    /// To disable automatic retrying of failed requests, use `None`.
    pub fn with_retry_policy(
        mut self,
        retry_policy: impl Into<Option<Arc<dyn RetryPolicy + Send + Sync + 'static>>>,
    ) -> Self {
        self.retry_policy = retry_policy.into().map(DynRetryPolicy);
        self
    }

    /// Sets the environment requests are sent to.
    ///
    /// Defaults to [`Environment::Live`].
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}
