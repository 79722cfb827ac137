//! End-to-end onboarding flow for one merchant against a mock processor.

use async_trait::async_trait;
use pay_connect::{
    apis::{accounts::AccountLinkType, transfers::Currency},
    client::Environment,
    merchant::{MerchantRecord, RecordUpdate},
    JsonObject, PayConnectClient,
};
use reqwest::Url;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// The host-side record, backed by plain memory for the test.
#[derive(Debug, Default)]
struct InMemoryRecord {
    processor_id: Option<String>,
    account_info: Option<JsonObject>,
}

#[async_trait]
impl MerchantRecord for InMemoryRecord {
    fn processor_id(&self) -> Option<&str> {
        self.processor_id.as_deref()
    }

    fn account_info(&self) -> Option<&JsonObject> {
        self.account_info.as_ref()
    }

    async fn update(&mut self, update: RecordUpdate) -> anyhow::Result<()> {
        if let Some(id) = update.processor_id {
            self.processor_id = Some(id);
        }
        if let Some(info) = update.account_info {
            self.account_info = Some(info);
        }
        Ok(())
    }
}

async fn mock_client_and_server() -> (PayConnectClient, MockServer) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mock_server = MockServer::start().await;
    let client = PayConnectClient::builder("sk_test_key")
        .with_environment(Environment::from_single_url(
            &Url::parse(&mock_server.uri()).unwrap(),
        ))
        .build();

    (client, mock_server)
}

#[tokio::test]
async fn onboard_pay_and_refresh_a_merchant() {
    let (client, mock_server) = mock_client_and_server().await;
    let mut record = InMemoryRecord::default();

    Mock::given(method("POST"))
        .and(path("/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "acct_1",
            "type": "express",
            "charges_enabled": false,
            "details_submitted": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/account_links"))
        .and(body_partial_json(json!({ "account": "acct_1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "url": "https://connect.payconnect.dev/setup/s/abc"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts/acct_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "acct_1",
            "type": "express",
            "charges_enabled": true,
            "details_submitted": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/transfers"))
        .and(body_partial_json(json!({
            "amount": 10_000,
            "currency": "usd",
            "destination": "acct_1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "tr_1",
            "amount": 10_000,
            "currency": "usd",
            "destination": "acct_1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/accounts/acct_1/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available": [ { "amount": 10_000, "currency": "usd" } ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut merchant = client.merchant(&mut record);

    // Create the remote account and hand the merchant an onboarding link.
    let account = merchant.create_account(JsonObject::new()).await.unwrap();
    assert_eq!(account.id, "acct_1");

    let link = merchant
        .create_account_link(
            "https://platform.example/refresh",
            "https://platform.example/return",
            AccountLinkType::AccountOnboarding,
            JsonObject::new(),
        )
        .await
        .unwrap();
    assert_eq!(link.url, "https://connect.payconnect.dev/setup/s/abc");

    // The merchant completed onboarding remotely; refresh the snapshot.
    let account = merchant.fetch_account().await.unwrap();
    assert_eq!(account.details_submitted, Some(true));

    // Pay them and refresh the cached balance.
    let transfer = merchant
        .transfer(10_000, Currency::Usd, JsonObject::new())
        .await
        .unwrap();
    assert_eq!(transfer.id, "tr_1");

    let balance = merchant.fetch_balance().await.unwrap().expect("balance");
    assert_eq!(balance.available[0].amount, 10_000);

    // The record followed along the whole way.
    assert_eq!(record.processor_id.as_deref(), Some("acct_1"));
    let info = record.account_info.expect("account_info");
    assert_eq!(info.get("charges_enabled"), Some(&json!(true)));
    assert_eq!(info.get("details_submitted"), Some(&json!(true)));

    let cached_balance = info.get("balance").and_then(Value::as_object).unwrap();
    assert_eq!(
        cached_balance.get("available"),
        Some(&json!([ { "amount": 10_000, "currency": "usd" } ]))
    );
    assert!(cached_balance.get("updated_at").is_some());
}

#[tokio::test]
async fn a_new_merchant_has_no_balance_to_fetch() {
    let (client, _mock_server) = mock_client_and_server().await;
    let mut record = InMemoryRecord::default();

    let balance = client.merchant(&mut record).fetch_balance().await.unwrap();

    assert!(balance.is_none());
}
