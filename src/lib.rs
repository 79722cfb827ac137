//! Client for onboarding merchants onto a Connect-style payment processor
//! and managing the lifecycle of their connected accounts.
//!
//! The crate has two layers:
//!
//! - [`PayConnectClient`](crate::client::PayConnectClient) — a thin client
//!   for the processor's HTTP APIs (connected accounts, account links,
//!   login links, balances, transfers).
//! - [`Merchant`](crate::merchant::Merchant) — the merchant-account
//!   adapter. It pairs the client with one host-owned
//!   [`MerchantRecord`](crate::merchant::MerchantRecord) and keeps the
//!   record's cached account snapshot in sync with every remote call.
//!
//! # Usage
//!
//! ## Initialize a new `PayConnectClient`
//!
//! Create a new [`PayConnectClient`](crate::client::PayConnectClient) and
//! provide your secret API key.
//!
//! ```rust,no_run
//! # use pay_connect::PayConnectClient;
//! let client = PayConnectClient::builder("sk_live_...").build();
//! ```
//!
//! By default the client connects to the Live environment. To connect to
//! the Sandbox, use
//! [`with_environment(Environment::Sandbox)`](crate::client::PayConnectClientBuilder::with_environment).
//!
//! ## Onboard a merchant
//!
//! The host system provides the persistent record; any type implementing
//! [`MerchantRecord`](crate::merchant::MerchantRecord) works.
//!
//! ```rust,no_run
//! # use pay_connect::{
//! #     apis::accounts::AccountLinkType,
//! #     merchant::{MerchantRecord, RecordUpdate},
//! #     JsonObject, MerchantError, PayConnectClient,
//! # };
//! # #[derive(Default)]
//! # struct MyRecord {
//! #     processor_id: Option<String>,
//! #     account_info: Option<JsonObject>,
//! # }
//! # #[async_trait::async_trait]
//! # impl MerchantRecord for MyRecord {
//! #     fn processor_id(&self) -> Option<&str> {
//! #         self.processor_id.as_deref()
//! #     }
//! #     fn account_info(&self) -> Option<&JsonObject> {
//! #         self.account_info.as_ref()
//! #     }
//! #     async fn update(&mut self, update: RecordUpdate) -> anyhow::Result<()> {
//! #         self.processor_id = update.processor_id.or(self.processor_id.take());
//! #         self.account_info = update.account_info.or(self.account_info.take());
//! #         Ok(())
//! #     }
//! # }
//! # #[tokio::main]
//! # async fn main() -> Result<(), MerchantError> {
//! # let client = PayConnectClient::new("sk_live_...");
//! # let mut record = MyRecord::default();
//! let mut merchant = client.merchant(&mut record);
//!
//! let account = merchant.create_account(JsonObject::new()).await?;
//! println!("Created connected account: {}", account.id);
//!
//! let link = merchant
//!     .create_account_link(
//!         "https://platform.example/refresh",
//!         "https://platform.example/return",
//!         AccountLinkType::AccountOnboarding,
//!         JsonObject::new(),
//!     )
//!     .await?;
//! println!("Send the merchant to: {}", link.url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pay a merchant and check their balance
//!
//! Once the merchant finishes onboarding, funds can be moved to their
//! account and the cached balance refreshed:
//!
//! ```rust,no_run
//! # use pay_connect::{
//! #     apis::transfers::Currency,
//! #     merchant::{MerchantRecord, RecordUpdate},
//! #     JsonObject, MerchantError, PayConnectClient,
//! # };
//! # #[derive(Default)]
//! # struct MyRecord {
//! #     processor_id: Option<String>,
//! #     account_info: Option<JsonObject>,
//! # }
//! # #[async_trait::async_trait]
//! # impl MerchantRecord for MyRecord {
//! #     fn processor_id(&self) -> Option<&str> {
//! #         self.processor_id.as_deref()
//! #     }
//! #     fn account_info(&self) -> Option<&JsonObject> {
//! #         self.account_info.as_ref()
//! #     }
//! #     async fn update(&mut self, update: RecordUpdate) -> anyhow::Result<()> {
//! #         self.processor_id = update.processor_id.or(self.processor_id.take());
//! #         self.account_info = update.account_info.or(self.account_info.take());
//! #         Ok(())
//! #     }
//! # }
//! # #[tokio::main]
//! # async fn main() -> Result<(), MerchantError> {
//! # let client = PayConnectClient::new("sk_live_...");
//! # let mut record = MyRecord::default();
//! let mut merchant = client.merchant(&mut record);
//!
//! let transfer = merchant
//!     .transfer(10_000, Currency::Usd, JsonObject::new())
//!     .await?;
//! println!("Transferred: {}", transfer.id);
//!
//! if let Some(balance) = merchant.fetch_balance().await? {
//!     for funds in &balance.available {
//!         println!("Available: {} {}", funds.amount, funds.currency);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_debug_implementations)]
#![forbid(unsafe_code)]

pub mod apis;
pub mod client;
mod common;
pub mod error;
pub mod merchant;
mod middlewares;

pub use client::PayConnectClient;
pub use error::{Error, MerchantError};
pub use merchant::{Merchant, MerchantRecord};

/// A JSON object: the open parameter and snapshot mapping used across the
/// crate for request options and the cached account-info blob.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
