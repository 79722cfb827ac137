//! The merchant-account adapter.
//!
//! [`Merchant`] owns all remote calls to the processor for one merchant and
//! the merging of returned account data into the merchant's locally
//! persisted record. The host system owns the record itself and plugs it in
//! through the [`MerchantRecord`] trait.

use crate::{
    apis::{
        accounts::{Account, AccountLink, AccountLinkType, Balance, LoginLink},
        transfers::{Currency, Transfer},
    },
    client::PayConnectClient,
    error::{Error, MerchantError},
    JsonObject,
};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::{self, Debug, Formatter};

/// Reserved `account_info` key holding the epoch-seconds freshness stamp.
pub const UPDATED_AT_KEY: &str = "updated_at";
/// Reserved `account_info` key holding the nested balance snapshot.
pub const BALANCE_KEY: &str = "balance";

/// Host-owned persistent record for one merchant.
///
/// The adapter never owns the record's lifetime: it reads the cached
/// processor id and account-info blob, and writes exclusively through
/// [`update`](MerchantRecord::update). The host defines the transactional
/// and durability semantics of that update. The cache merge is a
/// read-modify-write with no compare-and-swap: if two copies of the same
/// durable record can be operated on concurrently, serializing writes per
/// record is the host's responsibility.
#[async_trait]
pub trait MerchantRecord: Send {
    /// The processor account id, set once an account has been created.
    fn processor_id(&self) -> Option<&str>;

    /// The cached account-info blob. Absent is treated as empty.
    fn account_info(&self) -> Option<&JsonObject>;

    /// Durably persists the given fields. Fields left `None` are unchanged;
    /// fields that are present must be persisted atomically from the
    /// caller's point of view.
    async fn update(&mut self, update: RecordUpdate) -> anyhow::Result<()>;
}

/// A partial update to a [`MerchantRecord`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordUpdate {
    pub processor_id: Option<String>,
    pub account_info: Option<JsonObject>,
}

/// Adapter for one merchant's connected account.
///
/// Every operation keys off the record's processor id, which must be set
/// for everything except [`create_account`](Merchant::create_account).
/// Remote failures of any operation surface as
/// [`MerchantError::Processor`] wrapping the underlying cause.
pub struct Merchant<'a, R: MerchantRecord> {
    client: &'a PayConnectClient,
    record: &'a mut R,
}

impl<R: MerchantRecord> Debug for Merchant<'_, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merchant")
            .field("processor_id", &self.record.processor_id())
            .finish_non_exhaustive()
    }
}

impl<'a, R: MerchantRecord> Merchant<'a, R> {
    pub fn new(client: &'a PayConnectClient, record: &'a mut R) -> Self {
        Self { client, record }
    }

    /// Creates the remote connected account for this merchant.
    ///
    /// `options` is shallow-merged over the default parameters (an express
    /// account requesting the card-payments and transfers capabilities);
    /// caller keys win at the top level. On success the record gains the new
    /// processor id and a stamped account snapshot in one durable update,
    /// and the raw created account is returned.
    ///
    /// Calling this on a record that already has a processor id creates a
    /// second remote account and repoints the record at it; guarding against
    /// re-invocation is the caller's responsibility.
    #[tracing::instrument(name = "Create Merchant Account", skip(self, options))]
    pub async fn create_account(&mut self, options: JsonObject) -> Result<Account, MerchantError> {
        let params = merge(default_account_params(), options);
        let account = self.client.accounts.create(&params).await?;

        let account_info = merge(
            self.current_account_info(),
            stamp(serialize_to_object(&account)?),
        );
        self.record
            .update(RecordUpdate {
                processor_id: Some(account.id.clone()),
                account_info: Some(account_info),
            })
            .await
            .map_err(|source| MerchantError::OrphanedAccount {
                account_id: account.id.clone(),
                source,
            })?;

        Ok(account)
    }

    /// Retrieves the current remote account state, refreshes the cached
    /// snapshot and returns the raw account.
    #[tracing::instrument(name = "Refresh Merchant Account", skip(self))]
    pub async fn fetch_account(&mut self) -> Result<Account, MerchantError> {
        let processor_id = self.require_processor_id()?.to_string();
        let account = self.client.accounts.retrieve(&processor_id).await?;

        let snapshot = stamp(serialize_to_object(&account)?);
        self.merge_account_info(snapshot).await?;

        Ok(account)
    }

    /// Creates a link sending the merchant through the given remote flow
    /// (onboarding by default). No local state is touched.
    ///
    /// `options` is shallow-merged over the base link request; caller keys
    /// win.
    #[tracing::instrument(name = "Create Merchant Account Link", skip(self, options))]
    pub async fn create_account_link(
        &self,
        refresh_url: &str,
        return_url: &str,
        link_type: AccountLinkType,
        options: JsonObject,
    ) -> Result<AccountLink, MerchantError> {
        let processor_id = self.require_processor_id()?;
        let params = merge(
            object(json!({
                "account": processor_id,
                "refresh_url": refresh_url,
                "return_url": return_url,
                "type": link_type,
            })),
            options,
        );

        Ok(self.client.accounts.create_link(&params).await?)
    }

    /// Creates a single-use login link to the merchant's dashboard on the
    /// processor's site. No local state is touched.
    #[tracing::instrument(name = "Create Merchant Login Link", skip(self, options))]
    pub async fn create_login_link(&self, options: JsonObject) -> Result<LoginLink, MerchantError> {
        let processor_id = self.require_processor_id()?;

        Ok(self
            .client
            .accounts
            .create_login_link(processor_id, &options)
            .await?)
    }

    /// Moves `amount` (in the minor unit of `currency`) from the platform
    /// balance to this merchant's connected account.
    ///
    /// `options` is shallow-merged over the base transfer request; caller
    /// keys win. Transfers never touch the cached account snapshot.
    #[tracing::instrument(
        name = "Transfer To Merchant",
        skip(self, options, currency),
        fields(currency = %currency)
    )]
    pub async fn transfer(
        &self,
        amount: u64,
        currency: Currency,
        options: JsonObject,
    ) -> Result<Transfer, MerchantError> {
        let processor_id = self.require_processor_id()?;
        let params = merge(
            object(json!({
                "amount": amount,
                "currency": currency,
                "destination": processor_id,
            })),
            options,
        );

        Ok(self.client.transfers.create(&params).await?)
    }

    /// Refreshes the cached balance of the connected account.
    ///
    /// Returns `Ok(None)` with no remote call when the record has no
    /// processor id yet. Otherwise the raw balance payload is returned and a
    /// stamped copy of it is merged under the `balance` key, leaving every
    /// other top-level key of the cached snapshot untouched.
    #[tracing::instrument(name = "Refresh Merchant Balance", skip(self))]
    pub async fn fetch_balance(&mut self) -> Result<Option<Balance>, MerchantError> {
        let processor_id = match self.record.processor_id() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Ok(None),
        };

        let balance = self.client.accounts.retrieve_balance(&processor_id).await?;

        let mut update = JsonObject::new();
        update.insert(
            BALANCE_KEY.to_string(),
            Value::Object(stamp(serialize_to_object(&balance)?)),
        );
        self.merge_account_info(update).await?;

        Ok(Some(balance))
    }

    fn require_processor_id(&self) -> Result<&str, MerchantError> {
        match self.record.processor_id() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(MerchantError::MissingProcessorId),
        }
    }

    fn current_account_info(&self) -> JsonObject {
        self.record.account_info().cloned().unwrap_or_default()
    }

    /// Single write path for cache mutation: shallow-merges `update` over
    /// the existing blob and persists the result.
    async fn merge_account_info(&mut self, update: JsonObject) -> Result<(), MerchantError> {
        let merged = merge(self.current_account_info(), update);
        self.record
            .update(RecordUpdate {
                processor_id: None,
                account_info: Some(merged),
            })
            .await
            .map_err(MerchantError::Persist)
    }
}

/// Default parameters for a new connected account.
fn default_account_params() -> JsonObject {
    object(json!({
        "type": "express",
        "capabilities": {
            "card_payments": { "requested": true },
            "transfers": { "requested": true },
        },
    }))
}

/// Shallow additive merge: every top-level key of `overrides` replaces the
/// same key in `base`; keys absent from `overrides` are preserved. Nested
/// objects are replaced wholesale, never merged recursively.
fn merge(mut base: JsonObject, overrides: JsonObject) -> JsonObject {
    for (key, value) in overrides {
        base.insert(key, value);
    }
    base
}

/// Adds the freshness stamp to a snapshot.
fn stamp(mut snapshot: JsonObject) -> JsonObject {
    snapshot.insert(
        UPDATED_AT_KEY.to_string(),
        Value::from(Utc::now().timestamp()),
    );
    snapshot
}

fn serialize_to_object<T: Serialize>(value: &T) -> Result<JsonObject, MerchantError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(MerchantError::Processor(Error::Other(anyhow::anyhow!(
            "processor payload did not serialize to a JSON object"
        )))),
        Err(e) => Err(MerchantError::Processor(Error::Other(e.into()))),
    }
}

// `json!` object literals always produce `Value::Object`.
fn object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}
