use crate::{apis::transfers::Currency, JsonObject};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A connected account hosted by the processor.
///
/// Only the fields the crate acts on are typed; everything else the
/// processor returns is preserved in `extra` so that re-serializing an
/// account reproduces the full remote payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Account {
    /// Identifier assigned by the processor, e.g. `acct_1FY7qX...`.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<AccountType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charges_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payouts_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_submitted: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Express,
    Standard,
    Custom,
}

/// A short-lived URL guiding the merchant through remote onboarding or
/// profile updates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AccountLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// The flow an [`AccountLink`] sends the merchant through.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccountLinkType {
    #[default]
    AccountOnboarding,
    AccountUpdate,
}

impl fmt::Display for AccountLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountLinkType::AccountOnboarding => f.write_str("account_onboarding"),
            AccountLinkType::AccountUpdate => f.write_str("account_update"),
        }
    }
}

/// A single-use URL granting the merchant access to their dashboard on the
/// processor's site.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Balance of a connected account, split into settled and in-flight funds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Balance {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub available: Vec<BalanceFunds>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pending: Vec<BalanceFunds>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// One currency bucket of a [`Balance`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BalanceFunds {
    /// Amount in the minor unit of `currency`, e.g. cents.
    pub amount: i64,
    pub currency: Currency,
    #[serde(flatten)]
    pub extra: JsonObject,
}
