use crate::JsonObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A platform-to-connected-account funds movement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Transfer {
    /// Identifier assigned by the processor, e.g. `tr_1FY7qX...`.
    pub id: String,
    /// Amount in the minor unit of `currency`, e.g. cents.
    pub amount: u64,
    pub currency: Currency,
    /// The connected account the funds were sent to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// ISO 4217 currency codes supported by the processor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Aud,
    Cad,
    Chf,
    Dkk,
    Jpy,
    Nok,
    Nzd,
    Sek,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
            Currency::Aud => "aud",
            Currency::Cad => "cad",
            Currency::Chf => "chf",
            Currency::Dkk => "dkk",
            Currency::Jpy => "jpy",
            Currency::Nok => "nok",
            Currency::Nzd => "nzd",
            Currency::Sek => "sek",
        };
        f.write_str(code)
    }
}
