use serde::{Deserialize, Serialize};

/// Currency codes the backend accepts for a transaction.
///
/// Serialized as the upper-case ISO-style code. `IRR` is the backend's
/// default when a record carries no currency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Irr,
    Irt,
    Usd,
    Eur,
    Aed,
    Try,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Irr,
        Currency::Irt,
        Currency::Usd,
        Currency::Eur,
        Currency::Aed,
        Currency::Try,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::Irr => "IRR",
            Self::Irt => "IRT",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Aed => "AED",
            Self::Try => "TRY",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

/// How a transaction was settled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Account,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Account => "account",
        }
    }
}

/// Whether a party to a transaction is a natural person or a company.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    #[default]
    Individual,
    Legal,
}

pub mod transaction {
    use super::*;

    /// One side of a transaction (payer or receiver).
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Party {
        #[serde(rename = "type", default)]
        pub kind: PartyKind,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub id: String,
    }

    /// Canonical transaction shape.
    ///
    /// Every record held by the client has passed through normalization, so
    /// all fields are present; missing server fields become the defaults
    /// below. Amounts are in the smallest currency unit.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Transaction {
        #[serde(default)]
        pub id: String,
        #[serde(default)]
        pub receiver: Party,
        #[serde(default)]
        pub payer: Party,
        #[serde(rename = "paymentMethod", default)]
        pub payment_method: PaymentMethod,
        #[serde(default)]
        pub currency: Currency,
        #[serde(default)]
        pub amount: u64,
        #[serde(default)]
        pub description: String,
        #[serde(rename = "datetimeISO", default)]
        pub datetime_iso: String,
    }

    /// Body for the create endpoint; the server assigns the id.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct NewTransaction {
        pub receiver: Party,
        pub payer: Party,
        #[serde(rename = "paymentMethod")]
        pub payment_method: PaymentMethod,
        pub currency: Currency,
        pub amount: u64,
        pub description: String,
        #[serde(rename = "datetimeISO")]
        pub datetime_iso: String,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResetCodeRequest {
        pub username: String,
    }

    /// Body for the reset-confirm endpoint. The new password travels under
    /// the plain `password` key.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ResetPasswordRequest {
        pub username: String,
        pub code: String,
        pub password: String,
    }
}
