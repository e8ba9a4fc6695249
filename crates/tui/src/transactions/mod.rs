use serde_json::Value;
use tracing::debug;

use api_types::{
    Currency, PartyKind, PaymentMethod,
    transaction::{NewTransaction, Party, Transaction},
};

use crate::{client::ApiClient, client::extract, config::Endpoints};

/// In-memory transaction list plus the loading/error pair the UI renders.
/// The store owns the list exclusively; nothing else mutates it.
pub struct TransactionStore {
    client: ApiClient,
    endpoints: Endpoints,
    items: Vec<Transaction>,
    loading: bool,
    error: String,
}

impl TransactionStore {
    pub fn new(client: ApiClient, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            items: Vec::new(),
            loading: false,
            error: String::new(),
        }
    }

    pub fn items(&self) -> &[Transaction] {
        &self.items
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    /// Live sum over the current list, in the smallest currency unit.
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(|tx| tx.amount).sum()
    }

    /// Replaces the list with the server's, normalizing every record. On
    /// failure the list is cleared and `error` carries the message. The
    /// loading flag is released on every exit path.
    pub async fn fetch_transactions(&mut self) {
        self.loading = true;
        self.error.clear();

        match self.client.get(&self.endpoints.transactions_list).await {
            Ok(payload) => {
                self.items = extract::transaction_list(&payload)
                    .iter()
                    .map(normalize)
                    .collect();
                debug!(count = self.items.len(), "transactions loaded");
            }
            Err(err) => {
                self.error = err.message();
                self.items.clear();
            }
        }

        self.loading = false;
    }

    /// Creates a transaction and prepends the server's normalized record.
    /// Nothing is applied optimistically, so a failure leaves the list
    /// untouched.
    pub async fn add_transaction(&mut self, payload: &NewTransaction) -> Result<Transaction, String> {
        self.loading = true;
        self.error.clear();

        let result = self
            .client
            .post_json(&self.endpoints.transactions_create, payload)
            .await;

        let outcome = match result {
            Ok(body) => {
                let tx = normalize(&extract::transaction_record(&body));
                self.items.insert(0, tx.clone());
                Ok(tx)
            }
            Err(err) => {
                let message = err.message();
                self.error = message.clone();
                Err(message)
            }
        };

        self.loading = false;
        outcome
    }
}

/// Fills missing or aliased server fields with defaults so the UI never
/// sees a hole: `individual` parties, empty strings, `cash`, `IRR`, amount
/// coerced to a non-negative integer defaulting to 0.
pub fn normalize(value: &Value) -> Transaction {
    Transaction {
        id: text(value.get("id")),
        receiver: party(value.get("receiver")),
        payer: party(value.get("payer")),
        payment_method: payment_method(
            value
                .get("paymentMethod")
                .or_else(|| value.get("payment_method")),
        ),
        currency: currency(value.get("currency")),
        amount: amount(value.get("amount")),
        description: text(value.get("description")),
        datetime_iso: text(value.get("datetimeISO").or_else(|| value.get("datetime"))),
    }
}

fn party(value: Option<&Value>) -> Party {
    let Some(value) = value else {
        return Party::default();
    };
    let kind = match value.get("type").and_then(Value::as_str) {
        Some("legal") => PartyKind::Legal,
        _ => PartyKind::Individual,
    };
    Party {
        kind,
        name: text(value.get("name")),
        id: text(value.get("id")),
    }
}

fn payment_method(value: Option<&Value>) -> PaymentMethod {
    match value.and_then(Value::as_str) {
        Some("account") => PaymentMethod::Account,
        _ => PaymentMethod::Cash,
    }
}

fn currency(value: Option<&Value>) -> Currency {
    value
        .and_then(Value::as_str)
        .and_then(Currency::from_code)
        .unwrap_or_default()
}

/// Amount coercion: integers pass through, floats and numeric strings are
/// accepted, anything else (including negatives) becomes 0.
fn amount(value: Option<&Value>) -> u64 {
    let Some(value) = value else { return 0 };
    if let Some(n) = value.as_u64() {
        return n;
    }
    if let Some(f) = value.as_f64() {
        return if f.is_finite() && f >= 0.0 { f as u64 } else { 0 };
    }
    value
        .as_str()
        .map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f as u64)
        .unwrap_or(0)
}

/// String fields accept strings or numbers (ids sometimes arrive numeric);
/// anything else becomes the empty string.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_fills_every_default() {
        let tx = normalize(&json!({}));
        assert_eq!(tx.id, "");
        assert_eq!(tx.receiver, Party::default());
        assert_eq!(tx.payer.kind, PartyKind::Individual);
        assert_eq!(tx.payment_method, PaymentMethod::Cash);
        assert_eq!(tx.currency, Currency::Irr);
        assert_eq!(tx.amount, 0);
        assert_eq!(tx.description, "");
        assert_eq!(tx.datetime_iso, "");
    }

    #[test]
    fn normalize_keeps_known_values() {
        let tx = normalize(&json!({
            "id": "t9",
            "receiver": { "type": "legal", "name": "Acme", "id": 4411 },
            "paymentMethod": "account",
            "currency": "EUR",
            "amount": 2500,
            "description": "invoice",
            "datetimeISO": "2026-02-01T08:30:00Z"
        }));
        assert_eq!(tx.receiver.kind, PartyKind::Legal);
        assert_eq!(tx.receiver.id, "4411");
        assert_eq!(tx.payment_method, PaymentMethod::Account);
        assert_eq!(tx.currency, Currency::Eur);
        assert_eq!(tx.amount, 2500);
        assert_eq!(tx.datetime_iso, "2026-02-01T08:30:00Z");
    }

    #[test]
    fn normalize_accepts_field_aliases() {
        let tx = normalize(&json!({
            "payment_method": "account",
            "datetime": "2026-02-01T08:30:00Z"
        }));
        assert_eq!(tx.payment_method, PaymentMethod::Account);
        assert_eq!(tx.datetime_iso, "2026-02-01T08:30:00Z");
    }

    #[test]
    fn amount_coercion_matches_the_backend_quirks() {
        assert_eq!(amount(Some(&json!(1000))), 1000);
        assert_eq!(amount(Some(&json!("1000"))), 1000);
        assert_eq!(amount(Some(&json!(" 1000 "))), 1000);
        assert_eq!(amount(Some(&json!(1000.9))), 1000);
        assert_eq!(amount(Some(&json!(-5))), 0);
        assert_eq!(amount(Some(&json!("not a number"))), 0);
        assert_eq!(amount(None), 0);
    }

    #[test]
    fn unknown_currency_falls_back_to_default() {
        assert_eq!(currency(Some(&json!("GBP"))), Currency::Irr);
        assert_eq!(currency(Some(&json!("USD"))), Currency::Usd);
        assert_eq!(currency(None), Currency::Irr);
    }

    #[test]
    fn total_amount_tracks_the_list() {
        let tokens =
            crate::session::token_file::TokenFile::load("target/never_created.json").unwrap();
        let client = ApiClient::new("http://localhost:0".to_string(), tokens, None);
        let mut store = TransactionStore::new(client, Endpoints::default());
        assert_eq!(store.total_amount(), 0);

        store.items = vec![
            normalize(&json!({ "amount": 100 })),
            normalize(&json!({ "amount": "250" })),
        ];
        assert_eq!(store.total_amount(), 350);
    }
}
