//! Input and output value types for a receipt render.
//!
//! All of these are read-only snapshots supplied by the caller; the renderer
//! never mutates or retains them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One side of a transfer: the account identifier and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub label: String,
}

impl Account {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

/// Snapshot of a completed fund transfer.
///
/// `reference_number` is used verbatim in the output filename, so it must not
/// contain path separators. This is not checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub reference_number: String,
    pub type_code: String,
    pub from_account: Account,
    pub to_account: Account,
    pub currency: String,
    /// Decimal amount as text; rendered as-is.
    pub amount: String,
    #[serde(default)]
    pub narration: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Externally resolved outcome of the transfer. Treated as opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferStatus {
    pub message: String,
}

impl TransferStatus {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// The five transfer kinds a type code can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    OwnAccount,
    ThirdParty,
    InterBank,
    Mobile,
    Overseas,
}

impl TransactionType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(TransactionType::OwnAccount),
            "2" => Some(TransactionType::ThirdParty),
            "3" => Some(TransactionType::InterBank),
            "4" => Some(TransactionType::Mobile),
            "5" => Some(TransactionType::Overseas),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::OwnAccount => "Own Account Fund transfer",
            TransactionType::ThirdParty => "Third party Fund transfer",
            TransactionType::InterBank => "Inter bank Fund transfer",
            TransactionType::Mobile => "Mobile Fund transfer",
            TransactionType::Overseas => "Overseas Fund transfer",
        }
    }
}

/// Display label for a raw type code. Unknown codes yield an empty string.
pub fn transaction_type_label(code: &str) -> &'static str {
    TransactionType::from_code(code).map(TransactionType::label).unwrap_or("")
}

/// Result of a successful render: the base name of the written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedReceipt {
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_known_code() {
        assert_eq!(transaction_type_label("1"), "Own Account Fund transfer");
        assert_eq!(transaction_type_label("2"), "Third party Fund transfer");
        assert_eq!(transaction_type_label("3"), "Inter bank Fund transfer");
        assert_eq!(transaction_type_label("4"), "Mobile Fund transfer");
        assert_eq!(transaction_type_label("5"), "Overseas Fund transfer");
    }

    #[test]
    fn unknown_codes_map_to_empty_label() {
        for code in ["", "0", "6", "01", " 1", "one", "10"] {
            assert_eq!(transaction_type_label(code), "", "code {code:?}");
        }
    }

    #[test]
    fn codes_parse_to_distinct_kinds() {
        let kinds: Vec<_> = ["1", "2", "3", "4", "5"]
            .iter()
            .filter_map(|code| TransactionType::from_code(code))
            .collect();
        assert_eq!(kinds.len(), 5);
        assert_eq!(kinds[0], TransactionType::OwnAccount);
        assert_eq!(kinds[4], TransactionType::Overseas);
    }

    #[test]
    fn record_deserializes_from_camel_case_json() {
        let json = r#"{
            "referenceNumber": "AX123",
            "typeCode": "2",
            "fromAccount": { "id": "001", "label": "Alice" },
            "toAccount": { "id": "002", "label": "Bob" },
            "currency": "USD",
            "amount": "500.00",
            "createdAt": "2024-01-01T10:00:00"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.reference_number, "AX123");
        assert_eq!(record.to_account, Account::new("002", "Bob"));
        assert!(record.narration.is_none());
    }
}
