use serde::{Deserialize, Serialize};

/// A total as the model emitted it: a JSON number or free text like "$1,234.50".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTotal {
    Number(f64),
    Text(String),
}

impl From<f64> for RawTotal {
    fn from(value: f64) -> Self {
        RawTotal::Number(value)
    }
}

impl From<&str> for RawTotal {
    fn from(value: &str) -> Self {
        RawTotal::Text(value.to_string())
    }
}

/// An order as extracted from raw text. Any field may be missing or malformed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateOrder {
    pub order_id: Option<String>,
    pub buyer: Option<String>,
    pub state: Option<String>,
    pub total: Option<RawTotal>,
}

/// An order that passed every filter, with normalized state and total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalOrder {
    pub order_id: String,
    pub buyer: Option<String>,
    pub state: Option<String>,
    /// Rounded to 2 decimal places.
    pub total: f64,
}

/// The document printed by the CLI: `{"orders": [...]}`.
#[derive(Debug, Serialize)]
pub struct OrdersDocument<'a> {
    pub orders: &'a [FinalOrder],
}
