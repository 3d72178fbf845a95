use serde::{Deserialize, Serialize};

/// Filtering criteria extracted from the user's query.
///
/// An absent field means "no constraint", never "constraint of zero/empty".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// State as the model reported it; normalized at filter time.
    pub state: Option<String>,
    /// Exclusive lower bound on the order total.
    #[serde(alias = "minTotal")]
    pub min_total: Option<f64>,
}

impl Intent {
    /// Intent that constrains nothing; filtering becomes a pass-through.
    pub fn empty() -> Self {
        Self::default()
    }
}
