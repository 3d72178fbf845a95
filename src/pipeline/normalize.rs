// Deterministic canonicalization of model-extracted order fields.
// Best-effort heuristics, not validation: unknown states pass through
// upper-cased, and totals only understand the `$` / `,` convention.

use crate::models::RawTotal;

/// Full state name (lowercase) to USPS code.
const STATE_CODES: &[(&str, &str)] = &[
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("district of columbia", "DC"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new hampshire", "NH"),
    ("new jersey", "NJ"),
    ("new mexico", "NM"),
    ("new york", "NY"),
    ("north carolina", "NC"),
    ("north dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode island", "RI"),
    ("south carolina", "SC"),
    ("south dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];

fn lookup_state_code(name: &str) -> Option<&'static str> {
    STATE_CODES
        .iter()
        .find(|(full, _)| *full == name)
        .map(|(_, code)| *code)
}

/// Canonicalize a state to its two-letter code.
///
/// Known full names map to their code; anything else comes back trimmed and
/// upper-cased ("oh" -> "OH"). Missing or blank input yields `None`.
pub fn normalize_state(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Fold through upper case first so the fallback output maps back to itself.
    let key = trimmed
        .to_uppercase()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    match lookup_state_code(&key) {
        Some(code) => Some(code.to_string()),
        None => Some(trimmed.to_uppercase()),
    }
}

/// Parse a total into a finite number. Never fails loudly: anything
/// unparseable is `None`.
pub fn normalize_total(raw: Option<&RawTotal>) -> Option<f64> {
    let value = match raw? {
        RawTotal::Number(n) => *n,
        RawTotal::Text(text) => text.replace(['$', ','], "").trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Round to 2 decimal places, half away from zero.
///
/// Values too large to scale by 100 come back unchanged; at that magnitude
/// an `f64` has no cents digits left to round.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / 100.0
}
